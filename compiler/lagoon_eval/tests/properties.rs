#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Whole-program behavior of the interpreter through its public API.

use lagoon_eval::{
    buffer_handler, silent_handler, EvalError, ExceptionKind, Interpreter, LagoonError,
    ScopeChain, Value,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn interpreter() -> Interpreter {
    Interpreter::builder().print_handler(silent_handler()).build()
}

fn run(source: &str) -> ScopeChain {
    interpreter()
        .run_source(source)
        .unwrap_or_else(|e| panic!("{source:?} failed: {e}"))
}

fn get(chain: &ScopeChain, name: &str) -> Value {
    chain
        .lookup(name)
        .unwrap_or_else(|| panic!("{name} is not bound"))
}

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::Int).collect())
}

#[test]
fn destructuring_mismatch_assigns_nothing() {
    let chain = run("\
try { a, b = 1, 2, 3 } except TypeError as e { caught = e.message }
r = a except NameError else 'unassigned'
");
    assert_eq!(get(&chain, "r"), Value::str("unassigned"));
    assert!(get(&chain, "caught").as_str().is_some());
}

#[test]
fn break_unwinds_requested_levels() {
    let chain = run("\
inner = 0
outer = 0
times 3 {
    outer += 1
    times 3 {
        inner += 1
        break 2
    }
}
after = true
");
    assert_eq!(get(&chain, "inner"), Value::Int(1));
    assert_eq!(get(&chain, "outer"), Value::Int(1));
    assert_eq!(get(&chain, "after"), Value::Bool(true));
}

#[test]
fn continue_ends_only_its_own_block() {
    let chain = run("\
skipped = 0
rest = 0
times 3 {
    if true {
        continue
        skipped += 1
    }
    rest += 1
}
");
    assert_eq!(get(&chain, "skipped"), Value::Int(0));
    assert_eq!(get(&chain, "rest"), Value::Int(3));
}

#[test]
fn continue_leaves_pending_break_intact() {
    let chain = run("\
count = 0
times 2 {
    times 2 {
        if true { continue }
        break 2
    }
    count += 1
}
");
    assert_eq!(get(&chain, "count"), Value::Int(0));
}

#[test]
fn return_escapes_nested_loops() {
    let chain = run("\
f = fn {
    times 10 {
        while true {
            for x in 0..5 {
                if x == 3 { return x * 7 }
            }
        }
    }
    'unreached'
}
r = f()
");
    assert_eq!(get(&chain, "r"), Value::Int(21));
}

#[test]
fn tables_track_their_owner() {
    let chain = run("\
t = {}
u = {}
v = {}
t.x = v
first = v.parent is t
u.y = v
second = v.parent is u
delattr(u, 'y')
orphan = not hasattr(v, 'parent')
");
    assert_eq!(get(&chain, "first"), Value::Bool(true));
    assert_eq!(get(&chain, "second"), Value::Bool(true));
    assert_eq!(get(&chain, "orphan"), Value::Bool(true));
}

#[test]
fn parent_survives_the_owner_going_out_of_reach() {
    let chain = run("\
t = {x = {}, tag = 'outer'}
v = t.x
t = 0
kept = v.parent.tag
make = fn {
    made = {inner = {}, tag = 'made'}
    made
}
c = make().inner
from_call = c.parent.tag
");
    assert_eq!(get(&chain, "kept"), Value::str("outer"));
    assert_eq!(get(&chain, "from_call"), Value::str("made"));
}

#[test]
fn metatable_supplies_missing_attributes() {
    let chain = run("\
Base = {greet = 'hi', name = 'base'}
t = {metatable = Base, name = 't'}
greet = t.greet
name = t.name
missing = t.nope except NameError else 'missing'
");
    assert_eq!(get(&chain, "greet"), Value::str("hi"));
    assert_eq!(get(&chain, "name"), Value::str("t"));
    assert_eq!(get(&chain, "missing"), Value::str("missing"));
}

#[test]
fn interpolating_string_macro() {
    let chain = run("r = \"#{1+2}\"i\nwho = 'world'\ns = 'hello #{who}!'i\n");
    assert_eq!(get(&chain, "r"), Value::str("3"));
    assert_eq!(get(&chain, "s"), Value::str("hello world!"));
}

#[test]
fn half_open_and_closed_ranges() {
    let chain = run("a = List(0..5)\nb = List(0...5)\n");
    assert_eq!(get(&chain, "a"), ints(&[0, 1, 2, 3, 4]));
    assert_eq!(get(&chain, "b"), ints(&[0, 1, 2, 3, 4, 5]));
}

#[test]
fn comprehensions_filter_and_generators_run_once() {
    let chain = run("\
eager = [x * 2 for x in (1, 2, 3) if x != 2]
g = (x * 2 for x in (1, 2, 3) if x != 2)
first = List(g)
second = List(g)
");
    assert_eq!(get(&chain, "eager"), ints(&[2, 6]));
    assert_eq!(get(&chain, "first"), ints(&[2, 6]));
    assert_eq!(get(&chain, "second"), ints(&[]));
}

#[test]
fn generator_evaluates_elements_on_demand() {
    let chain = run("\
seen = []
g = (seen.append(x) or x for x in (1, 2, 3, 4) if x % 2 == 0)
before = len(seen)
first = next(g)
after_first = len(seen)
second = next(g)
after_second = len(seen)
");
    assert_eq!(get(&chain, "before"), Value::Int(0));
    assert_eq!(get(&chain, "first"), Value::Int(2));
    assert_eq!(get(&chain, "after_first"), Value::Int(1));
    assert_eq!(get(&chain, "second"), Value::Int(4));
    assert_eq!(get(&chain, "after_second"), Value::Int(2));
}

#[test]
fn except_binds_the_raised_object() {
    let chain = run("\
f = fn { try { raise TypeError } except TypeError as e { e } }
r = f()
kind = type(r)
");
    assert_eq!(get(&chain, "kind"), Value::ExceptionType(ExceptionKind::TypeError));
}

#[test]
fn unmatched_filter_reraises_unchanged() {
    let chain = run("\
err = ValueError('v')
try {
    try { raise err } except TypeError { r = 'wrong' }
} except as e {
    same = e is err
}
");
    assert_eq!(get(&chain, "same"), Value::Bool(true));
    assert!(chain.lookup("r").is_none());
}

#[test]
fn uncaught_runtime_failure_reports_position() {
    let err = interpreter()
        .run_source("a = 1\nb = 2\nc = a / (b - 2)\n")
        .unwrap_err();
    let LagoonError::Eval(EvalError::Positioned { line, .. }) = &err else {
        panic!("expected a positioned failure, got {err}");
    };
    assert_eq!(*line, 3);
    assert_eq!(err.kind(), Some(ExceptionKind::InterpreterError));
    assert!(err.to_string().starts_with("InterpreterError: error at line 3"));
}

#[test]
fn print_reaches_the_configured_handler() {
    let output = buffer_handler();
    let interp = Interpreter::builder().print_handler(output.clone()).build();
    interp
        .run_source("for i in 1..4 { print(i * i) }\n")
        .unwrap();
    assert_eq!(output.get_output(), "1\n4\n9\n");
}

#[test]
fn scripts_load_their_neighbours() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("util.lg"), "twice = fn(x) { x * 2 }\n").unwrap();
    let main = dir.path().join("main.lg");
    std::fs::write(&main, "util = load('util.lg')\nr = util.twice(21)\n").unwrap();

    let chain = interpreter().run_file(&main).unwrap();
    assert_eq!(get(&chain, "r"), Value::Int(42));
}

#[test]
fn missing_script_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = interpreter()
        .run_file(dir.path().join("absent.lg"))
        .unwrap_err();
    assert!(matches!(err, LagoonError::Io { .. }));
}

proptest! {
    #[test]
    fn range_length_matches_bounds(start in -50i64..50, end in -50i64..50) {
        let value = interpreter()
            .eval_source(&format!("len(List(({start})..({end})))"))
            .unwrap();
        prop_assert_eq!(value, Value::Int((end - start).max(0)));
    }

    #[test]
    fn closed_range_includes_end(start in -20i64..20, len in 0i64..20) {
        let end = start + len;
        let value = interpreter()
            .eval_source(&format!("List(({start})...({end}))[-1]"))
            .unwrap();
        prop_assert_eq!(value, Value::Int(end));
    }
}
