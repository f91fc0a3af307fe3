#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::errors::ExceptionKind;
use crate::print_handler::silent_handler;

fn interpreter() -> Interpreter {
    Interpreter::builder().print_handler(silent_handler()).build()
}

fn run(source: &str, name: &str) -> Value {
    let chain = interpreter().run_source(source).unwrap();
    chain
        .lookup(name)
        .unwrap_or_else(|| panic!("{name} is not bound"))
}

fn run_err(source: &str) -> EvalError {
    match interpreter().run_source(source) {
        Err(LagoonError::Eval(err)) => err,
        Err(other) => panic!("expected an evaluation error, got {other}"),
        Ok(_) => panic!("expected an evaluation error"),
    }
}

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::Int).collect())
}

// Calls

#[test]
fn test_closure_sees_later_writes_to_defining_scope() {
    let r = run("f = fn { x }\nx = 5\nr = f()\n", "r");
    assert_eq!(r, Value::Int(5));
}

#[test]
fn test_call_result_is_last_statement_value() {
    assert_eq!(run("f = fn(a) { a + 1 }\nr = f(1)\n", "r"), Value::Int(2));
    assert_eq!(run("f = fn { }\nr = f()\n", "r"), Value::None);
}

#[test]
fn test_binding_precedence() {
    let source = "\
f = fn(a = 1, b = 2, c = 3) { (a, b, c) }
r = f(10, c = 30)
";
    assert_eq!(
        run(source, "r"),
        Value::tuple(vec![Value::Int(10), Value::Int(2), Value::Int(30)])
    );
}

#[test]
fn test_arguments_evaluate_in_source_order() {
    let source = "\
order = []
note = fn(tag) { order.append(tag)\n tag }
f = fn(a, b, c) { (a, b, c) }
r = f(note('a'), c = note('c'), b = note('b'))
";
    assert_eq!(
        run(source, "order"),
        Value::list(vec![Value::str("a"), Value::str("c"), Value::str("b")])
    );
    assert_eq!(
        run(source, "r"),
        Value::tuple(vec![Value::str("a"), Value::str("b"), Value::str("c")])
    );
}

#[test]
fn test_static_default_is_evaluated_once() {
    let source = "\
globalvars.n = 0
tick = fn { $n += 1; $n }
f = fn(a = tick()) { a }
r = (f(), f())
";
    assert_eq!(
        run(source, "r"),
        Value::tuple(vec![Value::Int(1), Value::Int(1)])
    );
}

#[test]
fn test_dynamic_default_uses_defining_scope_per_call() {
    let source = "\
base = 1
f = fn(a := base * 10) { a }
g = fn { base = 2; f() }
first = g()
base = 3
second = f()
";
    assert_eq!(run(source, "first"), Value::Int(10));
    assert_eq!(run(source, "second"), Value::Int(30));
}

#[test]
fn test_args_and_current_bindings() {
    assert_eq!(
        run("f = fn { args }\nr = f(1, 2)\n", "r"),
        Value::tuple(vec![Value::Int(1), Value::Int(2)])
    );
    assert_eq!(run("f = fn { current }\nr = f()\n", "r"), Value::None);
    assert_eq!(run("f = fn { current }\nr = f(current = 4)\n", "r"), Value::Int(4));
}

#[test]
fn test_method_binding_sets_current() {
    let source = "t = {n = 2, twice = fn { @n * 2 }}\nr = t.twice()\n";
    assert_eq!(run(source, "r"), Value::Int(4));
}

#[test]
fn test_closure_fetched_from_non_table_is_bound() {
    let source = "\
m = import('math')
m.who = fn { current }
r = m.who() is m
";
    assert_eq!(run(source, "r"), Value::Bool(true));
}

#[test]
fn test_numbered_arguments() {
    assert_eq!(run("f = fn { %0 + %1 }\nr = f(1, 2)\n", "r"), Value::Int(3));
    assert_eq!(
        run_err("f = fn { %2 }\nf(1)\n").kind(),
        Some(ExceptionKind::TypeError)
    );
    assert_eq!(run_err("x = %0\n").kind(), Some(ExceptionKind::OtherError));
}

#[test]
fn test_calling_non_callable_is_type_error() {
    assert_eq!(run_err("x = 1\nx()\n").kind(), Some(ExceptionKind::TypeError));
}

#[test]
fn test_recursion_limit() {
    let interp = Interpreter::builder()
        .print_handler(silent_handler())
        .max_call_depth(32)
        .build();
    let chain = interp
        .run_source("f = fn { f() }\ntry { f() } except RuntimeError as e { r = e.message }\n")
        .unwrap();
    let message = chain.lookup("r").unwrap();
    assert!(
        message.as_str().is_some_and(|m| m.contains("recursion")),
        "{message:?}"
    );
}

// Chains

#[test]
fn test_sigils() {
    assert_eq!(run("$count = 3\nr = globalvars.count\n", "r"), Value::Int(3));
    let source = "\
outer = {inner = {}}
outer.inner.climb = fn { @^name }
outer.name = 'o'
r = outer.inner.climb()
";
    assert_eq!(run(source, "r"), Value::str("o"));
}

#[test]
fn test_undefined_name_passes_through_unwrapped() {
    let err = run_err("x = 1\ny = nope\n");
    assert_eq!(err.kind(), Some(ExceptionKind::NameError));
    assert!(matches!(err, EvalError::Fault { .. }));
}

#[test]
fn test_indexing() {
    assert_eq!(run("r = [1, 2, 3][-1]\n", "r"), Value::Int(3));
    assert_eq!(run("r = 'hello'[1..3]\n", "r"), Value::str("el"));
    assert_eq!(run("r = (0..10)[2]\n", "r"), Value::Int(2));
    assert_eq!(run("r = {: 'k': 1 :}['k']\n", "r"), Value::Int(1));
    assert_eq!(run("t = {a = 1}\nr = t['a']\n", "r"), Value::Int(1));
    assert_eq!(
        run_err("r = [1][5]\n").kind(),
        Some(ExceptionKind::TypeError)
    );
    assert_eq!(
        run_err("r = {: :}['k']\n").kind(),
        Some(ExceptionKind::NameError)
    );
}

// Tables

#[test]
fn test_getter_and_setter_accessors() {
    let source = "\
t = {get_x = fn { 42 }, set_y = fn(v) { v * 2 }}
gx = t.x
t.y = 5
sy = t.y
";
    assert_eq!(run(source, "gx"), Value::Int(42));
    assert_eq!(run(source, "sy"), Value::Int(10));
}

#[test]
fn test_stored_slot_shadows_getter() {
    let source = "t = {get_x = fn { 1 }}\nt.x = 2\nr = t.x\n";
    assert_eq!(run(source, "r"), Value::Int(2));
}

#[test]
fn test_setter_inherited_from_metatable() {
    let source = "\
base = {set_v = fn(v) { v + 100 }}
t = {metatable = base}
t.v = 1
r = t.v
";
    assert_eq!(run(source, "r"), Value::Int(101));
}

#[test]
fn test_getter_receives_current() {
    let source = "t = {n = 7, get_double = fn { @n * 2 }}\nr = t.double\n";
    assert_eq!(run(source, "r"), Value::Int(14));
}

// Assignment

#[test]
fn test_compound_assignment_left_operand_is_current_value() {
    assert_eq!(run("x = 10\nx -= 3\n", "x"), Value::Int(7));
    assert_eq!(run("x = 'ab'\nx += 'c'\n", "x"), Value::str("abc"));
    assert_eq!(run("t = {n = 1}\nt.n *= 5\nr = t.n\n", "r"), Value::Int(5));
    assert_eq!(run("xs = [1, 2]\nxs[0] += 9\nr = xs[0]\n", "r"), Value::Int(10));
}

#[test]
fn test_compound_multi_assign_is_other_error() {
    assert_eq!(
        run_err("a = 1\nb = 2\na, b += 1, 2\n").kind(),
        Some(ExceptionKind::OtherError)
    );
}

#[test]
fn test_nested_destructuring() {
    let source = "a, (b, c) = 1, [2, 3]\n";
    assert_eq!(run(source, "a"), Value::Int(1));
    assert_eq!(run(source, "c"), Value::Int(3));
}

#[test]
fn test_destructuring_non_sequence_is_type_error() {
    assert_eq!(
        run_err("a, b = 5\n").kind(),
        Some(ExceptionKind::TypeError)
    );
}

#[test]
fn test_destructuring_huge_range_checks_length_first() {
    let source = "\
try { a, b = 0..9223372036854775807 } except TypeError as e { r = e.message }
";
    assert!(run(source, "r").as_str().is_some());
    assert_eq!(
        run_err("a, b = 0..9223372036854775807\n").kind(),
        Some(ExceptionKind::TypeError)
    );
}

#[test]
fn test_huge_repeat_is_catchable() {
    let source = "try { s = 'ab' * 9223372036854775807 } except OverflowError { s = 'caught' }\n";
    assert_eq!(run(source, "s"), Value::str("caught"));
}

#[test]
fn test_nested_mismatch_keeps_earlier_siblings() {
    let source = "\
try { a, (b, c) = 1, [2] } except TypeError { caught = true }
b = b except NameError else 'unassigned'
";
    assert_eq!(run(source, "caught"), Value::Bool(true));
    assert_eq!(run(source, "a"), Value::Int(1));
    assert_eq!(run(source, "b"), Value::str("unassigned"));
}

// Control flow

#[test]
fn test_while_and_times() {
    assert_eq!(run("n = 0\nwhile n < 5 { n += 1 }\n", "n"), Value::Int(5));
    assert_eq!(run("n = 0\ntimes 4 { n += 2 }\n", "n"), Value::Int(8));
    assert_eq!(run("n = 0\ntimes -1 { n += 1 }\n", "n"), Value::Int(0));
    assert_eq!(
        run_err("times 'x' { }\n").kind(),
        Some(ExceptionKind::TypeError)
    );
}

#[test]
fn test_break_depth_validation() {
    assert_eq!(
        run_err("while true { break 'x' }\n").kind(),
        Some(ExceptionKind::TypeError)
    );
    assert_eq!(
        run_err("while true { break -1 }\n").kind(),
        Some(ExceptionKind::TypeError)
    );
}

#[test]
fn test_break_zero_is_inert() {
    let source = "n = 0\ntimes 3 { break 0; n += 1 }\n";
    assert_eq!(run(source, "n"), Value::Int(3));
}

#[test]
fn test_stray_break_in_function_yields_none() {
    assert_eq!(run("f = fn { break; 1 }\nr = f()\n", "r"), Value::None);
}

#[test]
fn test_if_elif_else() {
    let source = "\
f = fn(x) {
    if x < 0 { 'neg' } elif x == 0 { 'zero' } else { 'pos' }
}
r = (f(-1), f(0), f(1))
";
    assert_eq!(
        run(source, "r"),
        Value::tuple(vec![Value::str("neg"), Value::str("zero"), Value::str("pos")])
    );
}

#[test]
fn test_one_line_if_and_try() {
    assert_eq!(run("r = 1 if false else 2\n", "r"), Value::Int(2));
    assert_eq!(run("r = 1 / 0 except ZeroDivisionError else -1\n", "r"), Value::Int(-1));
    assert_eq!(run("r = nope except NameError else 0\n", "r"), Value::Int(0));
}

// Exceptions

#[test]
fn test_internal_failure_caught_as_exception_object() {
    let source = "try { 1 / 0 } except ArithmeticError as e { k = type(e) }\n";
    assert_eq!(
        run(source, "k"),
        Value::ExceptionType(ExceptionKind::ZeroDivisionError)
    );
}

#[test]
fn test_raise_table_and_match_by_metatable() {
    let source = "\
MyError = {}
err = {metatable = MyError, code = 7}
try { raise err } except MyError as e { r = e.code }
";
    assert_eq!(run(source, "r"), Value::Int(7));
}

#[test]
fn test_bare_raise_reraises_handled_failure() {
    let source = "\
try {
    try { raise ValueError('inner') } except { raise }
} except ValueError as e { r = e.message }
";
    assert_eq!(run(source, "r"), Value::str("inner"));
}

#[test]
fn test_bare_raise_outside_handler() {
    assert_eq!(
        run_err("raise\n").kind(),
        Some(ExceptionKind::InterpreterError)
    );
}

#[test]
fn test_handlers_scan_in_order() {
    let source = "\
try { raise KeyError('k') } except IndexError { r = 1 } except LookupError { r = 2 } except { r = 3 }
";
    assert_eq!(run(source, "r"), Value::Int(2));
}

#[test]
fn test_assert() {
    assert_eq!(run("assert 1 == 1\nok = true\n", "ok"), Value::Bool(true));
    let source = "try { assert false } except AssertionError { r = 'caught' }\n";
    assert_eq!(run(source, "r"), Value::str("caught"));
}

// Top-level wrapping

#[test]
fn test_non_language_failure_is_positioned() {
    let err = run_err("x = 1\n\n  y = 1 / 0\n");
    let EvalError::Positioned { line, column, source } = err else {
        panic!("expected a positioned error");
    };
    assert_eq!(line, 3);
    assert!(column >= 3, "column {column}");
    assert_eq!(source.kind(), Some(ExceptionKind::ZeroDivisionError));
}

#[test]
fn test_raised_value_is_positioned() {
    let err = run_err("raise 5\n");
    assert_eq!(err.kind(), Some(ExceptionKind::InterpreterError));
    assert!(matches!(err, EvalError::Positioned { line: 1, .. }));
}

#[test]
fn test_language_errors_pass_through() {
    for (source, kind) in [
        ("x = nope\n", ExceptionKind::NameError),
        ("x = 1 + 'a'\n", ExceptionKind::TypeError),
        ("raise TypeError('t')\n", ExceptionKind::TypeError),
    ] {
        let err = run_err(source);
        assert_eq!(err.kind(), Some(kind), "{source}");
        assert!(!matches!(err, EvalError::Positioned { .. }), "{source}");
    }
}

#[test]
fn test_parse_error_is_reported_as_parse() {
    let result = interpreter().run_source("x = (1, \n");
    assert!(matches!(result, Err(LagoonError::Parse(_))));
}

#[test]
fn test_eval_source_expression() {
    let value = interpreter().eval_source("[x * x for x in 1..4]").unwrap();
    assert_eq!(value, ints(&[1, 4, 9]));
}
