#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use crate::errors::ExceptionKind;
use crate::print_handler::{buffer_handler, silent_handler};
use crate::value::{BuiltinType, Value};
use crate::{Interpreter, LagoonError};

fn run(source: &str, name: &str) -> Value {
    let interp = Interpreter::builder().print_handler(silent_handler()).build();
    let chain = interp.run_source(source).unwrap();
    chain
        .lookup(name)
        .unwrap_or_else(|| panic!("{name} is not bound"))
}

fn run_kind(source: &str) -> Option<ExceptionKind> {
    let interp = Interpreter::builder().print_handler(silent_handler()).build();
    match interp.run_source(source) {
        Err(err) => err.kind(),
        Ok(_) => panic!("expected {source:?} to fail"),
    }
}

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::Int).collect())
}

#[test]
fn test_print_separators() {
    let output = buffer_handler();
    let interp = Interpreter::builder().print_handler(output.clone()).build();
    interp
        .run_source("print(1, 'a', none)\nprint(1, 2, sep = '-', end = '!')\n")
        .unwrap();
    assert_eq!(output.get_output(), "1 a none\n1-2!");
}

#[test]
fn test_constructors() {
    assert_eq!(run("r = Int(' 1_000 ')\n", "r"), Value::Int(1000));
    assert_eq!(run("r = Int(2.9)\n", "r"), Value::Int(2));
    assert_eq!(run("r = Float('2.5')\n", "r"), Value::Float(2.5));
    assert_eq!(run("r = Str(12)\n", "r"), Value::str("12"));
    assert_eq!(run("r = bool([])\n", "r"), Value::Bool(false));
    assert_eq!(run("r = List(0..3)\n", "r"), ints(&[0, 1, 2]));
    assert_eq!(run("r = len(Set([1, 1, 2]))\n", "r"), Value::Int(2));
    assert_eq!(run("r = Dict(a = 1)['a']\n", "r"), Value::Int(1));
    assert_eq!(run("r = Table(x = 3).x\n", "r"), Value::Int(3));
    assert_eq!(run("r = Bytes([104, 105]) == Bytes('hi')\n", "r"), Value::Bool(true));
    assert_eq!(run_kind("r = Int('x')\n"), Some(ExceptionKind::InterpreterError));
    assert_eq!(run_kind("r = Bytes([300])\n"), Some(ExceptionKind::InterpreterError));
}

#[test]
fn test_failed_conversion_is_catchable_value_error() {
    let source = "r = Int('x') except ValueError else -1\n";
    assert_eq!(run(source, "r"), Value::Int(-1));
}

#[test]
fn test_len_and_range() {
    assert_eq!(run("r = len('héllo')\n", "r"), Value::Int(5));
    assert_eq!(run("r = len({a = 1, b = 2})\n", "r"), Value::Int(2));
    assert_eq!(run("r = List(range(5, 0, -2))\n", "r"), ints(&[5, 3, 1]));
    assert_eq!(run_kind("r = range(0, 5, 0)\n"), Some(ExceptionKind::InterpreterError));
    assert_eq!(run_kind("r = range('a')\n"), Some(ExceptionKind::TypeError));
}

#[test]
fn test_iteration_helpers() {
    assert_eq!(
        run("r = sorted([3, 1, 2], reverse = true)\n", "r"),
        ints(&[3, 2, 1])
    );
    assert_eq!(
        run("r = sorted(['bb', 'a', 'ccc'], key = len)\n", "r"),
        Value::list(vec![Value::str("a"), Value::str("bb"), Value::str("ccc")])
    );
    assert_eq!(run("r = List(reversed((1, 2)))\n", "r"), ints(&[2, 1]));
    assert_eq!(run("r = sum([1, 2, 3], 10)\n", "r"), Value::Int(16));
    assert_eq!(run("r = min([4, 2, 8])\n", "r"), Value::Int(2));
    assert_eq!(run("r = max(4, 9, 2)\n", "r"), Value::Int(9));
    assert_eq!(run("r = max([], default = 0)\n", "r"), Value::Int(0));
    assert_eq!(
        run("r = List(enumerate('ab', start = 1))\n", "r"),
        Value::list(vec![
            Value::tuple(vec![Value::Int(1), Value::str("a")]),
            Value::tuple(vec![Value::Int(2), Value::str("b")]),
        ])
    );
    assert_eq!(
        run("r = List(zip([1, 2, 3], 'ab'))\n", "r"),
        Value::list(vec![
            Value::tuple(vec![Value::Int(1), Value::str("a")]),
            Value::tuple(vec![Value::Int(2), Value::str("b")]),
        ])
    );
    assert_eq!(
        run("r = List(map(fn(x) { x * 10 }, filter(fn(x) { x % 2 }, 1..6)))\n", "r"),
        ints(&[10, 30, 50])
    );
    assert_eq!(
        run("r = (all([1, true]), any([0, none]))\n", "r"),
        Value::tuple(vec![Value::Bool(true), Value::Bool(false)])
    );
}

#[test]
fn test_empty_min_is_value_error() {
    let source = "try { min([]) } except ValueError as e { r = e.message }\n";
    assert_eq!(run(source, "r"), Value::str("min() arg is an empty sequence"));
}

#[test]
fn test_next_and_iter() {
    let source = "\
g = iter([1, 2])
a = next(g)
b = next(g)
c = next(g, 'done')
";
    assert_eq!(run(source, "a"), Value::Int(1));
    assert_eq!(run(source, "b"), Value::Int(2));
    assert_eq!(run(source, "c"), Value::str("done"));
    let exhausted = "g = iter([])\nr = next(g) except StopIteration else 'stop'\n";
    assert_eq!(run(exhausted, "r"), Value::str("stop"));
}

#[test]
fn test_numeric_helpers() {
    assert_eq!(run("r = abs(-3)\n", "r"), Value::Int(3));
    assert_eq!(run("r = round(2.5)\n", "r"), Value::Int(2));
    assert_eq!(run("r = round(3.5)\n", "r"), Value::Int(4));
    assert_eq!(
        run("r = divmod(-7, 2)\n", "r"),
        Value::tuple(vec![Value::Int(-4), Value::Int(1)])
    );
}

#[test]
fn test_type_and_isinstance() {
    assert_eq!(run("r = type(1)\n", "r"), Value::Type(BuiltinType::Int));
    assert_eq!(run("r = isinstance('a', Str)\n", "r"), Value::Bool(true));
    assert_eq!(
        run("r = isinstance(KeyError('k'), LookupError)\n", "r"),
        Value::Bool(true)
    );
    let source = "Base = {}\nobj = {metatable = Base}\nr = isinstance(obj, Base)\n";
    assert_eq!(run(source, "r"), Value::Bool(true));
}

#[test]
fn test_attribute_helpers() {
    let source = "\
t = {a = 1}
setattr(t, 'b', 2)
has = (hasattr(t, 'a'), hasattr(t, 'z'))
missing = getattr(t, 'z', 'fallback')
b = getattr(t, 'b')
delattr(t, 'a')
gone = hasattr(t, 'a')
";
    assert_eq!(
        run(source, "has"),
        Value::tuple(vec![Value::Bool(true), Value::Bool(false)])
    );
    assert_eq!(run(source, "missing"), Value::str("fallback"));
    assert_eq!(run(source, "b"), Value::Int(2));
    assert_eq!(run(source, "gone"), Value::Bool(false));
}

#[test]
fn test_repr_and_hash() {
    assert_eq!(run("r = repr('x')\n", "r"), Value::str("'x'"));
    assert_eq!(run("r = hash(1) == hash(1.0)\n", "r"), Value::Bool(true));
    assert_eq!(run_kind("r = hash([])\n"), Some(ExceptionKind::TypeError));
}

#[test]
fn test_import_host_modules() {
    assert_eq!(run("m = import('math')\nr = m.floor(2.7)\n", "r"), Value::Int(2));
    assert_eq!(run("importall('op')\nr = add(2, 3)\n", "r"), Value::Int(5));
    assert_eq!(run_kind("import('nope')\n"), Some(ExceptionKind::NameError));
}

#[test]
fn test_exec_and_eval_use_current_scope() {
    let source = "\
base = 4
f = fn {
    local = 2
    exec('made = local * base')
    eval('made + 1')
}
r = f()
";
    assert_eq!(run(source, "r"), Value::Int(9));
    assert_eq!(run_kind("exec('x = (')\n"), Some(ExceptionKind::OtherError));
}

#[test]
fn test_interpreter_module() {
    let source = "r = __interpreter__.eval('1 + 1')\n";
    assert_eq!(run(source, "r"), Value::Int(2));
}

#[test]
fn test_load_relative_to_calling_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("lib")).unwrap();
    std::fs::write(
        dir.path().join("lib").join("shapes.lg"),
        "side = 3\narea = fn { side * side }\n",
    )
    .unwrap();
    let main = dir.path().join("main.lg");
    std::fs::write(
        &main,
        "shapes = load('lib/shapes.lg')\nr = shapes.area()\nloadall('./lib/../lib/shapes.lg')\ns = side\n",
    )
    .unwrap();

    let interp = Interpreter::builder().print_handler(silent_handler()).build();
    let chain = interp.run_file(&main).unwrap();
    assert_eq!(chain.lookup("r"), Some(Value::Int(9)));
    assert_eq!(chain.lookup("s"), Some(Value::Int(3)));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("main.lg");
    std::fs::write(&main, "load('absent.lg')\n").unwrap();
    let interp = Interpreter::builder().print_handler(silent_handler()).build();
    let err = interp.run_file(&main).unwrap_err();
    assert!(matches!(err, LagoonError::Eval(_)));
    assert_eq!(err.kind(), Some(ExceptionKind::OtherError));
}

#[test]
fn test_lagoonfile_binding() {
    let interp = Interpreter::builder()
        .print_handler(silent_handler())
        .file_path("scripts/demo.lg")
        .build();
    let chain = interp.run_source("r = __lagoonfile__\n").unwrap();
    assert_eq!(chain.lookup("r"), Some(Value::str("scripts/demo.lg")));
}
