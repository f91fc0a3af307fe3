#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::errors::ExceptionKind;
use crate::value::{ValueMap, ValueSet};
use crate::interpreter::Interpreter;
use crate::print_handler::silent_handler;
use crate::LagoonError;

fn run(source: &str, name: &str) -> Value {
    let chain = Interpreter::builder()
        .print_handler(silent_handler())
        .build()
        .run_source(source)
        .unwrap();
    chain.lookup(name).unwrap()
}

fn run_kind(source: &str) -> Option<ExceptionKind> {
    let result = Interpreter::builder()
        .print_handler(silent_handler())
        .build()
        .run_source(source);
    match result {
        Err(LagoonError::Eval(err)) => err.kind(),
        _ => None,
    }
}

fn strs(items: &[&str]) -> Value {
    Value::list(items.iter().map(|s| Value::str(*s)).collect())
}

#[test]
fn test_builtin_methods_sorted() {
    for pair in BUILTIN_METHODS.windows(2) {
        assert!(pair[0] < pair[1], "{:?} is not before {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_has_method_by_receiver_kind() {
    let list = Value::list(Vec::new());
    assert!(has_method(&list, "append"));
    assert!(!has_method(&list, "add"));
    assert!(has_method(&Value::ordered_dict(ValueMap::default()), "items"));
    assert!(!has_method(&Value::frozen_set(ValueSet::default()), "add"));
    assert!(!has_method(&Value::Int(1), "append"));
}

#[test]
fn test_list_mutation() {
    let xs = run(
        "xs = [3, 1]\nxs.append(2)\nxs.extend((5, 4))\nxs.remove(5)\nxs.insert(0, 9)\n",
        "xs",
    );
    assert_eq!(
        xs,
        Value::list(vec![
            Value::Int(9),
            Value::Int(3),
            Value::Int(1),
            Value::Int(2),
            Value::Int(4)
        ])
    );
}

#[test]
fn test_list_sort_with_key_and_reverse() {
    let xs = run(
        "xs = ['bbb', 'a', 'cc']\nxs.sort(key = len, reverse = true)\n",
        "xs",
    );
    assert_eq!(xs, strs(&["bbb", "cc", "a"]));
}

#[test]
fn test_sort_mixed_types_is_type_error() {
    assert_eq!(run_kind("xs = [1, 'a']\nxs.sort()\n"), Some(ExceptionKind::TypeError));
}

#[test]
fn test_list_pop_and_index() {
    let popped = run("xs = [1, 2, 3]\np = xs.pop() + xs.pop(0)\n", "p");
    assert_eq!(popped, Value::Int(4));
    assert_eq!(
        run_kind("xs = [1]\nxs.index(5)\n"),
        Some(ExceptionKind::InterpreterError)
    );
}

#[test]
fn test_str_methods() {
    assert_eq!(run("s = ' a b '.strip().split(' ')\n", "s"), strs(&["a", "b"]));
    assert_eq!(run("s = '-'.join(['x', 'y'])\n", "s"), Value::str("x-y"));
    assert_eq!(run("s = 'héllo'.find('l')\n", "s"), Value::Int(2));
    assert_eq!(run("s = 'abc'.upper()\n", "s"), Value::str("ABC"));
}

#[test]
fn test_dict_methods() {
    let v = run(
        "d = {: 'a': 1 :}\nd.update([('b', 2)], c = 3)\nv = d.get('z', 0) + d.pop('a')\n",
        "v",
    );
    assert_eq!(v, Value::Int(1));
    let keys = run("d = {: 'a': 1, 'b': 2 :}\nk = d.keys()\n", "k");
    assert_eq!(keys, strs(&["a", "b"]));
}

#[test]
fn test_set_algebra_keeps_receiver_type() {
    let u = run("u = (| 1, 2 |).union([3])\n", "u");
    assert!(matches!(u, Value::FrozenSet(_)));
    assert_eq!(u.len().ok(), Some(3));
}

#[test]
fn test_pattern_sub_uses_group_references() {
    let s = run(r#"s = '(\w+)@(\w+)'~.sub('$2 at $1', 'me@home')"#, "s");
    assert_eq!(s, Value::str("home at me"));
}

#[test]
fn test_generator_next() {
    let v = run("g = (x * 2 for x in [1, 2])\nv = (g.next(), g.next(), g.next(0))\n", "v");
    assert_eq!(
        v,
        Value::tuple(vec![Value::Int(2), Value::Int(4), Value::Int(0)])
    );
}
