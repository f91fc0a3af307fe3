#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cmp::Ordering;

use pretty_assertions::assert_eq;

use super::*;

fn ints(items: &[i64]) -> Vec<Value> {
    items.iter().copied().map(Value::Int).collect()
}

fn key_set(items: &[i64]) -> ValueSet {
    items.iter().map(|n| Key::new(Value::Int(*n)).unwrap()).collect()
}

#[test]
fn test_truthiness() {
    let falsy = [
        Value::None,
        Value::Bool(false),
        Value::Int(0),
        Value::Float(0.0),
        Value::str(""),
        Value::bytes(Vec::new()),
        Value::list(Vec::new()),
        Value::tuple(Vec::new()),
        Value::dict(ValueMap::default()),
        Value::Range(RangeValue::new(3, 3)),
    ];
    for value in &falsy {
        assert!(!value.is_truthy(), "{value:?} should be falsy");
    }
    let truthy = [
        Value::Int(-1),
        Value::str("0"),
        Value::list(ints(&[0])),
        Value::table(Table::new()),
        Value::Type(BuiltinType::Int),
    ];
    for value in &truthy {
        assert!(value.is_truthy(), "{value:?} should be truthy");
    }
}

#[test]
fn test_numbers_compare_across_types() {
    assert!(Value::Int(1).equals(&Value::Float(1.0)));
    assert!(Value::Bool(true).equals(&Value::Int(1)));
    assert!(!Value::Int(1).equals(&Value::Float(1.5)));
    assert!(!Value::Float(f64::NAN).equals(&Value::Float(f64::NAN)));
    assert_eq!(
        Value::Int(2).compare(&Value::Float(2.5), "<").unwrap(),
        Some(Ordering::Less)
    );
    assert_eq!(
        Value::Float(f64::NAN).compare(&Value::Int(0), "<").unwrap(),
        None
    );
}

#[test]
fn test_containers_compare_structurally() {
    assert_eq!(Value::list(ints(&[1, 2])), Value::list(ints(&[1, 2])));
    assert_ne!(Value::list(ints(&[1, 2])), Value::tuple(ints(&[1, 2])));
    assert_eq!(Value::set(key_set(&[1, 2])), Value::frozen_set(key_set(&[2, 1])));
    assert_eq!(
        Value::list(ints(&[1, 2])).compare(&Value::list(ints(&[1, 3])), "<").unwrap(),
        Some(Ordering::Less)
    );
    assert_eq!(
        Value::tuple(ints(&[1])).compare(&Value::tuple(ints(&[1, 0])), "<").unwrap(),
        Some(Ordering::Less)
    );
}

#[test]
fn test_ordered_dict_equality_respects_order() {
    let mut ab = ValueMap::default();
    ab.insert(Key::new(Value::str("a")).unwrap(), Value::Int(1));
    ab.insert(Key::new(Value::str("b")).unwrap(), Value::Int(2));
    let mut ba = ValueMap::default();
    ba.insert(Key::new(Value::str("b")).unwrap(), Value::Int(2));
    ba.insert(Key::new(Value::str("a")).unwrap(), Value::Int(1));

    assert_eq!(Value::dict(ab.clone()), Value::dict(ba.clone()));
    assert_ne!(Value::ordered_dict(ab.clone()), Value::ordered_dict(ba));
    assert_eq!(Value::dict(ab.clone()), Value::ordered_dict(ab));
}

#[test]
fn test_tables_compare_by_identity() {
    let a = Value::table(Table::new());
    let b = Value::table(Table::new());
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert!(a.is_identical(&a.clone()));
}

#[test]
fn test_mismatched_ordering_is_type_error() {
    let err = Value::Int(1).compare(&Value::str("a"), "<").unwrap_err();
    assert_eq!(err.kind(), Some(ExceptionKind::TypeError));
}

#[test]
fn test_len() {
    assert_eq!(Value::str("héllo").len().unwrap(), 5);
    assert_eq!(Value::Range(RangeValue::with_step(0, 10, 2)).len().unwrap(), 5);
    assert_eq!(
        Value::Int(3).len().unwrap_err().kind(),
        Some(ExceptionKind::TypeError)
    );
}

#[test]
fn test_sized_items() {
    assert_eq!(
        Value::str("ab").sized_items(),
        Some(vec![Value::str("a"), Value::str("b")])
    );
    assert_eq!(Value::bytes(vec![7u8]).sized_items(), Some(ints(&[7])));
    assert!(Value::table(Table::new()).sized_items().is_none());
}

#[test]
fn test_keys_unify_equal_numbers() {
    let mut set = ValueSet::default();
    set.insert(Key::new(Value::Int(1)).unwrap());
    set.insert(Key::new(Value::Float(1.0)).unwrap());
    set.insert(Key::new(Value::Bool(true)).unwrap());
    assert_eq!(set.len(), 1);
    assert_eq!(
        Key::new(Value::Int(1)).unwrap().hash_code(),
        Key::new(Value::Float(1.0)).unwrap().hash_code()
    );
}

#[test]
fn test_mutable_containers_are_unhashable() {
    let err = Key::new(Value::list(Vec::new())).err().unwrap();
    assert_eq!(err.kind(), Some(ExceptionKind::TypeError));
    assert!(Key::new(Value::tuple(vec![Value::list(Vec::new())])).is_err());
    assert!(Key::new(Value::tuple(ints(&[1, 2]))).is_ok());
}

#[test]
fn test_display_and_repr() {
    assert_eq!(display::display(&Value::str("hi")), "hi");
    assert_eq!(display::repr(&Value::str("it's")), r"'it\'s'");
    assert_eq!(display::repr(&Value::Float(2.0)), "2.0");
    assert_eq!(display::repr(&Value::tuple(ints(&[1]))), "(1,)");
    assert_eq!(
        display::repr(&Value::list(vec![Value::None, Value::Bool(true)])),
        "[none, true]"
    );
    assert_eq!(display::repr(&Value::Range(RangeValue::new(0, 3))), "0..3");
    assert_eq!(display::format_float(f64::NEG_INFINITY), "-inf");
}

#[test]
fn test_exception_type_name_is_its_kind() {
    let e = Value::exception(ExceptionValue::new(ExceptionKind::KeyError, "k", Vec::new()));
    assert_eq!(e.type_name(), "KeyError");
    assert_eq!(e.builtin_type(), BuiltinType::Exception);
    assert_eq!(display::display(&e), "k");
}
