#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_exception_hierarchy() {
    assert!(ExceptionKind::KeyError.is_subkind_of(ExceptionKind::LookupError));
    assert!(ExceptionKind::KeyError.is_subkind_of(ExceptionKind::Exception));
    assert!(ExceptionKind::ZeroDivisionError.is_subkind_of(ExceptionKind::ArithmeticError));
    assert!(!ExceptionKind::ValueError.is_subkind_of(ExceptionKind::LookupError));
    assert!(!ExceptionKind::Exception.is_subkind_of(ExceptionKind::TypeError));
}

#[test]
fn test_every_kind_descends_from_exception() {
    for kind in ExceptionKind::ALL {
        assert!(kind.is_subkind_of(ExceptionKind::Exception), "{kind}");
    }
}

#[test]
fn test_language_error_kinds() {
    let language: Vec<ExceptionKind> = ExceptionKind::ALL
        .into_iter()
        .filter(|k| k.is_language_error())
        .collect();
    assert_eq!(
        language,
        vec![
            ExceptionKind::NameError,
            ExceptionKind::TypeError,
            ExceptionKind::OtherError,
            ExceptionKind::InterpreterError,
        ]
    );
}

#[test]
fn test_fault_display_and_kind() {
    let err = undefined_name("x");
    assert_eq!(err.kind(), Some(ExceptionKind::NameError));
    assert_eq!(err.to_string(), "NameError: x is currently not defined");
    assert_eq!(err.message(), "x is currently not defined");
}

#[test]
fn test_raised_non_exception_has_no_kind() {
    let err = EvalError::Raised(Value::Int(3));
    assert_eq!(err.kind(), None);
    assert!(!err.is_language_error());
    assert_eq!(err.to_value(), Value::Int(3));
}

#[test]
fn test_raised_exception_kind() {
    let value = Value::exception(ExceptionValue::new(ExceptionKind::TypeError, "bad", Vec::new()));
    let err = EvalError::Raised(value.clone());
    assert_eq!(err.kind(), Some(ExceptionKind::TypeError));
    assert!(err.is_language_error());
    assert!(err.to_value().is_identical(&value));
}

#[test]
fn test_positioned_is_interpreter_error() {
    let err = EvalError::Positioned {
        line: 3,
        column: 7,
        source: Box::new(division_by_zero()),
    };
    assert_eq!(err.kind(), Some(ExceptionKind::InterpreterError));
    assert_eq!(err.to_string(), "InterpreterError: error at line 3, column 7");
    let Value::Exception(e) = err.to_value() else {
        panic!("expected an exception value");
    };
    assert_eq!(e.kind, ExceptionKind::InterpreterError);
    assert_eq!(&*e.message, "error at line 3, column 7");
}

#[test]
fn test_fault_to_value_keeps_message() {
    let Value::Exception(e) = value_error("nope").to_value() else {
        panic!("expected an exception value");
    };
    assert_eq!(e.kind, ExceptionKind::ValueError);
    assert_eq!(&*e.message, "nope");
}

#[test]
fn test_print_failure_is_other_error() {
    let err = print_failed("Broken pipe");
    assert_eq!(err.kind(), Some(ExceptionKind::OtherError));
    assert_eq!(err.message(), "cannot write output: Broken pipe");
}
