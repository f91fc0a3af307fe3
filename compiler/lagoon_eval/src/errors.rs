//! Evaluation errors and their constructors.
//!
//! Internal failures carry an [`ExceptionKind`] and a message; values thrown
//! with `raise` travel as [`EvalError::Raised`]. All constructors live here
//! so call sites stay short and messages stay consistent.

use std::fmt;

use thiserror::Error;

use crate::value::{display, ExceptionValue, Value};

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Built-in exception kinds, bound by name in the builtin namespace.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    Exception,
    NameError,
    TypeError,
    OtherError,
    InterpreterError,
    ValueError,
    LookupError,
    KeyError,
    IndexError,
    ArithmeticError,
    ZeroDivisionError,
    OverflowError,
    AssertionError,
    StopIteration,
    RuntimeError,
}

impl ExceptionKind {
    pub const ALL: [ExceptionKind; 15] = [
        Self::Exception,
        Self::NameError,
        Self::TypeError,
        Self::OtherError,
        Self::InterpreterError,
        Self::ValueError,
        Self::LookupError,
        Self::KeyError,
        Self::IndexError,
        Self::ArithmeticError,
        Self::ZeroDivisionError,
        Self::OverflowError,
        Self::AssertionError,
        Self::StopIteration,
        Self::RuntimeError,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Exception => "Exception",
            Self::NameError => "NameError",
            Self::TypeError => "TypeError",
            Self::OtherError => "OtherError",
            Self::InterpreterError => "InterpreterError",
            Self::ValueError => "ValueError",
            Self::LookupError => "LookupError",
            Self::KeyError => "KeyError",
            Self::IndexError => "IndexError",
            Self::ArithmeticError => "ArithmeticError",
            Self::ZeroDivisionError => "ZeroDivisionError",
            Self::OverflowError => "OverflowError",
            Self::AssertionError => "AssertionError",
            Self::StopIteration => "StopIteration",
            Self::RuntimeError => "RuntimeError",
        }
    }

    pub const fn parent(self) -> Option<ExceptionKind> {
        match self {
            Self::Exception => None,
            Self::KeyError | Self::IndexError => Some(Self::LookupError),
            Self::ZeroDivisionError | Self::OverflowError => Some(Self::ArithmeticError),
            _ => Some(Self::Exception),
        }
    }

    /// `self` is `ancestor` or one of its descendants.
    pub fn is_subkind_of(self, ancestor: ExceptionKind) -> bool {
        let mut kind = Some(self);
        while let Some(k) = kind {
            if k == ancestor {
                return true;
            }
            kind = k.parent();
        }
        false
    }

    /// Kinds that reach the host unwrapped from a program run.
    pub const fn is_language_error(self) -> bool {
        matches!(
            self,
            Self::NameError | Self::TypeError | Self::OtherError | Self::InterpreterError
        )
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed evaluation.
#[derive(Clone, Debug, Error)]
pub enum EvalError {
    /// Failure detected by the interpreter itself.
    #[error("{kind}: {message}")]
    Fault { kind: ExceptionKind, message: String },

    /// A value thrown by `raise`.
    #[error("{}", display::raised(.0))]
    Raised(Value),

    /// A program failure wrapped with the position of the failing node.
    #[error("InterpreterError: error at line {line}, column {column}")]
    Positioned {
        line: u32,
        column: u32,
        #[source]
        source: Box<EvalError>,
    },
}

impl EvalError {
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        EvalError::Fault {
            kind,
            message: message.into(),
        }
    }

    /// Exception kind, if the failure has one. Raised non-exception values
    /// (tables, strings, ...) have none.
    pub fn kind(&self) -> Option<ExceptionKind> {
        match self {
            EvalError::Fault { kind, .. } => Some(*kind),
            EvalError::Raised(Value::Exception(e)) => Some(e.kind),
            EvalError::Raised(_) => None,
            EvalError::Positioned { .. } => Some(ExceptionKind::InterpreterError),
        }
    }

    pub fn is_language_error(&self) -> bool {
        self.kind().is_some_and(ExceptionKind::is_language_error)
    }

    /// The value a handler binds with `except ... as name`.
    pub fn to_value(&self) -> Value {
        match self {
            EvalError::Raised(value) => value.clone(),
            EvalError::Fault { kind, message } => {
                Value::exception(ExceptionValue::new(*kind, message.as_str(), Vec::new()))
            }
            EvalError::Positioned { .. } => Value::exception(ExceptionValue::new(
                ExceptionKind::InterpreterError,
                self.to_string().trim_start_matches("InterpreterError: "),
                Vec::new(),
            )),
        }
    }

    /// Message without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            EvalError::Fault { message, .. } => message.clone(),
            EvalError::Raised(value) => display::raised(value),
            EvalError::Positioned { line, column, .. } => {
                format!("error at line {line}, column {column}")
            }
        }
    }
}

// Name resolution

#[cold]
pub fn undefined_name(name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::NameError,
        format!("{name} is currently not defined"),
    )
}

#[cold]
pub fn attribute_not_found(type_name: &str, name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::NameError,
        format!("'{type_name}' object has no attribute '{name}'"),
    )
}

#[cold]
pub fn key_not_found(key: &Value) -> EvalError {
    EvalError::new(
        ExceptionKind::NameError,
        format!("key not found: {}", display::repr(key)),
    )
}

#[cold]
pub fn module_not_found(name: &str) -> EvalError {
    EvalError::new(ExceptionKind::NameError, format!("no module named '{name}'"))
}

#[cold]
pub fn numbered_arg_outside_function() -> EvalError {
    EvalError::new(
        ExceptionKind::OtherError,
        "Numbered argument symbol must be within block",
    )
}

#[cold]
pub fn numbered_arg_missing() -> EvalError {
    EvalError::new(ExceptionKind::TypeError, "Numbered argument not satisfied")
}

// Access

#[cold]
pub fn index_out_of_range() -> EvalError {
    EvalError::new(ExceptionKind::TypeError, "index out of range")
}

#[cold]
pub fn not_subscriptable(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("'{type_name}' object is not subscriptable"),
    )
}

#[cold]
pub fn invalid_index(type_name: &str, key_type: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{type_name} indices must be int or range, not {key_type}"),
    )
}

#[cold]
pub fn item_assignment_unsupported(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("'{type_name}' object does not support item assignment"),
    )
}

#[cold]
pub fn attribute_assignment_unsupported(type_name: &str, name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("cannot set attribute '{name}' on '{type_name}' object"),
    )
}

#[cold]
pub fn table_key_not_str(key_type: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("table keys must be str, not {key_type}"),
    )
}

#[cold]
pub fn metatable_chain_too_deep() -> EvalError {
    EvalError::new(
        ExceptionKind::RuntimeError,
        "metatable chain too deep while looking up attribute",
    )
}

// Calls

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("'{type_name}' object is not callable"),
    )
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: &str, got: usize) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{name}() takes {expected} argument(s) but {got} were given"),
    )
}

#[cold]
pub fn wrong_arg_type(name: &str, expected: &str, got: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{name}() expects {expected}, not {got}"),
    )
}

#[cold]
pub fn unexpected_keyword(name: &str, keyword: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("{name}() got an unexpected keyword argument '{keyword}'"),
    )
}

#[cold]
pub fn cannot_construct(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("cannot create '{type_name}' instances"),
    )
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::new(
        ExceptionKind::RuntimeError,
        format!("maximum recursion depth exceeded ({limit})"),
    )
}

// Iteration and sequences

#[cold]
pub fn not_iterable(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("'{type_name}' object is not iterable"),
    )
}

#[cold]
pub fn no_len(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("object of type '{type_name}' has no len()"),
    )
}

#[cold]
pub fn unhashable(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("unhashable type: '{type_name}'"),
    )
}

#[cold]
pub fn generator_already_running() -> EvalError {
    EvalError::new(ExceptionKind::ValueError, "generator already executing")
}

#[cold]
pub fn stop_iteration() -> EvalError {
    EvalError::new(ExceptionKind::StopIteration, "iteration exhausted")
}

#[cold]
pub fn mapping_item_not_pair() -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        "mapping items must be key/value pairs",
    )
}

#[cold]
pub fn range_bound_not_int(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("range bounds must be int, not {type_name}"),
    )
}

#[cold]
pub fn range_step_zero() -> EvalError {
    EvalError::new(ExceptionKind::ValueError, "range step must not be zero")
}

// Assignment

#[cold]
pub fn destructure_not_sequence() -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        "Cannot multiple assign: value must be sequence",
    )
}

#[cold]
pub fn destructure_length_mismatch(expected: usize, got: usize) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("Cannot multiple assign: length mismatch ({expected} targets, {got} values)"),
    )
}

#[cold]
pub fn compound_multi_assign() -> EvalError {
    EvalError::new(
        ExceptionKind::OtherError,
        "combined assign operator cannot be used for multiple assignment",
    )
}

// Control flow

#[cold]
pub fn times_not_int() -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        "Number of times to repeat must be int",
    )
}

#[cold]
pub fn break_depth_not_int() -> EvalError {
    EvalError::new(ExceptionKind::TypeError, "Depth must be int")
}

#[cold]
pub fn break_depth_negative() -> EvalError {
    EvalError::new(ExceptionKind::TypeError, "Depth must not be negative")
}

#[cold]
pub fn assertion_failed() -> EvalError {
    EvalError::new(ExceptionKind::AssertionError, "assertion failed")
}

#[cold]
pub fn no_active_exception() -> EvalError {
    EvalError::new(ExceptionKind::RuntimeError, "no active exception to re-raise")
}

#[cold]
pub fn invalid_filter(type_name: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!(
            "filter must be an exception type, a type, a table or a tuple of those, not {type_name}"
        ),
    )
}

// Operators

#[cold]
pub fn unsupported_binary(op: &str, left: &str, right: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("unsupported operand types for {op}: '{left}' and '{right}'"),
    )
}

#[cold]
pub fn unsupported_unary(op: &str, operand: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("bad operand type for unary {op}: '{operand}'"),
    )
}

#[cold]
pub fn unsupported_membership(container: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        format!("argument of type '{container}' does not support 'in'"),
    )
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::new(ExceptionKind::ZeroDivisionError, "division by zero")
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::new(ExceptionKind::ZeroDivisionError, "modulo by zero")
}

#[cold]
pub fn integer_overflow(op: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::OverflowError,
        format!("integer overflow in `{op}`"),
    )
}

// Strings

#[cold]
pub fn pattern_as_bytes() -> EvalError {
    EvalError::new(
        ExceptionKind::TypeError,
        "a string literal cannot be both a pattern (~) and bytes (b)",
    )
}

#[cold]
pub fn invalid_pattern(reason: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::ValueError,
        format!("invalid pattern: {reason}"),
    )
}

#[cold]
pub fn value_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ExceptionKind::ValueError, message)
}

// Host entry points

#[cold]
pub fn syntax_error(origin: &str, line: u32, column: u32, message: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::OtherError,
        format!("syntax error in {origin} at line {line}, column {column}: {message}"),
    )
}

#[cold]
pub fn load_failed(path: &str, reason: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::OtherError,
        format!("cannot load {path}: {reason}"),
    )
}

#[cold]
pub fn print_failed(reason: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::OtherError,
        format!("cannot write output: {reason}"),
    )
}

#[cfg(test)]
mod tests;
