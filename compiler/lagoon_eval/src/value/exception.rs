//! Exception objects.

use std::rc::Rc;

use super::Value;
use crate::errors::ExceptionKind;

/// An instance of a builtin exception type, e.g. the result of
/// `TypeError("bad")` or a caught internal failure.
#[derive(Debug)]
pub struct ExceptionValue {
    pub kind: ExceptionKind,
    pub message: Rc<str>,
    /// Arguments the exception was created with.
    pub args: Vec<Value>,
}

impl ExceptionValue {
    pub fn new(kind: ExceptionKind, message: impl Into<Rc<str>>, args: Vec<Value>) -> Self {
        ExceptionValue {
            kind,
            message: message.into(),
            args,
        }
    }
}
