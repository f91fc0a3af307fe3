//! Control-flow signals.
//!
//! Statements and blocks produce an [`Outcome`]: either a plain value or a
//! [`Signal`] that unwinds enclosing blocks and loops. Signals are ordinary
//! return values, not errors.

use crate::value::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    /// Ends the rest of the block it appears in.
    Continue,
    /// Unwinds this many enclosing loops. A depth of zero is spent and no
    /// longer stops anything.
    Break(u64),
    /// Unwinds to the enclosing call, which yields the value.
    Return(Value),
}

impl Signal {
    /// Whether the signal still stops the statements after it.
    pub fn is_active(&self) -> bool {
        match self {
            Signal::Continue | Signal::Return(_) => true,
            Signal::Break(depth) => *depth > 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Value(Value),
    Signal(Signal),
}

impl Outcome {
    pub const NONE: Outcome = Outcome::Value(Value::None);

    /// The result seen by a caller: a `return` payload or the last value.
    /// Stray `continue`/`break` signals yield none.
    pub fn into_call_result(self) -> Value {
        match self {
            Outcome::Value(value) | Outcome::Signal(Signal::Return(value)) => value,
            Outcome::Signal(Signal::Continue | Signal::Break(_)) => Value::None,
        }
    }

    pub fn active_signal(&self) -> Option<&Signal> {
        match self {
            Outcome::Signal(signal) if signal.is_active() => Some(signal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spent_break_is_inactive() {
        assert!(Signal::Break(1).is_active());
        assert!(!Signal::Break(0).is_active());
        assert!(Signal::Return(Value::None).is_active());
    }

    #[test]
    fn test_call_result_unwraps_return() {
        let outcome = Outcome::Signal(Signal::Return(Value::Int(3)));
        assert_eq!(outcome.into_call_result(), Value::Int(3));
        assert_eq!(
            Outcome::Signal(Signal::Break(2)).into_call_result(),
            Value::None
        );
    }
}
