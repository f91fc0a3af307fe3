//! Callables: closures, bound closures, host functions and builtin methods.

use std::rc::Rc;

use lagoon_ir::{CallableDef, ExprArena, Ident, SourceText};
use smallvec::SmallVec;

use super::Value;
use crate::environment::ScopeChain;
use crate::errors::{self, EvalError, EvalResult};
use crate::interpreter::Evaluator;

/// A parsed unit: the syntax tree of one program, `exec` string, `eval`
/// expression or interpolation fragment, with the source it came from.
///
/// Closures hold the unit they were defined in, so the tree lives as long
/// as any closure over it.
#[derive(Debug)]
pub struct CodeUnit {
    pub source: Rc<SourceText>,
    pub arena: ExprArena,
}

/// A closure created by a `fn` literal.
pub struct FunctionValue {
    pub unit: Rc<CodeUnit>,
    pub def: Rc<CallableDef>,
    /// `name = expr` defaults, evaluated once at definition.
    pub static_defaults: Vec<(Ident, Value)>,
    /// Scope chain the literal was evaluated in.
    pub chain: ScopeChain,
}

/// A closure bound to the value it was fetched from.
pub struct BoundFunction {
    pub func: Rc<FunctionValue>,
    pub receiver: Value,
}

/// Signature of host functions.
pub type NativeFn = fn(&mut Evaluator<'_>, Args) -> EvalResult;

pub struct NativeFunction {
    pub name: &'static str,
    pub func: NativeFn,
}

/// A builtin method looked up on a native value.
pub struct MethodValue {
    pub receiver: Value,
    pub name: Ident,
}

/// Evaluated call arguments.
#[derive(Clone, Default, Debug)]
pub struct Args {
    pub positional: SmallVec<[Value; 4]>,
    /// Named arguments in source order.
    pub named: Vec<(Ident, Value)>,
}

impl Args {
    pub fn new() -> Self {
        Args::default()
    }

    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Args {
            positional: values.into_iter().collect(),
            named: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_named(mut self, name: &str, value: Value) -> Self {
        self.named.push((Ident::from(name), value));
        self
    }

    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Removes and returns a named argument.
    pub fn take_named(&mut self, name: &str) -> Option<Value> {
        let index = self.named.iter().position(|(n, _)| &**n == name)?;
        Some(self.named.remove(index).1)
    }

    /// Checks the positional count is within `min..=max` and that no named
    /// arguments remain.
    pub fn check(&self, fn_name: &str, min: usize, max: usize) -> Result<(), EvalError> {
        if let Some((name, _)) = self.named.first() {
            return Err(errors::unexpected_keyword(fn_name, name));
        }
        let got = self.positional.len();
        if got < min || got > max {
            let expected = if min == max {
                min.to_string()
            } else if max == usize::MAX {
                format!("at least {min}")
            } else {
                format!("{min} to {max}")
            };
            return Err(errors::wrong_arg_count(fn_name, &expected, got));
        }
        Ok(())
    }

    /// Positional arguments, checked to be exactly `N`.
    pub fn exact<const N: usize>(self, fn_name: &str) -> Result<[Value; N], EvalError> {
        self.check(fn_name, N, N)?;
        let got = self.positional.len();
        <[Value; N]>::try_from(self.positional.into_vec())
            .map_err(|_| errors::wrong_arg_count(fn_name, &N.to_string(), got))
    }

    /// Positional arguments after checking the count is within `min..=max`.
    pub fn between(self, fn_name: &str, min: usize, max: usize) -> Result<Vec<Value>, EvalError> {
        self.check(fn_name, min, max)?;
        Ok(self.positional.into_vec())
    }
}
