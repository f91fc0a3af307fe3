//! Calls.
//!
//! A closure call builds one namespace on top of the closure's captured
//! chain, filled in this order (later entries win):
//!
//! 1. static defaults, evaluated when the closure was created
//! 2. dynamic defaults, evaluated now in the defining chain
//! 3. positional arguments zipped with the parameter names
//! 4. named arguments
//! 5. `args`, the tuple of all positional arguments, and `current`
//!    (a named `current` argument, else the bound receiver, else none)

use std::cell::Cell;
use std::rc::Rc;

use lagoon_ir::{CallArg, ExprId, Ident, ParamDefault};
use tracing::debug;

use super::{Evaluator, Runtime};
use crate::builtins;
use crate::environment::Namespace;
use crate::errors::{self, EvalError, EvalResult};
use crate::methods;
use crate::value::{Args, FunctionValue, Value};

/// Decrements the call depth when a call returns, however it returns.
pub(crate) struct CallDepthGuard<'rt> {
    depth: &'rt Cell<usize>,
}

impl Drop for CallDepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

impl Runtime {
    /// Enters a call, failing once the configured depth is exceeded.
    pub(crate) fn enter_call(&self) -> Result<CallDepthGuard<'_>, EvalError> {
        let depth = self.call_depth.get();
        if depth >= self.max_call_depth {
            return Err(errors::recursion_limit_exceeded(self.max_call_depth));
        }
        self.call_depth.set(depth + 1);
        Ok(CallDepthGuard {
            depth: &self.call_depth,
        })
    }
}

impl Evaluator<'_> {
    /// `callee(args...)`. Arguments are evaluated in source order and
    /// sorted into the positional and named groups as they go.
    pub(super) fn eval_call(&mut self, callee: ExprId, args: &[CallArg]) -> EvalResult {
        let func = self.eval_expr(callee)?;
        let mut evaluated = Args::new();
        for arg in args {
            let value = self.eval_expr(arg.value)?;
            match &arg.name {
                Some(name) => evaluated.named.push((name.clone(), value)),
                None => evaluated.positional.push(value),
            }
        }
        self.call_value(&func, evaluated)
    }

    /// Calls any callable value.
    pub fn call_value(&mut self, func: &Value, args: Args) -> EvalResult {
        match func {
            Value::Function(f) => self.call_function(f, None, args),
            Value::Bound(bound) => self.call_function(&bound.func, Some(&bound.receiver), args),
            Value::Native(native) => {
                let rt = self.rt;
                let _guard = rt.enter_call()?;
                (native.func)(self, args)
            }
            Value::Method(method) => methods::call_method(self, &method.receiver, &method.name, args),
            Value::Type(ty) => builtins::construct(self, *ty, args),
            Value::ExceptionType(kind) => Ok(builtins::new_exception(*kind, args)),
            other => Err(errors::not_callable(other.type_name())),
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn call_function(
        &mut self,
        func: &Rc<FunctionValue>,
        receiver: Option<&Value>,
        args: Args,
    ) -> EvalResult {
        let rt = self.rt;
        let _guard = rt.enter_call()?;
        debug!(
            params = func.def.params.len(),
            positional = args.positional.len(),
            named = args.named.len(),
            "call"
        );

        let mut frame = Namespace::default();
        for (name, value) in &func.static_defaults {
            frame.insert(name.clone(), value.clone());
        }
        if func
            .def
            .params
            .iter()
            .any(|p| matches!(p.default, ParamDefault::Dynamic(_)))
        {
            let mut definer = self.for_unit(Rc::clone(&func.unit), func.chain.clone());
            for param in &func.def.params {
                if let ParamDefault::Dynamic(expr) = param.default {
                    frame.insert(param.name.clone(), definer.eval_expr(expr)?);
                }
            }
        }
        for (param, value) in func.def.params.iter().zip(&args.positional) {
            frame.insert(param.name.clone(), value.clone());
        }

        let Args { positional, named } = args;
        let mut current = receiver.cloned().unwrap_or(Value::None);
        for (name, value) in named {
            if &*name == "current" {
                current = value.clone();
            }
            frame.insert(name, value);
        }
        frame.insert(Ident::from("args"), Value::tuple(positional.into_vec()));
        frame.insert(Ident::from("current"), current);

        let mut callee = self.for_unit(Rc::clone(&func.unit), func.chain.with_frame(frame));
        let outcome = callee.exec_block(&func.def.body)?;
        Ok(outcome.into_call_result())
    }
}
