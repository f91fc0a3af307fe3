//! `try`/`except`, `raise`, `assert` and filter matching.

use std::rc::Rc;

use lagoon_ir::{Block, ExprId, Handler};

use super::{Evaluator, Runtime};
use crate::errors::{self, EvalError, EvalResult};
use crate::signal::Outcome;
use crate::value::{ExceptionValue, Table, Value};

/// Metatable hops followed when matching a table filter.
const MAX_FILTER_HOPS: usize = 256;

/// `value isa filter`, also the rule for `except` clauses.
///
/// - an exception type matches exception objects of that kind or a
///   descendant kind
/// - a builtin type matches values of that type (bools count as ints)
/// - a table matches itself and tables having it in their metatable chain
/// - a tuple matches if any element does
pub fn isa(value: &Value, filter: &Value) -> Result<bool, EvalError> {
    match filter {
        Value::ExceptionType(kind) => {
            Ok(matches!(value, Value::Exception(e) if e.kind.is_subkind_of(*kind)))
        }
        Value::Type(ty) => Ok(ty.is_instance(value)),
        Value::Table(table) => Ok(in_metatable_chain(value, table)),
        Value::Tuple(filters) => {
            for filter in filters.iter() {
                if isa(value, filter)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        other => Err(errors::invalid_filter(other.type_name())),
    }
}

fn in_metatable_chain(value: &Value, target: &Rc<Table>) -> bool {
    let Value::Table(table) = value else {
        return false;
    };
    let mut current = Rc::clone(table);
    for _ in 0..MAX_FILTER_HOPS {
        if Rc::ptr_eq(&current, target) {
            return true;
        }
        match current.metatable() {
            Some(Value::Table(meta)) => current = meta,
            _ => return false,
        }
    }
    false
}

/// The value carried by `raise value`. Raising an exception type raises a
/// fresh instance of it.
pub(crate) fn raise_value(value: Value) -> EvalError {
    match value {
        Value::ExceptionType(kind) => EvalError::Raised(Value::exception(ExceptionValue::new(
            kind,
            "",
            Vec::new(),
        ))),
        other => EvalError::Raised(other),
    }
}

/// Keeps a failure available to bare `raise` while its handler runs.
struct HandledGuard<'rt> {
    rt: &'rt Runtime,
}

impl Drop for HandledGuard<'_> {
    fn drop(&mut self) {
        self.rt.handled.borrow_mut().pop();
    }
}

impl Runtime {
    fn handling(&self, err: EvalError) -> HandledGuard<'_> {
        self.handled.borrow_mut().push(err);
        HandledGuard { rt: self }
    }
}

impl Evaluator<'_> {
    /// Runs `body`; on failure the first matching handler runs instead.
    /// Filters are evaluated only once a failure happened, in clause order.
    pub(super) fn exec_try(
        &mut self,
        body: &Block,
        handlers: &[Handler],
    ) -> Result<Outcome, EvalError> {
        let err = match self.exec_block(body) {
            Ok(outcome) => return Ok(outcome),
            Err(err) => err,
        };
        let caught = err.to_value();
        for handler in handlers {
            let matched = match handler.filter {
                None => true,
                Some(filter) => {
                    let filter = self.eval_expr(filter)?;
                    isa(&caught, &filter)?
                }
            };
            if matched {
                if let Some(name) = &handler.name {
                    self.chain.assign(name.clone(), caught);
                }
                let rt = self.rt;
                let _handling = rt.handling(err);
                return self.exec_block(&handler.body);
            }
        }
        Err(err)
    }

    /// `body except filter else fallback`
    pub(super) fn eval_try_else(
        &mut self,
        body: ExprId,
        filter: ExprId,
        fallback: ExprId,
    ) -> EvalResult {
        let err = match self.eval_expr(body) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        let filter = self.eval_expr(filter)?;
        if isa(&err.to_value(), &filter)? {
            let rt = self.rt;
            let _handling = rt.handling(err);
            self.eval_expr(fallback)
        } else {
            Err(err)
        }
    }

    /// The failure raised by `raise [value]`.
    pub(super) fn exec_raise(&mut self, value: Option<ExprId>) -> Result<EvalError, EvalError> {
        match value {
            Some(expr) => Ok(raise_value(self.eval_expr(expr)?)),
            None => self
                .rt
                .handled
                .borrow()
                .last()
                .cloned()
                .ok_or_else(errors::no_active_exception),
        }
    }

    pub(super) fn exec_assert(&mut self, value: Option<ExprId>) -> Result<(), EvalError> {
        match value {
            Some(expr) if self.eval_expr(expr)?.is_truthy() => Ok(()),
            _ => Err(errors::assertion_failed()),
        }
    }
}
