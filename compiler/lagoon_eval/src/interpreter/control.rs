//! Blocks, loops and control-flow signals.
//!
//! A block stops at the first statement producing an active signal and
//! yields it; otherwise it yields its last statement's value. `continue`
//! ends only the block it appears in. A loop that receives `Break(n)` with
//! `n > 0` stops and yields `Break(n - 1)`, so `break n` unwinds exactly
//! `n` loops; the spent `Break(0)` is inert in enclosing blocks. `Return`
//! passes through every loop and is unwrapped at the call boundary.

use lagoon_ir::{Block, ExprId, Target};

use super::Evaluator;
use crate::errors::{self, EvalError};
use crate::signal::{Outcome, Signal};
use crate::value::Value;

impl Evaluator<'_> {
    pub fn exec_block(&mut self, block: &Block) -> Result<Outcome, EvalError> {
        let mut last = Outcome::NONE;
        for &stmt in &block.stmts {
            let outcome = self.exec_stmt(stmt)?;
            if matches!(outcome, Outcome::Signal(Signal::Continue)) {
                return Ok(Outcome::NONE);
            }
            if outcome.active_signal().is_some() {
                return Ok(outcome);
            }
            last = outcome;
        }
        Ok(last)
    }

    pub(super) fn exec_while(&mut self, cond: ExprId, body: &Block) -> Result<Outcome, EvalError> {
        while self.eval_expr(cond)?.is_truthy() {
            let outcome = self.exec_block(body)?;
            if let Some(exit) = loop_exit(outcome) {
                return Ok(exit);
            }
        }
        Ok(Outcome::NONE)
    }

    pub(super) fn exec_for(
        &mut self,
        target: &Target,
        iter: ExprId,
        body: &Block,
    ) -> Result<Outcome, EvalError> {
        let iterable = self.eval_expr(iter)?;
        let mut items = self.iterate(&iterable)?;
        while let Some(item) = items.next(self)? {
            self.assign_target(target, item)?;
            let outcome = self.exec_block(body)?;
            if let Some(exit) = loop_exit(outcome) {
                return Ok(exit);
            }
        }
        Ok(Outcome::NONE)
    }

    pub(super) fn exec_times(&mut self, count: ExprId, body: &Block) -> Result<Outcome, EvalError> {
        let count = match self.eval_expr(count)? {
            Value::Int(n) => n,
            Value::Bool(b) => i64::from(b),
            _ => return Err(errors::times_not_int()),
        };
        for _ in 0..count.max(0) {
            let outcome = self.exec_block(body)?;
            if let Some(exit) = loop_exit(outcome) {
                return Ok(exit);
            }
        }
        Ok(Outcome::NONE)
    }

    pub(super) fn exec_break(&mut self, depth: Option<ExprId>) -> Result<Outcome, EvalError> {
        let depth = match depth {
            None => 1,
            Some(expr) => match self.eval_expr(expr)? {
                Value::Int(n) => u64::try_from(n).map_err(|_| errors::break_depth_negative())?,
                Value::Bool(b) => u64::from(b),
                _ => return Err(errors::break_depth_not_int()),
            },
        };
        Ok(Outcome::Signal(Signal::Break(depth)))
    }
}

/// What a loop does with its body's outcome: `Some` stops the loop.
fn loop_exit(outcome: Outcome) -> Option<Outcome> {
    match outcome {
        Outcome::Signal(Signal::Break(depth)) if depth > 0 => {
            Some(Outcome::Signal(Signal::Break(depth - 1)))
        }
        Outcome::Signal(Signal::Return(value)) => Some(Outcome::Signal(Signal::Return(value))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_exit_decrements_break() {
        assert_eq!(
            loop_exit(Outcome::Signal(Signal::Break(2))),
            Some(Outcome::Signal(Signal::Break(1)))
        );
        assert_eq!(loop_exit(Outcome::Signal(Signal::Break(0))), None);
        assert_eq!(loop_exit(Outcome::NONE), None);
    }

    #[test]
    fn test_return_passes_through_loops() {
        let ret = Outcome::Signal(Signal::Return(Value::Int(1)));
        assert_eq!(loop_exit(ret.clone()), Some(ret));
    }
}
