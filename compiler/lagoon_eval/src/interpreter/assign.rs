//! Assignment.
//!
//! Targets are resolved to [`Place`]s before the right-hand side is
//! evaluated, so `t.x = f()` evaluates `t` before calling `f`.
//! Destructuring checks the length of the value against the number of
//! targets before anything is stored.

use lagoon_ir::{AssignOp, ExprId, Ident, Target};

use super::Evaluator;
use crate::errors::{self, EvalError, EvalResult};
use crate::operators;
use crate::value::Value;

/// A resolved assignment destination.
enum Place {
    Name(Ident),
    Attr(Value, Ident),
    Index(Value, Value),
    Tuple(Vec<Place>),
}

impl Evaluator<'_> {
    /// `target op values`. Several values are packed into a tuple.
    pub(super) fn exec_assign(
        &mut self,
        target: &Target,
        op: AssignOp,
        values: &[ExprId],
    ) -> Result<(), EvalError> {
        let place = self.resolve_place(target)?;
        let value = self.eval_values(values)?;
        let Some(binary) = op.binary_op() else {
            return self.store(place, value);
        };
        if matches!(place, Place::Tuple(_)) {
            return Err(errors::compound_multi_assign());
        }
        let current = self.load(&place)?;
        let combined = operators::binary(binary, &current, &value)?;
        self.store(place, combined)
    }

    /// Binds `value` to `target`, as done by `for` loops and
    /// comprehensions on every item.
    pub fn assign_target(&mut self, target: &Target, value: Value) -> Result<(), EvalError> {
        let place = self.resolve_place(target)?;
        self.store(place, value)
    }

    fn eval_values(&mut self, values: &[ExprId]) -> EvalResult {
        match values {
            [single] => self.eval_expr(*single),
            many => {
                let items = many
                    .iter()
                    .map(|id| self.eval_expr(*id))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::tuple(items))
            }
        }
    }

    fn resolve_place(&mut self, target: &Target) -> Result<Place, EvalError> {
        Ok(match target {
            Target::Name { name, .. } => Place::Name(name.clone()),
            Target::Attr { receiver, name, .. } => {
                Place::Attr(self.eval_expr(*receiver)?, name.clone())
            }
            Target::Index { receiver, key, .. } => {
                let receiver = self.eval_expr(*receiver)?;
                Place::Index(receiver, self.eval_expr(*key)?)
            }
            Target::Tuple { elements, .. } => Place::Tuple(
                elements
                    .iter()
                    .map(|t| self.resolve_place(t))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    /// Current value of a single place, for compound operators.
    fn load(&mut self, place: &Place) -> EvalResult {
        match place {
            Place::Name(name) => self.chain.resolve(name),
            Place::Attr(receiver, name) => self.get_attr(receiver, name),
            Place::Index(receiver, key) => self.get_index(receiver, key),
            Place::Tuple(_) => Err(errors::compound_multi_assign()),
        }
    }

    fn store(&mut self, place: Place, value: Value) -> Result<(), EvalError> {
        match place {
            Place::Name(name) => {
                self.chain.assign(name, value);
                Ok(())
            }
            Place::Attr(receiver, name) => self.set_attr(&receiver, &name, value),
            Place::Index(receiver, key) => self.set_index(&receiver, key, value),
            Place::Tuple(places) => {
                let len = value
                    .sized_len()
                    .ok_or_else(errors::destructure_not_sequence)?;
                if len != places.len() {
                    return Err(errors::destructure_length_mismatch(places.len(), len));
                }
                let items = value
                    .sized_items()
                    .ok_or_else(errors::destructure_not_sequence)?;
                for (place, item) in places.into_iter().zip(items) {
                    self.store(place, item)?;
                }
                Ok(())
            }
        }
    }
}
