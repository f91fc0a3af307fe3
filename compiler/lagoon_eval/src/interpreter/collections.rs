//! Literals, comprehensions and iteration.

use std::rc::Rc;

use lagoon_ir::{CallableDef, CollectionKind, ExprId, MapBody, MappingKind, ParamDefault, SeqBody, TableField};

use super::Evaluator;
use crate::environment::Namespace;
use crate::errors::{self, EvalError, EvalResult};
use crate::value::{
    ComprehensionBody, FunctionValue, Generator, GeneratorState, Key, RangeValue, Table, Value,
    ValueIter, ValueMap, ValueSet,
};

impl Evaluator<'_> {
    /// `start..end` or `start...end`.
    pub(super) fn eval_range(
        &mut self,
        start: Option<ExprId>,
        end: ExprId,
        closed: bool,
    ) -> EvalResult {
        let start = match start {
            Some(expr) => range_bound(&self.eval_expr(expr)?)?,
            None => 0,
        };
        let mut stop = range_bound(&self.eval_expr(end)?)?;
        if closed {
            stop = stop
                .checked_add(1)
                .ok_or_else(|| errors::integer_overflow("..."))?;
        }
        Ok(Value::Range(RangeValue::new(start, stop)))
    }

    pub(super) fn eval_collection(&mut self, kind: CollectionKind, body: &SeqBody) -> EvalResult {
        if kind == CollectionKind::Generator {
            let generator = match body {
                SeqBody::Items(ids) => {
                    let items = self.eval_items(ids)?;
                    Generator::new(GeneratorState::Iter(ValueIter::Items(items.into_iter())))
                }
                SeqBody::Comprehension(c) => {
                    self.comprehension(ComprehensionBody::Seq((**c).clone()))?
                }
            };
            return Ok(Value::Generator(Rc::new(generator)));
        }
        let items = match body {
            SeqBody::Items(ids) => self.eval_items(ids)?,
            SeqBody::Comprehension(c) => {
                let generator = self.comprehension(ComprehensionBody::Seq((**c).clone()))?;
                self.drain(&generator)?
            }
        };
        Ok(match kind {
            CollectionKind::List => Value::list(items),
            CollectionKind::Tuple => Value::tuple(items),
            CollectionKind::Set => Value::set(to_set(items)?),
            CollectionKind::FrozenSet => Value::frozen_set(to_set(items)?),
            CollectionKind::Generator => Value::generator(GeneratorState::Iter(ValueIter::Items(
                items.into_iter(),
            ))),
        })
    }

    pub(super) fn eval_mapping(&mut self, kind: MappingKind, body: &MapBody) -> EvalResult {
        let mut map = ValueMap::default();
        match body {
            MapBody::Items(pairs) => {
                for (key, value) in pairs {
                    let key = Key::new(self.eval_expr(*key)?)?;
                    let value = self.eval_expr(*value)?;
                    map.insert(key, value);
                }
            }
            MapBody::Comprehension(c) => {
                let generator = self.comprehension(ComprehensionBody::Map((**c).clone()))?;
                while let Some(item) = generator.next(self)? {
                    let (key, value) = into_pair(&item)?;
                    map.insert(Key::new(key)?, value);
                }
            }
        }
        Ok(match kind {
            MappingKind::Dict => Value::dict(map),
            MappingKind::OrderedDict => Value::ordered_dict(map),
        })
    }

    /// `{ name = value, ... }`. Fields are written with the table write
    /// rule, so table-valued fields get the new table as parent.
    pub(super) fn eval_table(&mut self, fields: &[TableField]) -> EvalResult {
        let table = Rc::new(Table::new());
        for field in fields {
            let value = self.eval_expr(field.value)?;
            self.table_set(&table, &field.name, value)?;
        }
        Ok(Value::Table(table))
    }

    /// `fn(params) { body }`. Static defaults are evaluated here, once.
    pub(super) fn eval_callable(&mut self, def: &CallableDef) -> EvalResult {
        let mut static_defaults = Vec::new();
        for param in &def.params {
            if let ParamDefault::Static(expr) = param.default {
                static_defaults.push((param.name.clone(), self.eval_expr(expr)?));
            }
        }
        Ok(Value::Function(Rc::new(FunctionValue {
            unit: Rc::clone(&self.unit),
            def: Rc::new(def.clone()),
            static_defaults,
            chain: self.chain.clone(),
        })))
    }

    /// A lazy comprehension. The iterated container is evaluated now; the
    /// loop target lives in a frame of its own.
    fn comprehension(&mut self, body: ComprehensionBody) -> Result<Generator, EvalError> {
        let iter = match &body {
            ComprehensionBody::Seq(c) => c.iter,
            ComprehensionBody::Map(c) => c.iter,
        };
        let container = self.eval_expr(iter)?;
        let source = self.iterate(&container)?;
        Ok(Generator::new(GeneratorState::Comprehension {
            unit: Rc::clone(&self.unit),
            body,
            chain: self.chain.with_frame(Namespace::default()),
            source,
        }))
    }

    fn eval_items(&mut self, ids: &[ExprId]) -> Result<Vec<Value>, EvalError> {
        ids.iter().map(|id| self.eval_expr(*id)).collect()
    }

    fn drain(&mut self, generator: &Generator) -> Result<Vec<Value>, EvalError> {
        let mut items = Vec::new();
        while let Some(item) = generator.next(self)? {
            items.push(item);
        }
        Ok(items)
    }

    /// A cursor over any iterable value.
    pub fn iterate(&mut self, value: &Value) -> Result<ValueIter, EvalError> {
        Ok(match value {
            Value::List(items) => ValueIter::List(Rc::clone(items), 0),
            Value::Range(range) => ValueIter::Range(*range, 0),
            Value::Generator(generator) => ValueIter::Generator(Rc::clone(generator)),
            other => match other.sized_items() {
                Some(items) => ValueIter::Items(items.into_iter()),
                None => return Err(errors::not_iterable(other.type_name())),
            },
        })
    }

    /// All remaining items of an iterable value.
    pub fn collect(&mut self, value: &Value) -> Result<Vec<Value>, EvalError> {
        if let Some(items) = value.sized_items() {
            return Ok(items);
        }
        let mut iter = self.iterate(value)?;
        let mut items = Vec::new();
        while let Some(item) = iter.next(self)? {
            items.push(item);
        }
        Ok(items)
    }
}

fn range_bound(value: &Value) -> Result<i64, EvalError> {
    value
        .as_int()
        .ok_or_else(|| errors::range_bound_not_int(value.type_name()))
}

pub(crate) fn to_set(items: Vec<Value>) -> Result<ValueSet, EvalError> {
    items.into_iter().map(Key::new).collect()
}

/// Splits a two-element sequence into a key/value pair.
pub(crate) fn into_pair(item: &Value) -> Result<(Value, Value), EvalError> {
    match item.sized_items().as_deref() {
        Some([key, value]) => Ok((key.clone(), value.clone())),
        _ => Err(errors::mapping_item_not_pair()),
    }
}
