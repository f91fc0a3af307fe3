//! Lazy single-pass sequences.
//!
//! A [`Generator`] is pulled one item at a time by whoever consumes it
//! (`for`, `List(...)`, `next`, ...). Each pull runs exactly up to the next
//! item and stops; once exhausted it stays exhausted.

use std::cell::RefCell;
use std::rc::Rc;

use lagoon_ir::{Comprehension, ExprId};

use super::{CodeUnit, RangeValue, Value};
use crate::environment::ScopeChain;
use crate::errors::{self, EvalError};
use crate::interpreter::Evaluator;
use crate::value::Args;

/// Cursor over any iterable value.
pub enum ValueIter {
    /// Lists are read live, so appends during iteration are seen.
    List(Rc<RefCell<Vec<Value>>>, usize),
    Items(std::vec::IntoIter<Value>),
    Range(RangeValue, usize),
    Generator(Rc<Generator>),
}

impl ValueIter {
    pub fn next(&mut self, ev: &mut Evaluator<'_>) -> Result<Option<Value>, EvalError> {
        match self {
            ValueIter::List(items, pos) => {
                let item = items.borrow().get(*pos).cloned();
                if item.is_some() {
                    *pos += 1;
                }
                Ok(item)
            }
            ValueIter::Items(items) => Ok(items.next()),
            ValueIter::Range(range, pos) => {
                let item = range.get(*pos);
                if item.is_some() {
                    *pos += 1;
                }
                Ok(item.map(Value::Int))
            }
            ValueIter::Generator(generator) => generator.next(ev),
        }
    }
}

/// Element expressions of a comprehension.
pub enum ComprehensionBody {
    Seq(Comprehension<ExprId>),
    Map(Comprehension<(ExprId, ExprId)>),
}

/// What a generator pulls from.
pub enum GeneratorState {
    /// `(element for target in iter if cond)`, evaluated in its own frame.
    Comprehension {
        unit: Rc<CodeUnit>,
        body: ComprehensionBody,
        chain: ScopeChain,
        source: ValueIter,
    },
    /// `iter(x)` and `reversed(x)`.
    Iter(ValueIter),
    /// `map(f, xs, ...)`
    Map { func: Value, sources: Vec<ValueIter> },
    /// `filter(f, xs)`; a `none` predicate keeps truthy items.
    Filter { func: Value, source: ValueIter },
    /// `enumerate(xs, start)`
    Enumerate { source: ValueIter, index: i64 },
    /// `zip(xs, ys, ...)`
    Zip { sources: Vec<ValueIter> },
    Exhausted,
}

pub struct Generator {
    state: RefCell<GeneratorState>,
}

impl Generator {
    pub fn new(state: GeneratorState) -> Self {
        Generator {
            state: RefCell::new(state),
        }
    }

    /// Pulls the next item, or `None` once exhausted.
    pub fn next(&self, ev: &mut Evaluator<'_>) -> Result<Option<Value>, EvalError> {
        let mut state = self
            .state
            .try_borrow_mut()
            .map_err(|_| errors::generator_already_running())?;
        let item = pull(&mut state, ev);
        match item {
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => *state = GeneratorState::Exhausted,
        }
        item
    }
}

fn pull(state: &mut GeneratorState, ev: &mut Evaluator<'_>) -> Result<Option<Value>, EvalError> {
    match state {
        GeneratorState::Comprehension {
            unit,
            body,
            chain,
            source,
        } => {
            let mut frame = ev.for_unit(Rc::clone(unit), chain.clone());
            loop {
                let Some(item) = source.next(&mut frame)? else {
                    return Ok(None);
                };
                let (target, cond) = match body {
                    ComprehensionBody::Seq(c) => (&c.target, c.cond),
                    ComprehensionBody::Map(c) => (&c.target, c.cond),
                };
                frame.assign_target(target, item.clone())?;
                if let Some(cond) = cond {
                    if !frame.eval_expr(cond)?.is_truthy() {
                        continue;
                    }
                }
                let produced = match body {
                    ComprehensionBody::Seq(c) => match c.element {
                        Some(element) => frame.eval_expr(element)?,
                        None => item,
                    },
                    ComprehensionBody::Map(c) => match c.element {
                        Some((key, value)) => {
                            let key = frame.eval_expr(key)?;
                            let value = frame.eval_expr(value)?;
                            Value::tuple(vec![key, value])
                        }
                        None => item,
                    },
                };
                return Ok(Some(produced));
            }
        }
        GeneratorState::Iter(source) => source.next(ev),
        GeneratorState::Map { func, sources } => {
            let Some(items) = pull_all(sources, ev)? else {
                return Ok(None);
            };
            let func = func.clone();
            ev.call_value(&func, Args::positional(items)).map(Some)
        }
        GeneratorState::Filter { func, source } => {
            let func = func.clone();
            while let Some(item) = source.next(ev)? {
                let keep = if func.is_none() {
                    item.is_truthy()
                } else {
                    ev.call_value(&func, Args::positional([item.clone()]))?
                        .is_truthy()
                };
                if keep {
                    return Ok(Some(item));
                }
            }
            Ok(None)
        }
        GeneratorState::Enumerate { source, index } => {
            let Some(item) = source.next(ev)? else {
                return Ok(None);
            };
            let pair = Value::tuple(vec![Value::Int(*index), item]);
            *index = index.checked_add(1).ok_or_else(|| errors::integer_overflow("enumerate"))?;
            Ok(Some(pair))
        }
        GeneratorState::Zip { sources } => {
            Ok(pull_all(sources, ev)?.map(Value::tuple))
        }
        GeneratorState::Exhausted => Ok(None),
    }
}

/// One item from each source, or `None` as soon as any is exhausted.
fn pull_all(
    sources: &mut [ValueIter],
    ev: &mut Evaluator<'_>,
) -> Result<Option<Vec<Value>>, EvalError> {
    if sources.is_empty() {
        return Ok(None);
    }
    let mut items = Vec::with_capacity(sources.len());
    for source in sources {
        match source.next(ev)? {
            Some(item) => items.push(item),
            None => return Ok(None),
        }
    }
    Ok(Some(items))
}
