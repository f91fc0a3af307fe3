//! Attribute and index access.
//!
//! # Table reads
//!
//! Reading `t.n`:
//! 1. `parent` answers with the live owner link, if any
//! 2. a stored slot `n`
//! 3. a stored accessor `get_n`, called with `current = t`
//! 4. the same lookup on `t.metatable`
//!
//! Writes call a `set_n` setter when the full read algorithm finds one and
//! store its result. Storing a table under any name other than `parent`
//! makes the stored table's parent the receiver.

use std::rc::Rc;

use lagoon_ir::Ident;

use super::Evaluator;
use crate::errors::{self, EvalError, EvalResult};
use crate::methods;
use crate::value::{Args, BoundFunction, Key, MethodValue, RangeValue, Table, Value, PARENT};

/// Metatable hops before a lookup is treated as a cycle.
const MAX_METATABLE_HOPS: usize = 256;

impl Evaluator<'_> {
    /// `receiver.name`. Closures found this way are bound to the receiver.
    pub fn get_attr(&mut self, receiver: &Value, name: &str) -> EvalResult {
        let value = match receiver {
            Value::Table(table) => self.table_get(table, name)?,
            other => native_attr(other, name)?,
        };
        Ok(bind(value, receiver))
    }

    /// Like [`get_attr`](Self::get_attr) but a miss is `None`.
    pub fn find_attr(&mut self, receiver: &Value, name: &str) -> Result<Option<Value>, EvalError> {
        let value = match receiver {
            Value::Table(table) => self.table_find(table, name)?,
            other => match native_attr(other, name) {
                Ok(value) => Some(value),
                Err(err) if err.kind() == Some(errors::ExceptionKind::NameError) => None,
                Err(err) => return Err(err),
            },
        };
        Ok(value.map(|v| bind(v, receiver)))
    }

    pub fn set_attr(&mut self, receiver: &Value, name: &Ident, value: Value) -> Result<(), EvalError> {
        match receiver {
            Value::Table(table) => self.table_set(table, name, value),
            Value::Module(module) => {
                module.set(name.clone(), value);
                Ok(())
            }
            other => Err(errors::attribute_assignment_unsupported(
                other.type_name(),
                name,
            )),
        }
    }

    pub fn del_attr(&mut self, receiver: &Value, name: &str) -> Result<(), EvalError> {
        match receiver {
            Value::Table(table) => self.table_delete(table, name),
            Value::Module(module) => module
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| errors::attribute_not_found("module", name)),
            other => Err(errors::attribute_assignment_unsupported(
                other.type_name(),
                name,
            )),
        }
    }

    /// Full table read; a miss is a NameError.
    pub fn table_get(&mut self, table: &Rc<Table>, name: &str) -> EvalResult {
        self.table_find(table, name)?
            .ok_or_else(|| errors::attribute_not_found("table", name))
    }

    /// Full table read; a miss is `None`.
    pub fn table_find(&mut self, table: &Rc<Table>, name: &str) -> Result<Option<Value>, EvalError> {
        let getter_name = format!("get_{name}");
        let mut current = Rc::clone(table);
        for _ in 0..MAX_METATABLE_HOPS {
            if name == PARENT {
                if let Some(parent) = current.parent() {
                    return Ok(Some(Value::Table(parent)));
                }
            }
            if let Some(value) = current.get_slot(name) {
                return Ok(Some(value));
            }
            if let Some(getter) = current.get_slot(&getter_name) {
                let args = Args::new().with_named("current", Value::Table(Rc::clone(&current)));
                return self.call_value(&getter, args).map(Some);
            }
            match current.metatable() {
                Some(Value::Table(meta)) => current = meta,
                Some(other) => {
                    return match native_attr(&other, name) {
                        Ok(value) => Ok(Some(value)),
                        Err(err) if err.kind() == Some(errors::ExceptionKind::NameError) => Ok(None),
                        Err(err) => Err(err),
                    };
                }
                None => return Ok(None),
            }
        }
        Err(errors::metatable_chain_too_deep())
    }

    /// Table write with auto-parenting and `set_<name>` setters.
    pub fn table_set(&mut self, table: &Rc<Table>, name: &Ident, value: Value) -> Result<(), EvalError> {
        if &**name == PARENT {
            match &value {
                Value::Table(owner) => table.set_parent(owner),
                _ => {
                    table.clear_parent();
                    table.set_slot(name.clone(), value);
                }
            }
            return Ok(());
        }
        if let Value::Table(child) = &value {
            child.set_parent(table);
        }
        let stored = match self.table_find(table, &format!("set_{name}"))? {
            Some(setter) => {
                let args = Args::positional([value])
                    .with_named("current", Value::Table(Rc::clone(table)));
                self.call_value(&setter, args)?
            }
            None => value,
        };
        table.set_slot(name.clone(), stored);
        Ok(())
    }

    /// Removes a stored slot. A table stored there loses its parent link.
    pub fn table_delete(&mut self, table: &Rc<Table>, name: &str) -> Result<(), EvalError> {
        if name == PARENT && !table.has_slot(PARENT) {
            if table.parent().is_none() {
                return Err(errors::attribute_not_found("table", name));
            }
            table.clear_parent();
            return Ok(());
        }
        let value = self.table_get(table, name)?;
        if let Value::Table(child) = &value {
            if child.parent().is_some_and(|p| Rc::ptr_eq(&p, table)) {
                child.clear_parent();
            }
        }
        table
            .remove_slot(name)
            .map(|_| ())
            .ok_or_else(|| errors::attribute_not_found("table", name))
    }

    /// `receiver[key]`.
    pub fn get_index(&mut self, receiver: &Value, key: &Value) -> EvalResult {
        match receiver {
            Value::List(items) => index_sequence(&items.borrow(), key, receiver, Value::list),
            Value::Tuple(items) => index_sequence(items, key, receiver, Value::tuple),
            Value::Str(s) => {
                let chars: Vec<Value> = s.chars().map(|c| Value::str(c.to_string())).collect();
                index_sequence(&chars, key, receiver, |parts| {
                    Value::str(parts.iter().filter_map(Value::as_str).collect::<String>())
                })
            }
            Value::Bytes(b) => {
                let bytes: Vec<Value> = b.iter().map(|byte| Value::Int(i64::from(*byte))).collect();
                index_sequence(&bytes, key, receiver, |parts| {
                    Value::bytes(
                        parts
                            .iter()
                            .filter_map(|v| v.as_int().and_then(|n| u8::try_from(n).ok()))
                            .collect::<Vec<u8>>(),
                    )
                })
            }
            Value::Range(range) => {
                let len = range.len();
                let index = int_key(key, receiver)?;
                normalize_index(index, len)
                    .and_then(|i| range.get(i))
                    .map(Value::Int)
                    .ok_or_else(errors::index_out_of_range)
            }
            Value::Dict(map) | Value::OrderedDict(map) => map
                .borrow()
                .get(&Key::new(key.clone())?)
                .cloned()
                .ok_or_else(|| errors::key_not_found(key)),
            Value::Table(table) => match key {
                Value::Str(name) => self.table_get(table, name),
                other => Err(errors::table_key_not_str(other.type_name())),
            },
            Value::Module(module) => match key {
                Value::Str(name) => module
                    .get(name)
                    .ok_or_else(|| errors::attribute_not_found("module", name)),
                other => Err(errors::table_key_not_str(other.type_name())),
            },
            other => Err(errors::not_subscriptable(other.type_name())),
        }
    }

    /// `receiver[key] = value`.
    pub fn set_index(&mut self, receiver: &Value, key: Value, value: Value) -> Result<(), EvalError> {
        match receiver {
            Value::List(items) => {
                let index = int_key(&key, receiver)?;
                let mut items = items.borrow_mut();
                let slot = normalize_index(index, items.len())
                    .and_then(|i| items.get_mut(i))
                    .ok_or_else(errors::index_out_of_range)?;
                *slot = value;
                Ok(())
            }
            Value::Dict(map) | Value::OrderedDict(map) => {
                map.borrow_mut().insert(Key::new(key)?, value);
                Ok(())
            }
            Value::Table(table) => match key {
                Value::Str(name) => self.table_set(table, &name, value),
                other => Err(errors::table_key_not_str(other.type_name())),
            },
            other => Err(errors::item_assignment_unsupported(other.type_name())),
        }
    }
}

/// Binds closures to the value they were fetched from.
fn bind(value: Value, receiver: &Value) -> Value {
    match value {
        Value::Function(func) => Value::Bound(Rc::new(BoundFunction {
            func,
            receiver: receiver.clone(),
        })),
        other => other,
    }
}

/// Attributes of non-table values.
fn native_attr(receiver: &Value, name: &str) -> EvalResult {
    match (receiver, name) {
        (Value::Module(module), _) => {
            return module
                .get(name)
                .ok_or_else(|| errors::attribute_not_found("module", name));
        }
        (Value::Exception(e), "message") => return Ok(Value::Str(Rc::clone(&e.message))),
        (Value::Exception(e), "args") => return Ok(Value::tuple(e.args.clone())),
        (Value::Exception(e), "kind") => return Ok(Value::ExceptionType(e.kind)),
        (Value::Range(r), "start") => return Ok(Value::Int(r.start)),
        (Value::Range(r), "stop") => return Ok(Value::Int(r.stop)),
        (Value::Range(r), "step") => return Ok(Value::Int(r.step)),
        _ => {}
    }
    if methods::has_method(receiver, name) {
        Ok(Value::Method(Rc::new(MethodValue {
            receiver: receiver.clone(),
            name: Ident::from(name),
        })))
    } else {
        Err(errors::attribute_not_found(receiver.type_name(), name))
    }
}

fn int_key(key: &Value, receiver: &Value) -> Result<i64, EvalError> {
    key.as_int()
        .ok_or_else(|| errors::invalid_index(receiver.type_name(), key.type_name()))
}

/// Resolves a possibly negative index against `len`.
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { index + len } else { index };
    if (0..len).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}

/// Integer index or range slice of a sequence.
fn index_sequence(
    items: &[Value],
    key: &Value,
    receiver: &Value,
    rebuild: impl FnOnce(Vec<Value>) -> Value,
) -> EvalResult {
    if let Value::Range(range) = key {
        let picked = slice_indices(items.len(), range)
            .into_iter()
            .filter_map(|i| items.get(i).cloned())
            .collect();
        return Ok(rebuild(picked));
    }
    let index = int_key(key, receiver)?;
    normalize_index(index, items.len())
        .and_then(|i| items.get(i).cloned())
        .ok_or_else(errors::index_out_of_range)
}

/// Positions selected by slicing a sequence of `len` elements with a
/// range, with negative bounds counting from the end.
fn slice_indices(len: usize, range: &RangeValue) -> Vec<usize> {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let step = range.step;
    let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
    let clamp = |bound: i64| {
        if bound < 0 {
            (bound + len).max(lower)
        } else {
            bound.min(upper)
        }
    };
    let (mut i, stop) = (clamp(range.start), clamp(range.stop));
    let mut picked = Vec::new();
    while (step > 0 && i < stop) || (step < 0 && i > stop) {
        if let Ok(index) = usize::try_from(i) {
            picked.push(index);
        }
        i += step;
    }
    picked
}
