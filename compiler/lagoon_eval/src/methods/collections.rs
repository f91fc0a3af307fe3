//! Methods of lists, tuples, sets, mappings and generators.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use super::int_arg;
use crate::errors::{self, EvalError, EvalResult, ExceptionKind};
use crate::interpreter::{into_pair, to_set, Evaluator};
use crate::value::{Args, Generator, Key, Value, ValueMap, ValueSet};

/// Stable sort by `key(item)` (or the items themselves). Comparison
/// failures, such as mixing strings and ints, are reported after the sort.
pub(crate) fn sort_values(
    ev: &mut Evaluator<'_>,
    items: Vec<Value>,
    key: Option<&Value>,
    reverse: bool,
) -> Result<Vec<Value>, EvalError> {
    let keys = match key.filter(|k| !k.is_none()) {
        Some(func) => items
            .iter()
            .map(|item| ev.call_value(func, Args::positional([item.clone()])))
            .collect::<Result<Vec<_>, _>>()?,
        None => items.clone(),
    };
    let mut order: Vec<usize> = (0..items.len()).collect();
    let mut failure = None;
    order.sort_by(|&a, &b| {
        let (x, y) = if reverse {
            (&keys[b], &keys[a])
        } else {
            (&keys[a], &keys[b])
        };
        match x.compare(y, "<") {
            Ok(ordering) => ordering.unwrap_or(Ordering::Equal),
            Err(err) => {
                failure.get_or_insert(err);
                Ordering::Equal
            }
        }
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(order.into_iter().map(|i| items[i].clone()).collect()),
    }
}

fn position(items: &[Value], needle: &Value) -> Option<usize> {
    items.iter().position(|item| item.equals(needle))
}

fn count(items: &[Value], needle: &Value) -> Value {
    let n = items.iter().filter(|item| item.equals(needle)).count();
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

fn not_in_sequence(type_name: &str) -> EvalError {
    errors::value_error(format!("value is not in {type_name}"))
}

fn index_of(items: &[Value], needle: &Value, type_name: &str) -> EvalResult {
    position(items, needle)
        .and_then(|i| i64::try_from(i).ok())
        .map(Value::Int)
        .ok_or_else(|| not_in_sequence(type_name))
}

pub(super) fn list_method(
    ev: &mut Evaluator<'_>,
    items: &Rc<RefCell<Vec<Value>>>,
    name: &str,
    mut args: Args,
) -> EvalResult {
    match name {
        "append" => {
            let [item] = args.exact::<1>("list.append")?;
            items.borrow_mut().push(item);
            Ok(Value::None)
        }
        "extend" => {
            let [other] = args.exact::<1>("list.extend")?;
            let extra = ev.collect(&other)?;
            items.borrow_mut().extend(extra);
            Ok(Value::None)
        }
        "insert" => {
            let [index, item] = args.exact::<2>("list.insert")?;
            let index = int_arg("list.insert", &index)?;
            let mut items = items.borrow_mut();
            let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
            let at = if index < 0 { (index + len).max(0) } else { index.min(len) };
            items.insert(usize::try_from(at).unwrap_or(0), item);
            Ok(Value::None)
        }
        "pop" => {
            let index = match args.between("list.pop", 0, 1)?.first() {
                Some(v) => int_arg("list.pop", v)?,
                None => -1,
            };
            let mut items = items.borrow_mut();
            if items.is_empty() {
                return Err(EvalError::new(ExceptionKind::IndexError, "pop from empty list"));
            }
            let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
            let at = if index < 0 { index + len } else { index };
            match usize::try_from(at).ok().filter(|&i| i < items.len()) {
                Some(i) => Ok(items.remove(i)),
                None => Err(errors::index_out_of_range()),
            }
        }
        "remove" => {
            let [item] = args.exact::<1>("list.remove")?;
            let mut items = items.borrow_mut();
            let at = position(&items, &item).ok_or_else(|| not_in_sequence("list"))?;
            items.remove(at);
            Ok(Value::None)
        }
        "index" => {
            let [item] = args.exact::<1>("list.index")?;
            index_of(&items.borrow(), &item, "list")
        }
        "count" => {
            let [item] = args.exact::<1>("list.count")?;
            Ok(count(&items.borrow(), &item))
        }
        "reverse" => {
            args.check("list.reverse", 0, 0)?;
            items.borrow_mut().reverse();
            Ok(Value::None)
        }
        "sort" => {
            let key = args.take_named("key");
            let reverse = args.take_named("reverse").is_some_and(|v| v.is_truthy());
            args.check("list.sort", 0, 0)?;
            let current = items.borrow().clone();
            let sorted = sort_values(ev, current, key.as_ref(), reverse)?;
            *items.borrow_mut() = sorted;
            Ok(Value::None)
        }
        "clear" => {
            args.check("list.clear", 0, 0)?;
            items.borrow_mut().clear();
            Ok(Value::None)
        }
        "copy" => {
            args.check("list.copy", 0, 0)?;
            Ok(Value::list(items.borrow().clone()))
        }
        _ => Err(errors::attribute_not_found("list", name)),
    }
}

pub(super) fn tuple_method(items: &[Value], name: &str, args: Args) -> EvalResult {
    match name {
        "index" => {
            let [item] = args.exact::<1>("tuple.index")?;
            index_of(items, &item, "tuple")
        }
        "count" => {
            let [item] = args.exact::<1>("tuple.count")?;
            Ok(count(items, &item))
        }
        _ => Err(errors::attribute_not_found("tuple", name)),
    }
}

/// Set algebra keeps the receiver's type: a frozenset's union is a
/// frozenset.
pub(super) fn set_method(
    ev: &mut Evaluator<'_>,
    receiver: &Value,
    name: &str,
    args: Args,
) -> EvalResult {
    let type_name = receiver.type_name();
    let fn_name = format!("{type_name}.{name}");
    let current: ValueSet = match receiver {
        Value::Set(items) => items.borrow().clone(),
        Value::FrozenSet(items) => (**items).clone(),
        other => return Err(errors::attribute_not_found(other.type_name(), name)),
    };
    let rebuild = |items: ValueSet| match receiver {
        Value::FrozenSet(_) => Value::frozen_set(items),
        _ => Value::set(items),
    };
    match name {
        "union" | "intersection" | "difference" => {
            let mut result = current;
            for other in args.between(&fn_name, 0, usize::MAX)? {
                let other = to_set(ev.collect(&other)?)?;
                result = match name {
                    "union" => result.into_iter().chain(other).collect(),
                    "intersection" => result.into_iter().filter(|k| other.contains(k)).collect(),
                    _ => result.into_iter().filter(|k| !other.contains(k)).collect(),
                };
            }
            Ok(rebuild(result))
        }
        "issubset" | "issuperset" => {
            let [other] = args.exact::<1>(&fn_name)?;
            let other = to_set(ev.collect(&other)?)?;
            Ok(Value::Bool(if name == "issubset" {
                current.is_subset(&other)
            } else {
                current.is_superset(&other)
            }))
        }
        "copy" => {
            args.check(&fn_name, 0, 0)?;
            Ok(rebuild(current))
        }
        _ => {
            let Value::Set(items) = receiver else {
                return Err(errors::attribute_not_found(type_name, name));
            };
            mutate_set(items, name, &fn_name, args)
        }
    }
}

fn mutate_set(
    items: &RefCell<ValueSet>,
    name: &str,
    fn_name: &str,
    args: Args,
) -> EvalResult {
    match name {
        "add" => {
            let [item] = args.exact::<1>(fn_name)?;
            items.borrow_mut().insert(Key::new(item)?);
        }
        "discard" => {
            let [item] = args.exact::<1>(fn_name)?;
            items.borrow_mut().shift_remove(&Key::new(item)?);
        }
        "remove" => {
            let [item] = args.exact::<1>(fn_name)?;
            let key = Key::new(item)?;
            if !items.borrow_mut().shift_remove(&key) {
                return Err(errors::key_not_found(key.value()));
            }
        }
        "clear" => {
            args.check(fn_name, 0, 0)?;
            items.borrow_mut().clear();
        }
        _ => return Err(errors::attribute_not_found("set", name)),
    }
    Ok(Value::None)
}

pub(super) fn dict_method(
    ev: &mut Evaluator<'_>,
    receiver: &Value,
    map: &Rc<RefCell<ValueMap>>,
    name: &str,
    mut args: Args,
) -> EvalResult {
    let fn_name = format!("{}.{name}", receiver.type_name());
    match name {
        "get" => {
            let values = args.between(&fn_name, 1, 2)?;
            let key = Key::new(values[0].clone())?;
            let found = map.borrow().get(&key).cloned();
            Ok(found.unwrap_or_else(|| values.get(1).cloned().unwrap_or(Value::None)))
        }
        "keys" => {
            args.check(&fn_name, 0, 0)?;
            Ok(Value::list(map.borrow().keys().map(Key::to_value).collect()))
        }
        "values" => {
            args.check(&fn_name, 0, 0)?;
            Ok(Value::list(map.borrow().values().cloned().collect()))
        }
        "items" => {
            args.check(&fn_name, 0, 0)?;
            let pairs = map
                .borrow()
                .iter()
                .map(|(k, v)| Value::tuple(vec![k.to_value(), v.clone()]))
                .collect();
            Ok(Value::list(pairs))
        }
        "pop" => {
            let values = args.between(&fn_name, 1, 2)?;
            let key = Key::new(values[0].clone())?;
            let removed = map.borrow_mut().shift_remove(&key);
            match (removed, values.get(1)) {
                (Some(value), _) => Ok(value),
                (None, Some(default)) => Ok(default.clone()),
                (None, None) => Err(errors::key_not_found(key.value())),
            }
        }
        "setdefault" => {
            let values = args.between(&fn_name, 1, 2)?;
            let key = Key::new(values[0].clone())?;
            let default = values.get(1).cloned().unwrap_or(Value::None);
            Ok(map.borrow_mut().entry(key).or_insert(default).clone())
        }
        "update" => {
            let named = std::mem::take(&mut args.named);
            let mut entries = Vec::new();
            for other in args.between(&fn_name, 0, 1)? {
                match &other {
                    Value::Dict(m) | Value::OrderedDict(m) => entries.extend(
                        m.borrow().iter().map(|(k, v)| (k.clone(), v.clone())),
                    ),
                    _ => {
                        for item in ev.collect(&other)? {
                            let (key, value) = into_pair(&item)?;
                            entries.push((Key::new(key)?, value));
                        }
                    }
                }
            }
            for (name, value) in named {
                entries.push((Key::new(Value::Str(name))?, value));
            }
            map.borrow_mut().extend(entries);
            Ok(Value::None)
        }
        "clear" => {
            args.check(&fn_name, 0, 0)?;
            map.borrow_mut().clear();
            Ok(Value::None)
        }
        "copy" => {
            args.check(&fn_name, 0, 0)?;
            let copy = map.borrow().clone();
            Ok(match receiver {
                Value::OrderedDict(_) => Value::ordered_dict(copy),
                _ => Value::dict(copy),
            })
        }
        _ => Err(errors::attribute_not_found(receiver.type_name(), name)),
    }
}

/// `g.next([default])`: the next item, else `default`, else StopIteration.
pub(super) fn generator_method(
    ev: &mut Evaluator<'_>,
    generator: &Generator,
    name: &str,
    args: Args,
) -> EvalResult {
    match name {
        "next" => {
            let default = args.between("generator.next", 0, 1)?.into_iter().next();
            match (generator.next(ev)?, default) {
                (Some(item), _) => Ok(item),
                (None, Some(default)) => Ok(default),
                (None, None) => Err(errors::stop_iteration()),
            }
        }
        _ => Err(errors::attribute_not_found("generator", name)),
    }
}
