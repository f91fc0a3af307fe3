//! Type constructors: `Int(x)`, `Str(x)`, `List(xs)`, `Table(a = 1)`, ...

use std::rc::Rc;

use regex::Regex;

use super::functions::make_range;
use crate::errors::{self, EvalError, EvalResult};
use crate::interpreter::{into_pair, to_set, Evaluator};
use crate::value::{display, Args, BuiltinType, Key, Table, Value, ValueMap};

/// Calls a builtin type as a constructor.
pub fn construct(ev: &mut Evaluator<'_>, ty: BuiltinType, mut args: Args) -> EvalResult {
    let name = ty.name();
    match ty {
        BuiltinType::Bool => {
            let values = args.between(name, 0, 1)?;
            Ok(Value::Bool(values.first().is_some_and(Value::is_truthy)))
        }
        BuiltinType::Int => match args.between(name, 0, 1)?.first() {
            None => Ok(Value::Int(0)),
            Some(value) => to_int(value),
        },
        BuiltinType::Float => match args.between(name, 0, 1)?.first() {
            None => Ok(Value::Float(0.0)),
            Some(value) => to_float(value),
        },
        BuiltinType::Str => match args.between(name, 0, 1)?.first() {
            None => Ok(Value::str("")),
            Some(value) => Ok(Value::str(display::display(value))),
        },
        BuiltinType::Bytes => match args.between(name, 0, 1)?.first() {
            None => Ok(Value::bytes(Vec::new())),
            Some(Value::Str(s)) => Ok(Value::bytes(s.as_bytes().to_vec())),
            Some(Value::Bytes(b)) => Ok(Value::Bytes(Rc::clone(b))),
            Some(other) => {
                let bytes = ev
                    .collect(other)?
                    .iter()
                    .map(to_byte)
                    .collect::<Result<Vec<u8>, _>>()?;
                Ok(Value::bytes(bytes))
            }
        },
        BuiltinType::Pattern => {
            let [source] = args.exact::<1>(name)?;
            match source {
                Value::Pattern(p) => Ok(Value::Pattern(p)),
                Value::Str(s) => Regex::new(&s)
                    .map(|p| Value::Pattern(Rc::new(p)))
                    .map_err(|e| errors::invalid_pattern(&e.to_string())),
                other => Err(errors::wrong_arg_type(name, "str", other.type_name())),
            }
        }
        BuiltinType::List | BuiltinType::Tuple | BuiltinType::Set | BuiltinType::FrozenSet => {
            let items = match args.between(name, 0, 1)?.first() {
                None => Vec::new(),
                Some(iterable) => ev.collect(iterable)?,
            };
            Ok(match ty {
                BuiltinType::List => Value::list(items),
                BuiltinType::Tuple => Value::tuple(items),
                BuiltinType::Set => Value::set(to_set(items)?),
                _ => Value::frozen_set(to_set(items)?),
            })
        }
        BuiltinType::Dict | BuiltinType::OrderedDict => {
            let named = std::mem::take(&mut args.named);
            let mut map = ValueMap::default();
            if let Some(source) = args.between(name, 0, 1)?.first() {
                fill_map(ev, &mut map, source)?;
            }
            for (key, value) in named {
                map.insert(Key::new(Value::Str(key))?, value);
            }
            Ok(if ty == BuiltinType::Dict {
                Value::dict(map)
            } else {
                Value::ordered_dict(map)
            })
        }
        BuiltinType::Table => {
            let named = std::mem::take(&mut args.named);
            args.check(name, 0, 0)?;
            let table = Rc::new(Table::new());
            for (field, value) in named {
                ev.table_set(&table, &field, value)?;
            }
            Ok(Value::Table(table))
        }
        BuiltinType::Range => {
            let bounds = args.between(name, 1, 3)?;
            make_range(&bounds)
        }
        BuiltinType::NoneType
        | BuiltinType::Generator
        | BuiltinType::Function
        | BuiltinType::Builtin
        | BuiltinType::Type
        | BuiltinType::Exception
        | BuiltinType::Module => Err(errors::cannot_construct(name)),
    }
}

fn fill_map(ev: &mut Evaluator<'_>, map: &mut ValueMap, source: &Value) -> Result<(), EvalError> {
    match source {
        Value::Dict(other) | Value::OrderedDict(other) => {
            map.extend(other.borrow().iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Value::Table(table) => {
            for (name, value) in table.slots() {
                map.insert(Key::new(Value::Str(name))?, value);
            }
        }
        other => {
            for item in ev.collect(other)? {
                let (key, value) = into_pair(&item)?;
                map.insert(Key::new(key)?, value);
            }
        }
    }
    Ok(())
}

/// Exclusive bounds of the floats that truncate into `i64`.
const I64_FLOAT_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Truncates toward zero. NaN and infinities are ValueErrors, floats
/// beyond `i64` OverflowErrors.
pub(super) fn float_to_int(f: f64) -> EvalResult {
    if f.is_nan() || f.is_infinite() {
        return Err(errors::value_error(format!(
            "cannot convert {} to Int",
            display::format_float(f)
        )));
    }
    let truncated = f.trunc();
    if truncated >= I64_FLOAT_BOUND || truncated < -I64_FLOAT_BOUND {
        return Err(errors::integer_overflow("Int"));
    }
    Ok(Value::Int(truncated as i64))
}

fn to_int(value: &Value) -> EvalResult {
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(f) => float_to_int(*f),
        Value::Str(s) => s
            .trim()
            .replace('_', "")
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| errors::value_error(format!("invalid literal for Int: '{s}'"))),
        other => Err(errors::wrong_arg_type("Int", "number or str", other.type_name())),
    }
}

fn to_float(value: &Value) -> EvalResult {
    match value {
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| errors::value_error(format!("invalid literal for Float: '{s}'"))),
        other => other
            .as_float()
            .map(Value::Float)
            .ok_or_else(|| errors::wrong_arg_type("Float", "number or str", other.type_name())),
    }
}

fn to_byte(value: &Value) -> Result<u8, EvalError> {
    value
        .as_int()
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| errors::value_error("bytes must be in range(0, 256)"))
}
