//! Utility functions of the builtin namespace.

use std::cmp::Ordering;

use lagoon_ir::{BinaryOp, Ident};

use super::convert::float_to_int;
use crate::errors::{self, EvalError, EvalResult};
use crate::interpreter::{isa, Evaluator};
use crate::methods::sort_values;
use crate::operators;
use crate::value::{display, Args, GeneratorState, Key, NativeFn, RangeValue, Value, ValueIter};

pub(super) const FUNCTIONS: &[(&str, NativeFn)] = &[
    ("print", print),
    ("len", len),
    ("range", range),
    ("iter", iter),
    ("next", next),
    ("enumerate", enumerate),
    ("zip", zip),
    ("sorted", sorted),
    ("reversed", reversed),
    ("sum", sum),
    ("min", min),
    ("max", max),
    ("abs", abs),
    ("round", round),
    ("all", all),
    ("any", any),
    ("divmod", divmod),
    ("map", map),
    ("filter", filter),
    ("type", type_of),
    ("isinstance", isinstance),
    ("hash", hash),
    ("getattr", getattr),
    ("setattr", setattr),
    ("hasattr", hasattr),
    ("delattr", delattr),
    ("repr", repr),
];

/// `print(*values, sep = ' ', end = '\n')`
fn print(ev: &mut Evaluator<'_>, mut args: Args) -> EvalResult {
    let sep = text_option(&mut args, "print", "sep", " ")?;
    let end = text_option(&mut args, "print", "end", "\n")?;
    let values = args.between("print", 0, usize::MAX)?;
    let mut line = values
        .iter()
        .map(display::display)
        .collect::<Vec<_>>()
        .join(&sep);
    line.push_str(&end);
    ev.runtime()
        .print_handler()
        .print(&line)
        .map_err(|err| errors::print_failed(&err.to_string()))?;
    Ok(Value::None)
}

fn text_option(
    args: &mut Args,
    fn_name: &str,
    name: &str,
    default: &str,
) -> Result<String, EvalError> {
    match args.take_named(name) {
        None | Some(Value::None) => Ok(default.to_owned()),
        Some(Value::Str(s)) => Ok(s.to_string()),
        Some(other) => Err(errors::wrong_arg_type(fn_name, "str", other.type_name())),
    }
}

fn len(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [value] = args.exact::<1>("len")?;
    let n = match &value {
        Value::Table(table) => table.len(),
        other => other.len()?,
    };
    Ok(Value::Int(i64::try_from(n).unwrap_or(i64::MAX)))
}

fn range(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    make_range(&args.between("range", 1, 3)?)
}

/// `range(stop)`, `range(start, stop)` or `range(start, stop, step)`.
pub(super) fn make_range(bounds: &[Value]) -> EvalResult {
    let bound = |v: &Value| {
        v.as_int()
            .ok_or_else(|| errors::range_bound_not_int(v.type_name()))
    };
    let range = match bounds {
        [stop] => RangeValue::new(0, bound(stop)?),
        [start, stop] => RangeValue::new(bound(start)?, bound(stop)?),
        [start, stop, step] => {
            let step = bound(step)?;
            if step == 0 {
                return Err(errors::range_step_zero());
            }
            RangeValue::with_step(bound(start)?, bound(stop)?, step)
        }
        _ => return Err(errors::wrong_arg_count("range", "1 to 3", bounds.len())),
    };
    Ok(Value::Range(range))
}

fn iter(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [value] = args.exact::<1>("iter")?;
    if let Value::Generator(_) = value {
        return Ok(value);
    }
    Ok(Value::generator(GeneratorState::Iter(ev.iterate(&value)?)))
}

fn next(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let mut values = args.between("next", 1, 2)?.into_iter();
    let (Some(source), default) = (values.next(), values.next()) else {
        return Err(errors::wrong_arg_count("next", "1 to 2", 0));
    };
    let Value::Generator(generator) = &source else {
        return Err(errors::wrong_arg_type("next", "generator", source.type_name()));
    };
    match (generator.next(ev)?, default) {
        (Some(item), _) => Ok(item),
        (None, Some(default)) => Ok(default),
        (None, None) => Err(errors::stop_iteration()),
    }
}

/// `enumerate(xs, start = 0)`
fn enumerate(ev: &mut Evaluator<'_>, mut args: Args) -> EvalResult {
    let named_start = args.take_named("start");
    let values = args.between("enumerate", 1, 2)?;
    let start = match values.get(1).or(named_start.as_ref()) {
        None => 0,
        Some(v) => v
            .as_int()
            .ok_or_else(|| errors::wrong_arg_type("enumerate", "int", v.type_name()))?,
    };
    let source = ev.iterate(&values[0])?;
    Ok(Value::generator(GeneratorState::Enumerate {
        source,
        index: start,
    }))
}

fn zip(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let sources = iterate_all(ev, args.between("zip", 0, usize::MAX)?)?;
    Ok(Value::generator(GeneratorState::Zip { sources }))
}

fn iterate_all(ev: &mut Evaluator<'_>, values: Vec<Value>) -> Result<Vec<ValueIter>, EvalError> {
    values.iter().map(|v| ev.iterate(v)).collect()
}

/// `sorted(xs, key = f, reverse = false)`
fn sorted(ev: &mut Evaluator<'_>, mut args: Args) -> EvalResult {
    let key = args.take_named("key");
    let reverse = args.take_named("reverse").is_some_and(|v| v.is_truthy());
    let [items] = args.exact::<1>("sorted")?;
    let items = ev.collect(&items)?;
    Ok(Value::list(sort_values(ev, items, key.as_ref(), reverse)?))
}

fn reversed(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [items] = args.exact::<1>("reversed")?;
    let mut items = ev.collect(&items)?;
    items.reverse();
    Ok(Value::generator(GeneratorState::Iter(ValueIter::Items(
        items.into_iter(),
    ))))
}

/// `sum(xs, start = 0)`
fn sum(ev: &mut Evaluator<'_>, mut args: Args) -> EvalResult {
    let named_start = args.take_named("start");
    let values = args.between("sum", 1, 2)?;
    let mut total = values
        .get(1)
        .cloned()
        .or(named_start)
        .unwrap_or(Value::Int(0));
    let mut source = ev.iterate(&values[0])?;
    while let Some(item) = source.next(ev)? {
        total = operators::binary(BinaryOp::Add, &total, &item)?;
    }
    Ok(total)
}

fn min(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    extreme(ev, args, "min", Ordering::Less)
}

fn max(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    extreme(ev, args, "max", Ordering::Greater)
}

/// `min`/`max` over one iterable or several arguments, with an optional
/// `key`. Ties keep the first candidate.
fn extreme(ev: &mut Evaluator<'_>, mut args: Args, name: &str, want: Ordering) -> EvalResult {
    let key = args.take_named("key").filter(|k| !k.is_none());
    let default = args.take_named("default");
    let values = args.between(name, 1, usize::MAX)?;
    let candidates = match <[Value; 1]>::try_from(values) {
        Ok([iterable]) => ev.collect(&iterable)?,
        Err(values) => values,
    };
    let mut best: Option<(Value, Value)> = None;
    for item in candidates {
        let rank = match &key {
            Some(func) => super::call_with(ev, func, [item.clone()])?,
            None => item.clone(),
        };
        let better = match &best {
            None => true,
            Some((_, best_rank)) => rank.compare(best_rank, "<")? == Some(want),
        };
        if better {
            best = Some((item, rank));
        }
    }
    match (best, default) {
        (Some((item, _)), _) => Ok(item),
        (None, Some(default)) => Ok(default),
        (None, None) => Err(errors::value_error(format!("{name}() arg is an empty sequence"))),
    }
}

fn abs(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [value] = args.exact::<1>("abs")?;
    match value {
        Value::Float(f) => Ok(Value::Float(f.abs())),
        other => match other.as_int() {
            Some(n) => n
                .checked_abs()
                .map(Value::Int)
                .ok_or_else(|| errors::integer_overflow("abs")),
            None => Err(errors::wrong_arg_type("abs", "number", other.type_name())),
        },
    }
}

/// `round(x)` rounds half to even and yields an int; `round(x, n)` keeps
/// the operand's type.
fn round(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let values = args.between("round", 1, 2)?;
    let number = &values[0];
    if !number.is_number() {
        return Err(errors::wrong_arg_type("round", "number", number.type_name()));
    }
    let digits = match values.get(1) {
        None | Some(Value::None) => None,
        Some(v) => Some(
            v.as_int()
                .ok_or_else(|| errors::wrong_arg_type("round", "int", v.type_name()))?,
        ),
    };
    match (number, digits) {
        (Value::Float(f), None) => float_to_int(f.round_ties_even()),
        (Value::Float(f), Some(digits)) => {
            let exponent = i32::try_from(digits.clamp(-308, 308)).unwrap_or(0);
            let scale = 10f64.powi(exponent);
            Ok(Value::Float((f * scale).round_ties_even() / scale))
        }
        (other, _) => Ok(Value::Int(other.as_int().unwrap_or(0))),
    }
}

fn all(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [items] = args.exact::<1>("all")?;
    let mut source = ev.iterate(&items)?;
    while let Some(item) = source.next(ev)? {
        if !item.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn any(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [items] = args.exact::<1>("any")?;
    let mut source = ev.iterate(&items)?;
    while let Some(item) = source.next(ev)? {
        if item.is_truthy() {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

/// `divmod(a, b)`: floored quotient and remainder.
fn divmod(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [a, b] = args.exact::<2>("divmod")?;
    let remainder = operators::binary(BinaryOp::Mod, &a, &b)?;
    let quotient = match (a.as_int(), b.as_int()) {
        (Some(x), Some(y)) => {
            let q = x.checked_div(y).ok_or_else(|| errors::integer_overflow("divmod"))?;
            let adjust = x % y != 0 && ((x < 0) != (y < 0));
            Value::Int(if adjust { q - 1 } else { q })
        }
        _ => match (a.as_float(), b.as_float()) {
            (Some(x), Some(y)) => Value::Float((x / y).floor()),
            _ => return Err(errors::unsupported_binary("divmod", a.type_name(), b.type_name())),
        },
    };
    Ok(Value::tuple(vec![quotient, remainder]))
}

fn map(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let mut values = args.between("map", 2, usize::MAX)?;
    let func = values.remove(0);
    let sources = iterate_all(ev, values)?;
    Ok(Value::generator(GeneratorState::Map { func, sources }))
}

/// `filter(f, xs)`; a `none` predicate keeps truthy items.
fn filter(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [func, items] = args.exact::<2>("filter")?;
    let source = ev.iterate(&items)?;
    Ok(Value::generator(GeneratorState::Filter { func, source }))
}

fn type_of(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [value] = args.exact::<1>("type")?;
    Ok(match &value {
        Value::Exception(e) => Value::ExceptionType(e.kind),
        other => Value::Type(other.builtin_type()),
    })
}

fn isinstance(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [value, filter] = args.exact::<2>("isinstance")?;
    isa(&value, &filter).map(Value::Bool)
}

fn hash(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [value] = args.exact::<1>("hash")?;
    Ok(Value::Int(Key::new(value)?.hash_code()))
}

fn attr_name<'a>(fn_name: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    value
        .as_str()
        .ok_or_else(|| errors::wrong_arg_type(fn_name, "str", value.type_name()))
}

/// `getattr(x, name[, default])`
fn getattr(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let values = args.between("getattr", 2, 3)?;
    let name = attr_name("getattr", &values[1])?;
    match values.get(2) {
        None => ev.get_attr(&values[0], name),
        Some(default) => Ok(ev.find_attr(&values[0], name)?.unwrap_or_else(|| default.clone())),
    }
}

fn setattr(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [receiver, name, value] = args.exact::<3>("setattr")?;
    let name = Ident::from(attr_name("setattr", &name)?);
    ev.set_attr(&receiver, &name, value)?;
    Ok(Value::None)
}

fn hasattr(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [receiver, name] = args.exact::<2>("hasattr")?;
    let name = attr_name("hasattr", &name)?;
    Ok(Value::Bool(ev.find_attr(&receiver, name)?.is_some()))
}

fn delattr(ev: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [receiver, name] = args.exact::<2>("delattr")?;
    ev.del_attr(&receiver, attr_name("delattr", &name)?)?;
    Ok(Value::None)
}

fn repr(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [value] = args.exact::<1>("repr")?;
    Ok(Value::str(display::repr(&value)))
}
