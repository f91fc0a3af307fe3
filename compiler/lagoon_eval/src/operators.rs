//! Binary and unary operators on values.
//!
//! Arithmetic follows the usual dynamic-language conventions: `/` always
//! yields a float, `%` is floored, and `**` with a negative integer
//! exponent yields a float. Integer arithmetic is checked and overflow is
//! an `OverflowError` rather than a wrap.
//!
//! `and`, `or`, `isa` and `in` over generators need the evaluator and are
//! handled there.

use std::cmp::Ordering;

use lagoon_ir::{BinaryOp, UnaryOp};

use crate::errors::{self, EvalError, EvalResult};
use crate::value::{Key, Value, ValueSet};

/// Evaluate a binary operator on two already evaluated operands.
pub fn binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => sub(left, right),
        BinaryOp::Mul => mul(left, right),
        BinaryOp::Div => div(left, right),
        BinaryOp::Mod => rem(left, right),
        BinaryOp::Pow => pow(left, right),
        BinaryOp::Eq => Ok(Value::Bool(left.equals(right))),
        BinaryOp::NotEq => Ok(Value::Bool(!left.equals(right))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = left.compare(right, op.as_symbol())?;
            Ok(Value::Bool(ordering.is_some_and(|o| ordering_matches(op, o))))
        }
        BinaryOp::Is => Ok(Value::Bool(left.is_identical(right))),
        BinaryOp::In => contains(right, left).map(Value::Bool),
        BinaryOp::And => Ok(if left.is_truthy() {
            right.clone()
        } else {
            left.clone()
        }),
        BinaryOp::Or => Ok(if left.is_truthy() {
            left.clone()
        } else {
            right.clone()
        }),
        BinaryOp::Isa => Err(errors::unsupported_binary(
            op.as_symbol(),
            left.type_name(),
            right.type_name(),
        )),
    }
}

fn ordering_matches(op: BinaryOp, ordering: Ordering) -> bool {
    match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        _ => false,
    }
}

pub fn unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Neg, v) => match v.as_int() {
            Some(n) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| errors::integer_overflow("-")),
            None => Err(errors::unsupported_unary("-", v.type_name())),
        },
        (UnaryOp::Pos, Value::Float(f)) => Ok(Value::Float(*f)),
        (UnaryOp::Pos, v) => v
            .as_int()
            .map(Value::Int)
            .ok_or_else(|| errors::unsupported_unary("+", v.type_name())),
    }
}

/// Numeric operands, with bools read as ints.
enum Operands {
    Ints(i64, i64),
    Floats(f64, f64),
}

fn numeric(left: &Value, right: &Value) -> Option<Operands> {
    match (left, right) {
        (Value::Float(_), _) | (_, Value::Float(_)) => {
            Some(Operands::Floats(left.as_float()?, right.as_float()?))
        }
        _ => Some(Operands::Ints(left.as_int()?, right.as_int()?)),
    }
}

#[cold]
fn mismatch(op: &str, left: &Value, right: &Value) -> EvalError {
    errors::unsupported_binary(op, left.type_name(), right.type_name())
}

fn add(left: &Value, right: &Value) -> EvalResult {
    if let Some(operands) = numeric(left, right) {
        return match operands {
            Operands::Ints(a, b) => checked(a.checked_add(b), "+"),
            Operands::Floats(a, b) => Ok(Value::Float(a + b)),
        };
    }
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::str(format!("{a}{b}"))),
        (Value::Bytes(a), Value::Bytes(b)) => Ok(Value::bytes([&a[..], &b[..]].concat())),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        (Value::Tuple(a), Value::Tuple(b)) => Ok(Value::tuple([&a[..], &b[..]].concat())),
        _ => Err(mismatch("+", left, right)),
    }
}

fn sub(left: &Value, right: &Value) -> EvalResult {
    if let Some(operands) = numeric(left, right) {
        return match operands {
            Operands::Ints(a, b) => checked(a.checked_sub(b), "-"),
            Operands::Floats(a, b) => Ok(Value::Float(a - b)),
        };
    }
    match (left, right) {
        (Value::Set(a), Value::Set(_) | Value::FrozenSet(_)) => {
            let other = set_items(right).unwrap_or_default();
            Ok(Value::set(
                a.borrow().iter().filter(|k| !other.contains(*k)).cloned().collect(),
            ))
        }
        (Value::FrozenSet(a), Value::Set(_) | Value::FrozenSet(_)) => {
            let other = set_items(right).unwrap_or_default();
            Ok(Value::frozen_set(
                a.iter().filter(|k| !other.contains(*k)).cloned().collect(),
            ))
        }
        _ => Err(mismatch("-", left, right)),
    }
}

fn set_items(value: &Value) -> Option<ValueSet> {
    match value {
        Value::Set(items) => Some(items.borrow().clone()),
        Value::FrozenSet(items) => Some((**items).clone()),
        _ => None,
    }
}

fn mul(left: &Value, right: &Value) -> EvalResult {
    if let Some(operands) = numeric(left, right) {
        return match operands {
            Operands::Ints(a, b) => checked(a.checked_mul(b), "*"),
            Operands::Floats(a, b) => Ok(Value::Float(a * b)),
        };
    }
    let (seq, count) = match (left, right) {
        (seq, Value::Int(n)) | (Value::Int(n), seq) => (seq, *n),
        _ => return Err(mismatch("*", left, right)),
    };
    let count = usize::try_from(count).unwrap_or(0);
    match seq {
        Value::Str(s) => {
            let mut out = String::new();
            out.try_reserve_exact(repeated_len(s.len(), count)?)
                .map_err(|_| errors::integer_overflow("*"))?;
            if !s.is_empty() {
                (0..count).for_each(|_| out.push_str(s));
            }
            Ok(Value::str(out))
        }
        Value::Bytes(b) => Ok(Value::bytes(repeat_items(b, count)?)),
        Value::List(items) => Ok(Value::list(repeat_items(&items.borrow(), count)?)),
        Value::Tuple(items) => Ok(Value::tuple(repeat_items(items, count)?)),
        _ => Err(mismatch("*", left, right)),
    }
}

/// Length of `count` copies of a `len`-element sequence.
fn repeated_len(len: usize, count: usize) -> Result<usize, EvalError> {
    len.checked_mul(count)
        .ok_or_else(|| errors::integer_overflow("*"))
}

/// `count` copies of `items`. A result that cannot be allocated is an
/// `OverflowError`.
fn repeat_items<T: Clone>(items: &[T], count: usize) -> Result<Vec<T>, EvalError> {
    let total = repeated_len(items.len(), count)?;
    let mut out = Vec::new();
    out.try_reserve_exact(total)
        .map_err(|_| errors::integer_overflow("*"))?;
    out.extend(items.iter().cloned().cycle().take(total));
    Ok(out)
}

fn div(left: &Value, right: &Value) -> EvalResult {
    let Some(operands) = numeric(left, right) else {
        return Err(mismatch("/", left, right));
    };
    let (a, b) = match operands {
        Operands::Ints(a, b) => (a as f64, b as f64),
        Operands::Floats(a, b) => (a, b),
    };
    if b == 0.0 {
        return Err(errors::division_by_zero());
    }
    Ok(Value::Float(a / b))
}

fn rem(left: &Value, right: &Value) -> EvalResult {
    match numeric(left, right) {
        Some(Operands::Ints(_, 0)) => Err(errors::modulo_by_zero()),
        Some(Operands::Ints(a, b)) => {
            let r = checked(a.checked_rem(b), "%")?;
            match r {
                Value::Int(r) if r != 0 && (r < 0) != (b < 0) => Ok(Value::Int(r + b)),
                r => Ok(r),
            }
        }
        Some(Operands::Floats(_, b)) if b == 0.0 => Err(errors::modulo_by_zero()),
        Some(Operands::Floats(a, b)) => {
            let r = a % b;
            Ok(Value::Float(if r != 0.0 && (r < 0.0) != (b < 0.0) {
                r + b
            } else {
                r
            }))
        }
        None => Err(mismatch("%", left, right)),
    }
}

fn pow(left: &Value, right: &Value) -> EvalResult {
    match numeric(left, right) {
        Some(Operands::Ints(base, exp)) if exp >= 0 => match u32::try_from(exp) {
            Ok(exp) => checked(base.checked_pow(exp), "**"),
            Err(_) if matches!(base, 0 | 1) => Ok(Value::Int(base)),
            Err(_) if base == -1 => Ok(Value::Int(if exp % 2 == 0 { 1 } else { -1 })),
            Err(_) => Err(errors::integer_overflow("**")),
        },
        Some(Operands::Ints(base, exp)) => float_pow(base as f64, exp as f64),
        Some(Operands::Floats(base, exp)) => float_pow(base, exp),
        None => Err(mismatch("**", left, right)),
    }
}

fn float_pow(base: f64, exp: f64) -> EvalResult {
    if base == 0.0 && exp < 0.0 {
        return Err(errors::division_by_zero());
    }
    Ok(Value::Float(base.powf(exp)))
}

fn checked(result: Option<i64>, op: &str) -> EvalResult {
    result
        .map(Value::Int)
        .ok_or_else(|| errors::integer_overflow(op))
}

/// `item in container` for every container that can answer without
/// running code. Generators are consumed by the evaluator instead.
pub fn contains(container: &Value, item: &Value) -> Result<bool, EvalError> {
    match container {
        Value::Str(haystack) => match item {
            Value::Str(needle) => Ok(haystack.contains(&**needle)),
            other => Err(mismatch("in", other, container)),
        },
        Value::Bytes(haystack) => match item {
            Value::Bytes(needle) => Ok(needle.is_empty()
                || haystack.windows(needle.len()).any(|w| w == &needle[..])),
            other => match other.as_int() {
                Some(byte) => Ok(haystack.iter().any(|b| i64::from(*b) == byte)),
                None => Err(mismatch("in", other, container)),
            },
        },
        Value::List(items) => Ok(items.borrow().iter().any(|v| v.equals(item))),
        Value::Tuple(items) => Ok(items.iter().any(|v| v.equals(item))),
        Value::Set(items) => Ok(items.borrow().contains(&Key::new(item.clone())?)),
        Value::FrozenSet(items) => Ok(items.contains(&Key::new(item.clone())?)),
        Value::Dict(map) | Value::OrderedDict(map) => {
            Ok(map.borrow().contains_key(&Key::new(item.clone())?))
        }
        Value::Range(range) => Ok(match item {
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => range.contains(*f as i64),
            other => other.as_int().is_some_and(|n| range.contains(n)),
        }),
        Value::Table(table) => Ok(item.as_str().is_some_and(|name| table.has_slot(name))),
        Value::Module(module) => Ok(item.as_str().is_some_and(|name| module.get(name).is_some())),
        other => Err(errors::unsupported_membership(other.type_name())),
    }
}
