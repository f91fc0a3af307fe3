//! Host modules available to `import`.

use std::f64::consts;

use lagoon_ir::{BinaryOp, UnaryOp};

use super::convert::float_to_int;
use crate::errors::{self, EvalError, EvalResult};
use crate::interpreter::Evaluator;
use crate::operators;
use crate::value::{Args, ModuleValue, Value};

/// The host module called `name`, if there is one.
pub(super) fn host_module(name: &str) -> Option<Value> {
    match name {
        "math" => Some(math()),
        "op" => Some(op()),
        _ => None,
    }
}

fn number_arg(fn_name: &str, value: &Value) -> Result<f64, EvalError> {
    value
        .as_float()
        .ok_or_else(|| errors::wrong_arg_type(fn_name, "number", value.type_name()))
}

/// Natives of one float argument returning a float.
macro_rules! float_fns {
    ($($name:ident => $apply:expr),* $(,)?) => {
        $(
            fn $name(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
                let fn_name = concat!("math.", stringify!($name));
                let [x] = args.exact::<1>(fn_name)?;
                let x = number_arg(fn_name, &x)?;
                let apply: fn(f64) -> f64 = $apply;
                Ok(Value::Float(apply(x)))
            }
        )*

        const FLOAT_FNS: &[(&str, crate::value::NativeFn)] = &[$((stringify!($name), $name)),*];
    };
}

float_fns! {
    sqrt => f64::sqrt,
    exp => f64::exp,
    sin => f64::sin,
    cos => f64::cos,
    tan => f64::tan,
    asin => f64::asin,
    acos => f64::acos,
    atan => f64::atan,
    log2 => f64::log2,
    log10 => f64::log10,
    fabs => f64::abs,
    degrees => f64::to_degrees,
    radians => f64::to_radians,
}

/// `math.log(x[, base])`
fn log(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let values = args.between("math.log", 1, 2)?;
    let x = number_arg("math.log", &values[0])?;
    Ok(Value::Float(match values.get(1) {
        None => x.ln(),
        Some(base) => x.log(number_arg("math.log", base)?),
    }))
}

fn floor(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [x] = args.exact::<1>("math.floor")?;
    match x {
        Value::Int(_) | Value::Bool(_) => Ok(Value::Int(x.as_int().unwrap_or(0))),
        other => float_to_int(number_arg("math.floor", &other)?.floor()),
    }
}

fn ceil(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [x] = args.exact::<1>("math.ceil")?;
    match x {
        Value::Int(_) | Value::Bool(_) => Ok(Value::Int(x.as_int().unwrap_or(0))),
        other => float_to_int(number_arg("math.ceil", &other)?.ceil()),
    }
}

fn pow(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [x, y] = args.exact::<2>("math.pow")?;
    Ok(Value::Float(
        number_arg("math.pow", &x)?.powf(number_arg("math.pow", &y)?),
    ))
}

fn isnan(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [x] = args.exact::<1>("math.isnan")?;
    Ok(Value::Bool(number_arg("math.isnan", &x)?.is_nan()))
}

fn isinf(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [x] = args.exact::<1>("math.isinf")?;
    Ok(Value::Bool(number_arg("math.isinf", &x)?.is_infinite()))
}

fn math() -> Value {
    let mut module = ModuleValue::new("math")
        .with("pi", Value::Float(consts::PI))
        .with("e", Value::Float(consts::E))
        .with("tau", Value::Float(consts::TAU))
        .with("inf", Value::Float(f64::INFINITY))
        .with("nan", Value::Float(f64::NAN))
        .with("log", Value::native("log", log))
        .with("floor", Value::native("floor", floor))
        .with("ceil", Value::native("ceil", ceil))
        .with("pow", Value::native("pow", pow))
        .with("isnan", Value::native("isnan", isnan))
        .with("isinf", Value::native("isinf", isinf));
    for &(name, func) in FLOAT_FNS {
        module = module.with(name, Value::native(name, func));
    }
    Value::module(module)
}

/// Operators as functions: `op.add(1, 2)`, `sorted(xs, key = op.neg)`.
macro_rules! binary_fns {
    ($($name:ident => $op:expr),* $(,)?) => {
        $(
            fn $name(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
                let [left, right] = args.exact::<2>(concat!("op.", stringify!($name)))?;
                operators::binary($op, &left, &right)
            }
        )*

        const BINARY_FNS: &[(&str, crate::value::NativeFn)] = &[$((stringify!($name), $name)),*];
    };
}

binary_fns! {
    add => BinaryOp::Add,
    sub => BinaryOp::Sub,
    mul => BinaryOp::Mul,
    div => BinaryOp::Div,
    mod_ => BinaryOp::Mod,
    pow_ => BinaryOp::Pow,
    eq => BinaryOp::Eq,
    ne => BinaryOp::NotEq,
    lt => BinaryOp::Lt,
    le => BinaryOp::LtEq,
    gt => BinaryOp::Gt,
    ge => BinaryOp::GtEq,
    is_ => BinaryOp::Is,
}

macro_rules! unary_fns {
    ($($name:ident => $op:expr),* $(,)?) => {
        $(
            fn $name(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
                let [operand] = args.exact::<1>(concat!("op.", stringify!($name)))?;
                operators::unary($op, &operand)
            }
        )*

        const UNARY_FNS: &[(&str, crate::value::NativeFn)] = &[$((stringify!($name), $name)),*];
    };
}

unary_fns! {
    neg => UnaryOp::Neg,
    pos => UnaryOp::Pos,
    not_ => UnaryOp::Not,
}

/// `op.contains(container, item)` is `item in container`.
fn contains(_: &mut Evaluator<'_>, args: Args) -> EvalResult {
    let [container, item] = args.exact::<2>("op.contains")?;
    operators::contains(&container, &item).map(Value::Bool)
}

fn op() -> Value {
    let mut module = ModuleValue::new("op").with("contains", Value::native("contains", contains));
    for &(name, func) in BINARY_FNS.iter().chain(UNARY_FNS) {
        module = module.with(name, Value::native(name, func));
    }
    Value::module(module)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(module: &Value, name: &str) -> Value {
        match module {
            Value::Module(m) => m.get(name).unwrap_or(Value::None),
            _ => Value::None,
        }
    }

    #[test]
    fn test_known_modules() {
        assert!(host_module("math").is_some());
        assert!(host_module("op").is_some());
        assert!(host_module("os").is_none());
    }

    #[test]
    fn test_math_constants() {
        let math = math();
        assert_eq!(member(&math, "pi"), Value::Float(consts::PI));
        assert!(member(&math, "sqrt").is_callable());
        assert!(member(&math, "floor").is_callable());
    }

    #[test]
    fn test_op_names_use_trailing_underscore_for_keywords() {
        let op = op();
        for name in ["add", "mod_", "pow_", "is_", "not_", "neg", "contains"] {
            assert!(member(&op, name).is_callable(), "missing op.{name}");
        }
    }
}
