//! The builtin namespace every program starts from.
//!
//! - constants: `true false none inf`
//! - type constructors and exception types, bound by name
//! - utility functions (`functions`)
//! - host modules for `import` (`modules`)
//! - script loading and dynamic code (`loader`)

mod convert;
mod functions;
mod loader;
mod modules;

use std::path::Path;
use std::rc::Rc;

use lagoon_ir::Ident;

use crate::environment::Namespace;
use crate::errors::{EvalResult, ExceptionKind};
use crate::interpreter::Evaluator;
use crate::value::{display, Args, BuiltinType, ExceptionValue, Table, Value};

pub use convert::construct;

/// Type constructors bound in the root namespace.
const CONSTRUCTORS: [(&str, BuiltinType); 13] = [
    ("Int", BuiltinType::Int),
    ("Float", BuiltinType::Float),
    ("Str", BuiltinType::Str),
    ("Bytes", BuiltinType::Bytes),
    ("Pattern", BuiltinType::Pattern),
    ("List", BuiltinType::List),
    ("Tuple", BuiltinType::Tuple),
    ("Set", BuiltinType::Set),
    ("FrozenSet", BuiltinType::FrozenSet),
    ("Dict", BuiltinType::Dict),
    ("OrderedDict", BuiltinType::OrderedDict),
    ("Table", BuiltinType::Table),
    ("bool", BuiltinType::Bool),
];

/// Name of the originating file binding.
pub const LAGOONFILE: &str = "__lagoonfile__";

/// A fresh builtin namespace. `file` is reported as `__lagoonfile__` and
/// anchors relative `load` paths.
pub fn seed(file: Option<&Path>) -> Namespace {
    let mut ns = Namespace::default();
    let mut bind = |name: &str, value: Value| {
        ns.insert(Ident::from(name), value);
    };

    bind("true", Value::Bool(true));
    bind("false", Value::Bool(false));
    bind("none", Value::None);
    bind("inf", Value::Float(f64::INFINITY));

    for (name, ty) in CONSTRUCTORS {
        bind(name, Value::Type(ty));
    }
    for kind in ExceptionKind::ALL {
        bind(kind.name(), Value::ExceptionType(kind));
    }
    for &(name, func) in functions::FUNCTIONS {
        bind(name, Value::native(name, func));
    }
    for &(name, func) in loader::LOADERS {
        bind(name, Value::native(name, func));
    }

    bind(
        LAGOONFILE,
        file.map_or(Value::None, |path| {
            Value::str(path.to_string_lossy().into_owned())
        }),
    );
    bind("__interpreter__", loader::interpreter_module());
    bind("globalvars", Value::Table(Rc::new(Table::new())));
    ns
}

/// Calling an exception type: `message` is the display of the first
/// argument, `args` all positional arguments.
pub fn new_exception(kind: ExceptionKind, args: Args) -> Value {
    let message = args.get(0).map(display::display).unwrap_or_default();
    Value::exception(ExceptionValue::new(
        kind,
        message,
        args.positional.into_vec(),
    ))
}

/// Calls `func` with positional `items`.
pub(crate) fn call_with(
    ev: &mut Evaluator<'_>,
    func: &Value,
    items: impl IntoIterator<Item = Value>,
) -> EvalResult {
    ev.call_value(func, Args::positional(items))
}

#[cfg(test)]
mod tests;
