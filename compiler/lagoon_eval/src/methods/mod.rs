//! Builtin methods of native values.
//!
//! `xs.append` on a list yields a [`Value::Method`] holding the receiver
//! and the name; calling it lands in [`call_method`]. The method set is
//! fixed, so dispatch is a plain match per receiver type.

mod collections;
mod strings;

pub(crate) use collections::sort_values;

use crate::errors::{self, EvalError, EvalResult};
use crate::interpreter::Evaluator;
use crate::value::{Args, Value};

/// Every builtin method as `(receiver kind, method)`, sorted for binary
/// search. Dicts and ordered dicts share the `dict` entries.
pub const BUILTIN_METHODS: &[(&str, &str)] = &[
    // bytes
    ("bytes", "decode"),
    ("bytes", "endswith"),
    ("bytes", "hex"),
    ("bytes", "startswith"),
    // dict
    ("dict", "clear"),
    ("dict", "copy"),
    ("dict", "get"),
    ("dict", "items"),
    ("dict", "keys"),
    ("dict", "pop"),
    ("dict", "setdefault"),
    ("dict", "update"),
    ("dict", "values"),
    // frozenset
    ("frozenset", "copy"),
    ("frozenset", "difference"),
    ("frozenset", "intersection"),
    ("frozenset", "issubset"),
    ("frozenset", "issuperset"),
    ("frozenset", "union"),
    // generator
    ("generator", "next"),
    // list
    ("list", "append"),
    ("list", "clear"),
    ("list", "copy"),
    ("list", "count"),
    ("list", "extend"),
    ("list", "index"),
    ("list", "insert"),
    ("list", "pop"),
    ("list", "remove"),
    ("list", "reverse"),
    ("list", "sort"),
    // pattern
    ("pattern", "findall"),
    ("pattern", "fullmatch"),
    ("pattern", "match"),
    ("pattern", "search"),
    ("pattern", "split"),
    ("pattern", "sub"),
    // set
    ("set", "add"),
    ("set", "clear"),
    ("set", "copy"),
    ("set", "difference"),
    ("set", "discard"),
    ("set", "intersection"),
    ("set", "issubset"),
    ("set", "issuperset"),
    ("set", "remove"),
    ("set", "union"),
    // str
    ("str", "count"),
    ("str", "encode"),
    ("str", "endswith"),
    ("str", "find"),
    ("str", "isalpha"),
    ("str", "isdigit"),
    ("str", "isspace"),
    ("str", "join"),
    ("str", "lower"),
    ("str", "lstrip"),
    ("str", "replace"),
    ("str", "rstrip"),
    ("str", "split"),
    ("str", "splitlines"),
    ("str", "startswith"),
    ("str", "strip"),
    ("str", "upper"),
    // tuple
    ("tuple", "count"),
    ("tuple", "index"),
];

fn receiver_kind(receiver: &Value) -> Option<&'static str> {
    Some(match receiver {
        Value::Str(_) => "str",
        Value::Bytes(_) => "bytes",
        Value::Pattern(_) => "pattern",
        Value::List(_) => "list",
        Value::Tuple(_) => "tuple",
        Value::Set(_) => "set",
        Value::FrozenSet(_) => "frozenset",
        Value::Dict(_) | Value::OrderedDict(_) => "dict",
        Value::Generator(_) => "generator",
        _ => return None,
    })
}

pub fn has_method(receiver: &Value, name: &str) -> bool {
    receiver_kind(receiver).is_some_and(|kind| {
        BUILTIN_METHODS
            .binary_search_by(|&(k, m)| (k, m).cmp(&(kind, name)))
            .is_ok()
    })
}

/// Calls builtin method `name` on `receiver`.
pub fn call_method(
    ev: &mut Evaluator<'_>,
    receiver: &Value,
    name: &str,
    args: Args,
) -> EvalResult {
    match receiver {
        Value::Str(s) => strings::str_method(ev, s, name, args),
        Value::Bytes(b) => strings::bytes_method(b, name, args),
        Value::Pattern(p) => strings::pattern_method(p, name, args),
        Value::List(items) => collections::list_method(ev, items, name, args),
        Value::Tuple(items) => collections::tuple_method(items, name, args),
        Value::Set(_) | Value::FrozenSet(_) => collections::set_method(ev, receiver, name, args),
        Value::Dict(map) | Value::OrderedDict(map) => {
            collections::dict_method(ev, receiver, map, name, args)
        }
        Value::Generator(generator) => collections::generator_method(ev, generator, name, args),
        other => Err(errors::attribute_not_found(other.type_name(), name)),
    }
}

/// A `str` argument of a builtin.
pub(crate) fn str_arg<'a>(fn_name: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    value
        .as_str()
        .ok_or_else(|| errors::wrong_arg_type(fn_name, "str", value.type_name()))
}

pub(crate) fn int_arg(fn_name: &str, value: &Value) -> Result<i64, EvalError> {
    value
        .as_int()
        .ok_or_else(|| errors::wrong_arg_type(fn_name, "int", value.type_name()))
}

#[cfg(test)]
mod tests;
