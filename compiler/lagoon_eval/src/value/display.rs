//! String conversion of values.
//!
//! [`display`] is what `print`, `Str(x)` and `#{...}` interpolation show;
//! [`repr`] quotes strings and is used inside containers and by `repr(x)`.
//! Containers print with Lagoon's literal syntax.

use std::fmt::Write;

use super::{Key, Value};

/// Nesting depth past which containers print as `...`.
const MAX_DEPTH: usize = 32;

pub fn display(value: &Value) -> String {
    match value {
        Value::Str(s) => s.to_string(),
        Value::Exception(e) => e.message.to_string(),
        _ => repr(value),
    }
}

pub fn repr(value: &Value) -> String {
    let mut out = String::new();
    write_repr(&mut out, value, 0);
    out
}

/// Description of a raised value for error messages.
pub fn raised(value: &Value) -> String {
    match value {
        Value::Exception(e) if e.message.is_empty() => e.kind.name().to_owned(),
        Value::Exception(e) => format!("{}: {}", e.kind, e.message),
        other => format!("raised {}", repr(other)),
    }
}

pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_owned()
    } else if f.is_infinite() {
        String::from(if f > 0.0 { "inf" } else { "-inf" })
    } else if f != 0.0 && (f.abs() >= 1e16 || f.abs() < 1e-4) {
        format!("{f:e}")
    } else if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

fn write_repr(out: &mut String, value: &Value, depth: usize) {
    if depth > MAX_DEPTH {
        out.push_str("...");
        return;
    }
    match value {
        Value::None => out.push_str("none"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float(f) => out.push_str(&format_float(*f)),
        Value::Str(s) => write_quoted(out, s),
        Value::Bytes(b) => {
            out.push('\'');
            for byte in b.iter() {
                match byte {
                    b'\'' => out.push_str("\\'"),
                    b'\\' => out.push_str("\\\\"),
                    b'\n' => out.push_str("\\n"),
                    0x20..=0x7e => out.push(char::from(*byte)),
                    _ => {
                        let _ = write!(out, "\\x{byte:02x}");
                    }
                }
            }
            out.push_str("'b");
        }
        Value::Pattern(p) => {
            write_quoted(out, p.as_str());
            out.push('~');
        }
        Value::List(items) => {
            write_items(out, "[", items.borrow().iter(), "]", depth);
        }
        Value::Tuple(items) => {
            if items.len() == 1 {
                out.push('(');
                write_repr(out, &items[0], depth + 1);
                out.push_str(",)");
            } else {
                write_items(out, "(", items.iter(), ")", depth);
            }
        }
        Value::Set(items) => {
            write_items(out, "{|", items.borrow().iter().map(Key::value), "|}", depth);
        }
        Value::FrozenSet(items) => {
            write_items(out, "(|", items.iter().map(Key::value), "|)", depth);
        }
        Value::Dict(map) => write_map(out, "{:", &map.borrow(), ":}", depth),
        Value::OrderedDict(map) => write_map(out, "[:", &map.borrow(), ":]", depth),
        Value::Range(r) => {
            if r.step == 1 {
                let _ = write!(out, "{}..{}", r.start, r.stop);
            } else {
                let _ = write!(out, "range({}, {}, {})", r.start, r.stop, r.step);
            }
        }
        Value::Generator(_) => out.push_str("<generator>"),
        Value::Table(t) => {
            out.push('{');
            for (i, (name, slot)) in t.slots().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{name} = ");
                write_repr(out, slot, depth + 1);
            }
            out.push('}');
        }
        Value::Function(f) => {
            let _ = write!(out, "<function/{}>", f.def.params.len());
        }
        Value::Bound(b) => {
            let _ = write!(out, "<bound function/{}>", b.func.def.params.len());
        }
        Value::Native(n) => {
            let _ = write!(out, "<builtin {}>", n.name);
        }
        Value::Method(m) => {
            let _ = write!(out, "<method {}.{}>", m.receiver.type_name(), m.name);
        }
        Value::Type(t) => {
            let _ = write!(out, "<type {}>", t.name());
        }
        Value::ExceptionType(k) => {
            let _ = write!(out, "<type {k}>");
        }
        Value::Exception(e) => {
            let _ = write!(out, "{}(", e.kind);
            write_quoted(out, &e.message);
            out.push(')');
        }
        Value::Module(m) => {
            let _ = write!(out, "<module {}>", m.name);
        }
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn write_items<'a>(
    out: &mut String,
    open: &str,
    items: impl Iterator<Item = &'a Value>,
    close: &str,
    depth: usize,
) {
    out.push_str(open);
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_repr(out, item, depth + 1);
    }
    out.push_str(close);
}

fn write_map(out: &mut String, open: &str, map: &super::ValueMap, close: &str, depth: usize) {
    out.push_str(open);
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_repr(out, key.value(), depth + 1);
        out.push_str(": ");
        write_repr(out, value, depth + 1);
    }
    out.push_str(close);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_formatting() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(1e20), "1e20");
    }

    #[test]
    fn test_single_element_tuple() {
        assert_eq!(repr(&Value::tuple(vec![Value::Int(1)])), "(1,)");
    }

    #[test]
    fn test_strings_quote_only_in_repr() {
        let s = Value::str("it's");
        assert_eq!(display(&s), "it's");
        assert_eq!(repr(&s), "'it\\'s'");
    }
}
