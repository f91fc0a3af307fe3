//! Methods of strings, bytes and patterns.

use std::fmt::Write;

use regex::{Captures, Regex};

use super::str_arg;
use crate::errors::{self, EvalResult};
use crate::interpreter::Evaluator;
use crate::value::{Args, Value};

pub(super) fn str_method(ev: &mut Evaluator<'_>, s: &str, name: &str, args: Args) -> EvalResult {
    match name {
        "upper" => {
            args.check("str.upper", 0, 0)?;
            Ok(Value::str(s.to_uppercase()))
        }
        "lower" => {
            args.check("str.lower", 0, 0)?;
            Ok(Value::str(s.to_lowercase()))
        }
        "strip" | "lstrip" | "rstrip" => {
            let fn_name = format!("str.{name}");
            let chars = args.between(&fn_name, 0, 1)?;
            let set: Option<Vec<char>> = match chars.first() {
                None | Some(Value::None) => None,
                Some(v) => Some(str_arg(&fn_name, v)?.chars().collect()),
            };
            let strip_start = name != "rstrip";
            let strip_end = name != "lstrip";
            let matches = |c: char| set.as_ref().map_or(c.is_whitespace(), |set| set.contains(&c));
            let mut out = s;
            if strip_start {
                out = out.trim_start_matches(matches);
            }
            if strip_end {
                out = out.trim_end_matches(matches);
            }
            Ok(Value::str(out))
        }
        "split" => {
            let sep = args.between("str.split", 0, 1)?;
            let parts: Vec<Value> = match sep.first() {
                None | Some(Value::None) => s.split_whitespace().map(Value::from).collect(),
                Some(v) => {
                    let sep = str_arg("str.split", v)?;
                    if sep.is_empty() {
                        return Err(errors::value_error("empty separator"));
                    }
                    s.split(sep).map(Value::from).collect()
                }
            };
            Ok(Value::list(parts))
        }
        "splitlines" => {
            args.check("str.splitlines", 0, 0)?;
            Ok(Value::list(s.lines().map(Value::from).collect()))
        }
        "join" => {
            let [items] = args.exact::<1>("str.join")?;
            let items = ev.collect(&items)?;
            let mut out = String::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(s);
                }
                out.push_str(str_arg("str.join", item)?);
            }
            Ok(Value::str(out))
        }
        "replace" => {
            let [old, new] = args.exact::<2>("str.replace")?;
            let old = str_arg("str.replace", &old)?;
            let new = str_arg("str.replace", &new)?;
            Ok(Value::str(s.replace(old, new)))
        }
        "startswith" | "endswith" => {
            let fn_name = format!("str.{name}");
            let [affix] = args.exact::<1>(&fn_name)?;
            let affix = str_arg(&fn_name, &affix)?;
            Ok(Value::Bool(if name == "startswith" {
                s.starts_with(affix)
            } else {
                s.ends_with(affix)
            }))
        }
        "find" => {
            let [needle] = args.exact::<1>("str.find")?;
            let needle = str_arg("str.find", &needle)?;
            let index = s.find(needle).map_or(-1, |byte| char_index(s, byte));
            Ok(Value::Int(index))
        }
        "count" => {
            let [needle] = args.exact::<1>("str.count")?;
            let needle = str_arg("str.count", &needle)?;
            let n = if needle.is_empty() {
                s.chars().count() + 1
            } else {
                s.matches(needle).count()
            };
            Ok(Value::Int(i64::try_from(n).unwrap_or(i64::MAX)))
        }
        "isdigit" | "isalpha" | "isspace" => {
            args.check(name, 0, 0)?;
            let test: fn(char) -> bool = match name {
                "isdigit" => |c| c.is_ascii_digit(),
                "isalpha" => char::is_alphabetic,
                _ => char::is_whitespace,
            };
            Ok(Value::Bool(!s.is_empty() && s.chars().all(test)))
        }
        "encode" => {
            args.check("str.encode", 0, 0)?;
            Ok(Value::bytes(s.as_bytes().to_vec()))
        }
        _ => Err(errors::attribute_not_found("str", name)),
    }
}

fn char_index(s: &str, byte: usize) -> i64 {
    i64::try_from(s[..byte].chars().count()).unwrap_or(i64::MAX)
}

pub(super) fn bytes_method(b: &[u8], name: &str, args: Args) -> EvalResult {
    match name {
        "decode" => {
            args.check("bytes.decode", 0, 0)?;
            std::str::from_utf8(b)
                .map(Value::from)
                .map_err(|e| errors::value_error(format!("cannot decode bytes: {e}")))
        }
        "hex" => {
            args.check("bytes.hex", 0, 0)?;
            let mut out = String::with_capacity(b.len() * 2);
            for byte in b {
                let _ = write!(out, "{byte:02x}");
            }
            Ok(Value::str(out))
        }
        "startswith" | "endswith" => {
            let fn_name = format!("bytes.{name}");
            let [affix] = args.exact::<1>(&fn_name)?;
            let Value::Bytes(affix) = &affix else {
                return Err(errors::wrong_arg_type(&fn_name, "bytes", affix.type_name()));
            };
            Ok(Value::Bool(if name == "startswith" {
                b.starts_with(affix)
            } else {
                b.ends_with(affix)
            }))
        }
        _ => Err(errors::attribute_not_found("bytes", name)),
    }
}

/// Pattern methods. Matches are tuples of the whole match followed by
/// each group (`none` for groups that did not take part).
pub(super) fn pattern_method(pattern: &Regex, name: &str, args: Args) -> EvalResult {
    match name {
        "match" | "search" | "fullmatch" => {
            let fn_name = format!("pattern.{name}");
            let [text] = args.exact::<1>(&fn_name)?;
            let text = str_arg(&fn_name, &text)?;
            let found = pattern.captures(text).filter(|caps| {
                caps.get(0).is_some_and(|m| match name {
                    "match" => m.start() == 0,
                    "fullmatch" => m.start() == 0 && m.end() == text.len(),
                    _ => true,
                })
            });
            match found {
                Some(caps) => Ok(match_tuple(&caps)),
                None if name == "search" => Ok(Value::None),
                None => anchored_match(pattern, name, text),
            }
        }
        "findall" => {
            let [text] = args.exact::<1>("pattern.findall")?;
            let text = str_arg("pattern.findall", &text)?;
            let groups = pattern.captures_len() - 1;
            let found = pattern
                .captures_iter(text)
                .map(|caps| match groups {
                    0 => group_value(&caps, 0),
                    1 => group_value(&caps, 1),
                    _ => Value::tuple((1..=groups).map(|i| group_value(&caps, i)).collect()),
                })
                .collect();
            Ok(Value::list(found))
        }
        "sub" => {
            let [replacement, text] = args.exact::<2>("pattern.sub")?;
            let replacement = str_arg("pattern.sub", &replacement)?;
            let text = str_arg("pattern.sub", &text)?;
            Ok(Value::str(pattern.replace_all(text, replacement).into_owned()))
        }
        "split" => {
            let [text] = args.exact::<1>("pattern.split")?;
            let text = str_arg("pattern.split", &text)?;
            Ok(Value::list(pattern.split(text).map(Value::from).collect()))
        }
        _ => Err(errors::attribute_not_found("pattern", name)),
    }
}

/// `match` and `fullmatch` when the leftmost match is not anchored: retry
/// with the pattern anchored, since a later-starting leftmost match can
/// hide an anchored one of a different length.
fn anchored_match(pattern: &Regex, name: &str, text: &str) -> EvalResult {
    let anchored = if name == "fullmatch" {
        format!(r"\A(?:{})\z", pattern.as_str())
    } else {
        format!(r"\A(?:{})", pattern.as_str())
    };
    let anchored = Regex::new(&anchored).map_err(|e| errors::invalid_pattern(&e.to_string()))?;
    Ok(anchored
        .captures(text)
        .map_or(Value::None, |caps| match_tuple(&caps)))
}

fn match_tuple(caps: &Captures<'_>) -> Value {
    Value::tuple((0..caps.len()).map(|i| group_value(caps, i)).collect())
}

fn group_value(caps: &Captures<'_>, index: usize) -> Value {
    caps.get(index)
        .map_or(Value::None, |m| Value::str(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(src: &str) -> Regex {
        Regex::new(src).unwrap_or_else(|e| panic!("bad test pattern: {e}"))
    }

    #[test]
    fn test_match_is_anchored_at_start() {
        let p = pattern(r"\d+");
        let args = || Args::positional([Value::str("ab12")]);
        assert_eq!(pattern_method(&p, "match", args()).ok(), Some(Value::None));
        assert_eq!(
            pattern_method(&p, "search", args()).ok(),
            Some(Value::tuple(vec![Value::str("12")]))
        );
    }

    #[test]
    fn test_fullmatch_retries_anchored() {
        let p = pattern("a|ab");
        let result = pattern_method(&p, "fullmatch", Args::positional([Value::str("ab")]));
        assert_eq!(result.ok(), Some(Value::tuple(vec![Value::str("ab")])));
    }

    #[test]
    fn test_findall_with_groups() {
        let p = pattern(r"(\w)=(\d)");
        let result = pattern_method(&p, "findall", Args::positional([Value::str("a=1 b=2")]));
        assert_eq!(
            result.ok(),
            Some(Value::list(vec![
                Value::tuple(vec![Value::str("a"), Value::str("1")]),
                Value::tuple(vec![Value::str("b"), Value::str("2")]),
            ]))
        );
    }

    #[test]
    fn test_bytes_hex_and_decode() {
        let b = b"hi";
        assert_eq!(bytes_method(b, "hex", Args::new()).ok(), Some(Value::str("6869")));
        assert_eq!(bytes_method(b, "decode", Args::new()).ok(), Some(Value::str("hi")));
        let bad = bytes_method(&[0xff], "decode", Args::new());
        assert_eq!(
            bad.err().and_then(|e| e.kind()),
            Some(errors::ExceptionKind::ValueError)
        );
    }
}
