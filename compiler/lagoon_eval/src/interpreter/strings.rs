//! String literal macros.
//!
//! Stages run in a fixed order whatever order the suffix letters were
//! written in: interpolate, dedent, strip one leading newline, strip one
//! trailing newline, compile as a pattern, encode to bytes.

use std::rc::Rc;

use lagoon_ir::{StrLit, StringMacros};
use regex::Regex;

use super::Evaluator;
use crate::errors::{self, EvalError, EvalResult};
use crate::value::{display, CodeUnit, Value};

impl Evaluator<'_> {
    pub(super) fn eval_str_lit(&mut self, lit: &StrLit) -> EvalResult {
        let macros = lit.macros;
        if macros.is_empty() {
            return Ok(Value::str(lit.text.as_str()));
        }
        if macros.contains(StringMacros::PATTERN | StringMacros::BYTES) {
            return Err(errors::pattern_as_bytes());
        }

        let mut text = if macros.contains(StringMacros::INTERPOLATE) {
            self.interpolate(&lit.text, lit.content_start)?
        } else {
            lit.text.clone()
        };
        if macros.contains(StringMacros::DEDENT) {
            text = dedent(&text);
        }
        if macros.contains(StringMacros::STRIP_LEADING) {
            if let Some(rest) = text.strip_prefix('\n') {
                text = rest.to_owned();
            }
        }
        if macros.contains(StringMacros::STRIP_TRAILING) && text.ends_with('\n') {
            text.pop();
        }

        if macros.contains(StringMacros::PATTERN) {
            let pattern = Regex::new(&text).map_err(|e| errors::invalid_pattern(&e.to_string()))?;
            Ok(Value::Pattern(Rc::new(pattern)))
        } else if macros.contains(StringMacros::BYTES) {
            Ok(Value::bytes(text.into_bytes()))
        } else {
            Ok(Value::str(text))
        }
    }

    /// Replaces every `#{expr}` with the display of `expr`, evaluated in
    /// the current chain. A `#{` without a closing brace is kept as is.
    fn interpolate(&mut self, text: &str, content_start: u32) -> Result<String, EvalError> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        let mut offset = 0usize;
        while let Some(open) = rest.find("#{") {
            let body_start = open + 2;
            let Some(len) = rest[body_start..].find('}') else {
                break;
            };
            out.push_str(&rest[..open]);
            let body = &rest[body_start..body_start + len];
            let base = content_start.saturating_add(u32::try_from(offset + body_start).unwrap_or(u32::MAX));
            let value = self.eval_fragment(body, base)?;
            out.push_str(&display::display(&value));
            let consumed = body_start + len + 1;
            rest = &rest[consumed..];
            offset += consumed;
        }
        out.push_str(rest);
        Ok(out)
    }

    fn eval_fragment(&mut self, body: &str, base: u32) -> EvalResult {
        let parsed = lagoon_parse::parse_expression_at(body, base).map_err(|err| {
            let (line, column) = self.unit.source.line_col(err.span);
            errors::syntax_error("string interpolation", line, column, &err.full_message())
        })?;
        let unit = Rc::new(CodeUnit {
            source: Rc::clone(&self.unit.source),
            arena: parsed.arena,
        });
        let mut fragment = self.for_unit(unit, self.chain.clone());
        fragment.eval_expr(parsed.root)
    }
}

/// Removes the whitespace prefix common to all non-blank lines.
///
/// Lines holding only spaces and tabs are emptied and do not take part in
/// finding the margin.
pub(crate) fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for line in text.split('\n') {
        let content = line.trim_start_matches([' ', '\t']);
        if content.is_empty() {
            continue;
        }
        let indent = &line[..line.len() - content.len()];
        margin = Some(match margin {
            None => indent,
            Some(m) => common_prefix(m, indent),
        });
    }
    let margin = margin.unwrap_or("");
    text.split('\n')
        .map(|line| {
            if line.trim_start_matches([' ', '\t']).is_empty() {
                ""
            } else {
                line.strip_prefix(margin).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

#[cfg(test)]
mod tests;
