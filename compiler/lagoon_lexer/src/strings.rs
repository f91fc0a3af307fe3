//! String literal scanning and cooking.
//!
//! Four literal forms exist: `'raw'`, `"escaped"`, `'''raw heredoc'''` and
//! `"""escaped heredoc"""`. Heredocs may span lines; the short forms may
//! not. Any of them may be followed by macro letters (`"#{x}"i`).

use lagoon_ir::{Span, StrLit, StringMacros};
use logos::Lexer;

use crate::escape::unescape_string;
use crate::raw_token::{bump_macro_suffix, RawToken};

#[inline]
pub(crate) fn is_macro_letter(c: char) -> bool {
    matches!(c, 'i' | 'a' | 'd' | 'l' | 'r' | '~' | 'b')
}

/// Scan the body of a single-line literal whose opening quote was just
/// matched. Returns `false` when the literal is unterminated.
pub(crate) fn scan_quoted(lex: &mut Lexer<'_, RawToken>, quote: char) -> bool {
    let escapes = quote == '"';
    let mut chars = lex.remainder().char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\n' => return false,
            '\\' if escapes => {
                chars.next();
            }
            c if c == quote => {
                lex.bump(i + c.len_utf8());
                bump_macro_suffix(lex);
                return true;
            }
            _ => {}
        }
    }
    false
}

/// Scan the body of a heredoc whose opening delimiter was just matched.
pub(crate) fn scan_heredoc(lex: &mut Lexer<'_, RawToken>, delim: &str) -> bool {
    let escapes = delim.starts_with('"');
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        if escapes && c == '\\' {
            chars.next();
            continue;
        }
        if rest[i..].starts_with(delim) {
            lex.bump(i + delim.len());
            bump_macro_suffix(lex);
            return true;
        }
    }
    false
}

/// Quote delimiter length and whether escapes are processed, per literal kind.
fn literal_shape(raw: RawToken) -> (usize, char, bool) {
    match raw {
        RawToken::SqString => (1, '\'', false),
        RawToken::DqString => (1, '"', true),
        RawToken::SqHeredoc => (3, '\'', false),
        _ => (3, '"', true),
    }
}

/// Turn a scanned literal slice (quotes and suffix included) into a [`StrLit`].
pub(crate) fn cook_string(raw: RawToken, slice: &str, span: Span) -> StrLit {
    let (delim_len, quote, escapes) = literal_shape(raw);
    let close_end = slice.rfind(quote).map_or(slice.len(), |i| i + 1);
    let body_end = close_end.saturating_sub(delim_len).max(delim_len);
    let body = &slice[delim_len..body_end];
    let macros = StringMacros::parse_suffix(&slice[close_end..]).unwrap_or_default();
    let text = if escapes {
        unescape_string(body)
    } else {
        body.to_owned()
    };
    StrLit {
        text,
        macros,
        content_start: span.start + u32::try_from(delim_len).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests;
