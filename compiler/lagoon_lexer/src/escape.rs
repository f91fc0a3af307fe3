//! Escape sequence processing for double-quoted literals.
//!
//! Recognized escapes: `\n`, `\r`, `\t`, `\\`, `\"`, `\'`, `\0`, `\xHH`
//! and `\u{H...}`. Unknown escapes are kept literally (`\q` stays `\q`),
//! which keeps regular expressions such as `"\d+"~` readable.

#[inline]
fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\'' => Some('\''),
        '0' => Some('\0'),
        _ => None,
    }
}

/// Decode the digits of a `\xHH` or `\u{...}` escape.
fn resolve_numeric(kind: char, rest: &str) -> Option<(char, usize)> {
    match kind {
        'x' => {
            let digits = rest.get(..2)?;
            let code = u32::from_str_radix(digits, 16).ok()?;
            Some((char::from_u32(code)?, 2))
        }
        'u' => {
            let inner = rest.strip_prefix('{')?;
            let close = inner.find('}')?;
            let code = u32::from_str_radix(&inner[..close], 16).ok()?;
            Some((char::from_u32(code)?, close + 2))
        }
        _ => None,
    }
}

pub(crate) fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.char_indices();

    while let Some((_, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let Some((at, esc)) = chars.next() else {
            result.push('\\');
            break;
        };
        if let Some(resolved) = resolve_escape(esc) {
            result.push(resolved);
        } else if let Some((decoded, used)) = resolve_numeric(esc, &s[at + 1..]) {
            result.push(decoded);
            for _ in 0..used {
                chars.next();
            }
        } else {
            result.push('\\');
            result.push(esc);
        }
    }

    result
}
