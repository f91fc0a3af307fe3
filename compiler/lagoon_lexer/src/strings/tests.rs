use super::*;
use pretty_assertions::assert_eq;

fn cook(raw: RawToken, slice: &str) -> StrLit {
    cook_string(raw, slice, Span::new(0, u32::try_from(slice.len()).unwrap_or(0)))
}

#[test]
fn test_raw_string_keeps_backslashes() {
    let lit = cook(RawToken::SqString, r"'a\nb'");
    assert_eq!(lit.text, r"a\nb");
    assert_eq!(lit.macros, StringMacros::empty());
    assert_eq!(lit.content_start, 1);
}

#[test]
fn test_escaped_string_with_suffix() {
    let lit = cook(RawToken::DqString, "\"#{x}\\n\"il");
    assert_eq!(lit.text, "#{x}\n");
    assert_eq!(lit.macros, StringMacros::INTERPOLATE | StringMacros::STRIP_LEADING);
}

#[test]
fn test_heredoc_bodies() {
    let lit = cook(RawToken::SqHeredoc, "'''\n  it's\n'''a");
    assert_eq!(lit.text, "\n  it's\n");
    assert_eq!(lit.macros, StringMacros::ALL_WHITESPACE);
    assert_eq!(lit.content_start, 3);

    let empty = cook(RawToken::DqHeredoc, "\"\"\"\"\"\"");
    assert_eq!(empty.text, "");
}

#[test]
fn test_macro_letters() {
    for c in ['i', 'a', 'd', 'l', 'r', '~', 'b'] {
        assert!(is_macro_letter(c));
    }
    assert!(!is_macro_letter('n'));
}
