#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::errors::ExceptionKind;
use crate::interpreter::Interpreter;
use crate::print_handler::silent_handler;
use crate::LagoonError;

fn eval(source: &str) -> Result<Value, LagoonError> {
    Interpreter::builder()
        .print_handler(silent_handler())
        .build()
        .eval_source(source)
}

fn eval_kind(source: &str) -> Option<ExceptionKind> {
    match eval(source) {
        Err(LagoonError::Eval(err)) => err.kind(),
        _ => None,
    }
}

#[test]
fn test_dedent_removes_common_margin() {
    assert_eq!(dedent("    a\n      b\n    c"), "a\n  b\nc");
}

#[test]
fn test_dedent_blank_lines_are_emptied() {
    assert_eq!(dedent("  a\n   \n  b"), "a\n\nb");
}

#[test]
fn test_dedent_mixed_tabs_and_spaces_share_no_margin() {
    assert_eq!(dedent("\ta\n  b"), "\ta\n  b");
}

#[test]
fn test_interpolation() {
    assert_eq!(eval(r##""#{1+2}"i"##).unwrap(), Value::str("3"));
    assert_eq!(
        eval(r##""a#{'b'}c#{[1, 2]}"i"##).unwrap(),
        Value::str("abc[1, 2]")
    );
}

#[test]
fn test_without_i_braces_stay() {
    assert_eq!(eval(r##""#{1+2}""##).unwrap(), Value::str("#{1+2}"));
}

#[test]
fn test_unclosed_interpolation_is_literal() {
    assert_eq!(eval(r##""x#{1"i"##).unwrap(), Value::str("x#{1"));
}

#[test]
fn test_interpolation_sees_current_scope() {
    let chain = Interpreter::builder()
        .print_handler(silent_handler())
        .build()
        .run_source("name = 'lagoon'\ngreeting = \"hi #{name}\"i\n")
        .unwrap();
    assert_eq!(chain.lookup("greeting"), Some(Value::str("hi lagoon")));
}

#[test]
fn test_bad_interpolation_is_other_error() {
    assert_eq!(eval_kind(r##""#{1 +}"i"##), Some(ExceptionKind::OtherError));
}

#[test]
fn test_all_whitespace_macro() {
    let value = eval("\"\"\"\n    a\n      b\n    \"\"\"a").unwrap();
    assert_eq!(value, Value::str("a\n  b"));
}

#[test]
fn test_strip_one_newline_each_side() {
    assert_eq!(eval(r#""\n\nx\n\n"lr"#).unwrap(), Value::str("\nx\n"));
}

#[test]
fn test_pattern_and_bytes() {
    let Value::Pattern(pattern) = eval(r#"'\d+'~"#).unwrap() else {
        panic!("expected a pattern");
    };
    assert!(pattern.is_match("a12"));
    assert_eq!(eval("'ab'b").unwrap(), Value::bytes(b"ab".to_vec()));
}

#[test]
fn test_pattern_with_bytes_is_type_error() {
    assert_eq!(eval_kind("'a'b~"), Some(ExceptionKind::TypeError));
    assert_eq!(eval_kind("'a'~b"), Some(ExceptionKind::TypeError));
}

#[test]
fn test_invalid_pattern_is_value_error() {
    assert_eq!(eval_kind("'('~"), Some(ExceptionKind::ValueError));
}

mod prop {
    use super::*;
    use proptest::prelude::*;
    use proptest::prelude::prop;

    proptest! {
        #[test]
        fn dedent_is_idempotent(text in "[ \ta-c\n]{0,40}") {
            let once = dedent(&text);
            prop_assert_eq!(dedent(&once), once.clone());
        }

        #[test]
        fn dedent_keeps_line_count(text in "[ \ta-c\n]{0,40}") {
            prop_assert_eq!(dedent(&text).split('\n').count(), text.split('\n').count());
        }

        #[test]
        fn dedent_of_indented_block(lines in prop::collection::vec("[a-c]{1,5}", 1..6), pad in 0usize..6) {
            let margin = " ".repeat(pad);
            let text = lines.iter().map(|l| format!("{margin}{l}")).collect::<Vec<_>>().join("\n");
            prop_assert_eq!(dedent(&text), lines.join("\n"));
        }
    }
}
