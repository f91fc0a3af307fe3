use super::*;

#[test]
fn test_line_from_offset_multiple_lines() {
    let table = LineOffsetTable::build("line1\nline2\nline3");
    assert_eq!(table.line_from_offset(0), 1);
    assert_eq!(table.line_from_offset(5), 1); // '\n' after line1
    assert_eq!(table.line_from_offset(6), 2);
    assert_eq!(table.line_from_offset(12), 3);
    assert_eq!(table.line_count(), 3);
}

#[test]
fn test_offset_to_line_col() {
    let source = "abc\ndefgh\nij";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
    assert_eq!(table.offset_to_line_col(source, 2), (1, 3));
    assert_eq!(table.offset_to_line_col(source, 4), (2, 1));
    assert_eq!(table.offset_to_line_col(source, 7), (2, 4));
    assert_eq!(table.offset_to_line_col(source, 10), (3, 1));
}

#[test]
fn test_columns_count_characters() {
    let source = "é = 1\nxé";
    let table = LineOffsetTable::build(source);
    // 'é' is two bytes; '=' is the third character on line 1
    assert_eq!(table.offset_to_line_col(source, 3), (1, 3));
}

#[test]
fn test_source_text_line_col_and_slice() {
    let src = SourceText::new("x = 1\ny = oops").with_path("demo.lg");
    assert_eq!(src.line_col(Span::new(10, 14)), (2, 5));
    assert_eq!(src.slice(Span::new(10, 14)), "oops");
    assert_eq!(src.name(), "demo.lg");
}

#[test]
fn test_source_text_without_path() {
    let src = SourceText::new("1");
    assert!(src.path().is_none());
    assert_eq!(src.name(), "<source>");
    assert_eq!(src.slice(Span::new(5, 9)), "");
}

mod prop {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn line_matches_newline_count(text in "[a-c\n]{0,40}", cut in 0usize..40) {
            let offset = cut.min(text.len());
            let table = LineOffsetTable::build(&text);
            let (line, col) = table.offset_to_line_col(&text, offset as u32);
            let prefix = &text[..offset];
            prop_assert_eq!(line as usize, prefix.matches('\n').count() + 1);
            let since_newline = prefix.rsplit('\n').next().map_or(0, str::len);
            prop_assert_eq!(col as usize, since_newline + 1);
        }
    }
}
