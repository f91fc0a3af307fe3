//! Error rendering for the terminal.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use lagoon_eval::{EvalError, LagoonError};

/// Prints `err` to stderr, with a source excerpt when it has a location
/// inside `text`.
pub fn error(name: &str, text: &str, err: &LagoonError) {
    match err {
        LagoonError::Parse(parse) => {
            excerpt(name, text, parse.span.to_range(), &parse.full_message(), "here");
        }
        LagoonError::Eval(EvalError::Positioned {
            line,
            column,
            source,
        }) => match offset_of(text, *line, *column) {
            Some(offset) => {
                let message = err.to_string();
                excerpt(name, text, offset..offset + 1, &message, &source.to_string());
            }
            None => {
                eprintln!("error: {err}");
                eprintln!("  caused by: {source}");
            }
        },
        LagoonError::Eval(eval) => eprintln!("error: {eval}"),
        LagoonError::Io { .. } => eprintln!("error: {err}"),
    }
}

fn excerpt(name: &str, text: &str, span: Range<usize>, message: &str, label: &str) {
    let span = span.start.min(text.len())..span.end.min(text.len());
    let printed = Report::build(ReportKind::Error, name, span.start)
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(message)
        .with_label(
            Label::new((name, span))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name, Source::from(text)));
    if printed.is_err() {
        eprintln!("error: {message}");
    }
}

/// Byte offset of a 1-based line and character column.
fn offset_of(text: &str, line: u32, column: u32) -> Option<usize> {
    let start = if line <= 1 {
        0
    } else {
        text.match_indices('\n').nth(line as usize - 2)?.0 + 1
    };
    let rest = text.get(start..)?;
    let skip = column.saturating_sub(1) as usize;
    let within = rest
        .char_indices()
        .take_while(|(_, c)| *c != '\n')
        .nth(skip)
        .map_or(rest.find('\n').unwrap_or(rest.len()), |(i, _)| i);
    Some(start + within)
}

#[cfg(test)]
mod tests {
    use super::offset_of;

    #[test]
    fn test_offset_of_counts_characters() {
        let text = "a = 1\nbé = 2\n";
        assert_eq!(offset_of(text, 1, 1), Some(0));
        assert_eq!(offset_of(text, 2, 1), Some(6));
        assert_eq!(offset_of(text, 2, 4), Some(10));
        assert_eq!(offset_of(text, 9, 1), None);
    }
}
