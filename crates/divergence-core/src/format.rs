//! Raw text to displayable text
//!
//! Formatting is the first stage of every render, measure and spacing solve,
//! so all three always agree on what the lines are.

use crate::authenticity::is_unsupported;
use crate::params::{Alignment, DivergenceArgs, Escape};

/// Formats the text to how it will be drawn based on the arguments.
///
/// Line endings are normalized, escapes are resolved, characters without a
/// glyph become `?`, and lines are padded when `use_padding` is set.
pub fn format(text: &str, args: &DivergenceArgs) -> String {
    let unescaped = unescape(&normalize_newlines(text), args.escape);
    if args.use_padding {
        pad_lines(&unescaped, args.alignment)
    } else {
        unescaped
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn unescape(text: &str, mode: Escape) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut escape = false;

    while let Some(c) = chars.next() {
        if c == '\\' && !escape && mode != Escape::None {
            let next = chars.peek().copied();
            if mode == Escape::All || matches!(next, Some('n' | 'r')) {
                escape = true;
                continue;
            }
        }

        if escape && (c == 'n' || c == 'r') {
            out.push('\n');
        } else if c == '\t' || (escape && c == 't') {
            out.push(' ');
        } else if is_unsupported(c) {
            out.push('?');
        } else {
            out.push(c);
        }
        escape = false;
    }
    out
}

/// Pad every line with spaces to the length of the longest one
pub fn pad_lines(text: &str, alignment: Alignment) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let max_length = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let padded: Vec<String> = lines
        .iter()
        .map(|line| {
            let deficit = max_length - line.chars().count();
            let (left, right) = match alignment {
                Alignment::Near => (0, deficit),
                Alignment::Far => (deficit, 0),
                // Odd deficits put the extra space on the right
                Alignment::Center => {
                    let right = deficit.div_ceil(2);
                    (deficit - right, right)
                },
            };
            format!("{}{}{}", " ".repeat(left), line, " ".repeat(right))
        })
        .collect();
    padded.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(escape: Escape) -> DivergenceArgs {
        DivergenceArgs::default().with_escape(escape)
    }

    #[test]
    fn newline_escape_only_with_newlines_mode() {
        assert_eq!(format("#1\\n#2", &args(Escape::NewLines)), "#1\n#2");
        assert_eq!(format("#1\\n#2", &args(Escape::None)), "#1\\n#2");
        assert_eq!(format("#1\\r#2", &args(Escape::All)), "#1\n#2");
    }

    #[test]
    fn newlines_mode_keeps_other_backslashes() {
        assert_eq!(format("10\\24\\t", &args(Escape::NewLines)), "10\\24\\t");
        assert_eq!(format("a\\\\b", &args(Escape::NewLines)), "a\\\\b");
    }

    #[test]
    fn all_mode_escapes_everything() {
        assert_eq!(format("a\\tb", &args(Escape::All)), "a b");
        assert_eq!(format("a\\\\b", &args(Escape::All)), "a\\b");
        assert_eq!(format("a\\xb", &args(Escape::All)), "axb");
        // A trailing backslash swallows nothing and emits nothing
        assert_eq!(format("ab\\", &args(Escape::All)), "ab");
    }

    #[test]
    fn line_endings_and_tabs() {
        let args = args(Escape::None);
        assert_eq!(format("1\r\n2\r3", &args), "1\n2\n3");
        assert_eq!(format("1\t2", &args), "1 2");
    }

    #[test]
    fn unsupported_become_question_marks() {
        let args = args(Escape::None);
        assert_eq!(format("a€b½c", &args), "a?b?c");
        assert_eq!(format("é", &args), "é");
    }

    #[test]
    fn padding_per_alignment() {
        let text = "1\n123\n12";
        assert_eq!(pad_lines(text, Alignment::Near), "1  \n123\n12 ");
        assert_eq!(pad_lines(text, Alignment::Far), "  1\n123\n 12");
        assert_eq!(pad_lines(text, Alignment::Center), " 1 \n123\n12 ");
        assert_eq!(pad_lines("1\n1234", Alignment::Center), " 1  \n1234");
    }

    #[test]
    fn padding_applies_after_escapes() {
        let args = DivergenceArgs::default()
            .with_escape(Escape::NewLines)
            .with_padding(true)
            .with_alignment(Alignment::Far);
        assert_eq!(format("1\\n123", &args), "  1\n123");
    }
}
