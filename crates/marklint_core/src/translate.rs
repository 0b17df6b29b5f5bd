//! Single-fix translator: one descriptor to one editor-agnostic replacement.

use crate::violation::FixDescriptor;

/// A position in a document, 0-based line and character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextPosition {
    pub line: usize,
    pub character: usize,
}

impl TextPosition {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A half-open span between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    pub start: TextPosition,
    pub end: TextPosition,
}

/// A span plus its replacement text, ready to hand to an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: TextSpan,
    pub text: String,
}

/// Converts one fix descriptor into a replacement against a live document
/// view, for interactive "apply this one fix" actions.
///
/// `line_number` is the owning violation's 1-based line; the descriptor's own
/// line number wins when set. Returns `None` for out-of-range lines and for
/// descriptors with nothing to do, never an error: the input may be slightly
/// stale by design.
///
/// For a single isolated fix the resulting replacement produces the same text
/// the batch resolver would.
pub fn translate_fix(
    fix: &FixDescriptor,
    line_number: usize,
    lines: &[&str],
) -> Option<Replacement> {
    let line_number = fix.line_number.unwrap_or(line_number);
    if line_number == 0 || line_number > lines.len() {
        return None;
    }
    let idx = line_number - 1;
    let line_chars = lines[idx].chars().count();

    if fix.is_delete_line() {
        // Consume the terminator by spanning to the start of the next line.
        // The last line has no trailing terminator, so its deletion takes the
        // preceding one instead, matching what the batch resolver produces
        // when it drops the line from the sequence.
        let span = if idx + 1 < lines.len() {
            TextSpan {
                start: TextPosition::new(idx, 0),
                end: TextPosition::new(idx + 1, 0),
            }
        } else if idx > 0 {
            TextSpan {
                start: TextPosition::new(idx - 1, lines[idx - 1].chars().count()),
                end: TextPosition::new(idx, line_chars),
            }
        } else {
            TextSpan {
                start: TextPosition::new(idx, 0),
                end: TextPosition::new(idx, line_chars),
            }
        };
        return Some(Replacement {
            span,
            text: String::new(),
        });
    }

    if fix.delete_count == 0 && fix.insert_text.is_empty() {
        return None;
    }

    let col = fix.edit_column.saturating_sub(1).min(line_chars);
    let delete = usize::try_from(fix.delete_count).unwrap_or(0);
    let end = col.saturating_add(delete).min(line_chars);

    Some(Replacement {
        span: TextSpan {
            start: TextPosition::new(idx, col),
            end: TextPosition::new(idx, end),
        },
        text: fix.insert_text.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixer::apply_fixes;
    use crate::violation::Violation;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Applies a replacement to text the way an editor would, for comparing
    /// against the batch resolver.
    fn apply_replacement(text: &str, r: &Replacement) -> String {
        let lines: Vec<&str> = text.split('\n').collect();
        let offset_of = |pos: &TextPosition| -> usize {
            let mut offset = 0;
            for line in &lines[..pos.line] {
                offset += line.len() + 1;
            }
            offset
                + lines[pos.line]
                    .char_indices()
                    .nth(pos.character)
                    .map(|(i, _)| i)
                    .unwrap_or(lines[pos.line].len())
        };
        let start = offset_of(&r.span.start);
        let end = offset_of(&r.span.end);
        format!("{}{}{}", &text[..start], r.text, &text[end..])
    }

    #[test]
    fn out_of_range_line_returns_none() {
        let fix = FixDescriptor::splice(1, 1, "x");
        assert_eq!(translate_fix(&fix, 5, &["only"]), None);
        assert_eq!(translate_fix(&fix, 0, &["only"]), None);
    }

    #[test]
    fn nothing_to_do_returns_none() {
        let fix = FixDescriptor::splice(3, 0, "");
        assert_eq!(translate_fix(&fix, 1, &["line"]), None);
    }

    #[test]
    fn deletion_span_covers_the_deleted_characters() {
        let fix = FixDescriptor::splice(3, 4, "XY");
        let r = translate_fix(&fix, 1, &["abcdefgh"]).unwrap();
        assert_eq!(r.span.start, TextPosition::new(0, 2));
        assert_eq!(r.span.end, TextPosition::new(0, 6));
        assert_eq!(r.text, "XY");
    }

    #[test]
    fn zero_width_insertion() {
        let fix = FixDescriptor::splice(4, 0, "!");
        let r = translate_fix(&fix, 1, &["abcdef"]).unwrap();
        assert_eq!(r.span.start, r.span.end);
        assert_eq!(r.span.start, TextPosition::new(0, 3));
    }

    #[test]
    fn line_deletion_consumes_the_terminator() {
        let fix = FixDescriptor::delete_line();
        let r = translate_fix(&fix, 2, &["a", "b", "c"]).unwrap();
        assert_eq!(r.span.start, TextPosition::new(1, 0));
        assert_eq!(r.span.end, TextPosition::new(2, 0));
        assert_eq!(r.text, "");
    }

    #[test]
    fn deleting_the_last_line_takes_the_preceding_terminator() {
        let fix = FixDescriptor::delete_line();
        let r = translate_fix(&fix, 3, &["a", "b", "final"]).unwrap();
        assert_eq!(r.span.start, TextPosition::new(1, 1));
        assert_eq!(r.span.end, TextPosition::new(2, 5));
    }

    #[test]
    fn deleting_the_only_line_spans_its_content() {
        let fix = FixDescriptor::delete_line();
        let r = translate_fix(&fix, 1, &["solo"]).unwrap();
        assert_eq!(r.span.start, TextPosition::new(0, 0));
        assert_eq!(r.span.end, TextPosition::new(0, 4));
    }

    #[test]
    fn descriptor_line_overrides_argument() {
        let fix = FixDescriptor::splice(1, 1, "B").on_line(2);
        let r = translate_fix(&fix, 1, &["a", "b"]).unwrap();
        assert_eq!(r.span.start.line, 1);
    }

    #[rstest]
    #[case("abc\ndef\nghi", 2, FixDescriptor::splice(2, 1, "E"))]
    #[case("abc\ndef\nghi", 2, FixDescriptor::delete_line())]
    #[case("abc\ndef", 2, FixDescriptor::delete_line())]
    #[case("abc", 1, FixDescriptor::splice(4, 0, "!"))]
    #[case("abc", 1, FixDescriptor::splice(2, 100, ""))]
    fn single_fix_matches_batch_resolver(
        #[case] text: &str,
        #[case] line: usize,
        #[case] fix: FixDescriptor,
    ) {
        let lines: Vec<&str> = text.split('\n').collect();
        let r = translate_fix(&fix, line, &lines).expect("translatable fix");
        let via_translate = apply_replacement(text, &r);

        let violation = Violation::new(line, ["MD000"], "test").with_fix(fix);
        let via_batch = apply_fixes(text, &[violation]).text;

        assert_eq!(via_translate, via_batch);
    }
}
