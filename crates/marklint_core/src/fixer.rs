//! Fix batch resolver: applies one lint pass's fixes as a single transform.

use std::borrow::Cow;

use tracing::debug;

use crate::violation::{FixDescriptor, Violation};

/// Result of applying a fix batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The text after all applicable fixes.
    pub text: String,
    /// Number of fixes that were applied.
    pub applied: usize,
    /// Whether the text differs from the input. Callers only write the
    /// document back when this is true.
    pub modified: bool,
}

impl FixOutcome {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            applied: 0,
            modified: false,
        }
    }
}

/// Applies every fix carried by `violations` to `text`.
///
/// The batch is only meaningful against the exact text snapshot the
/// violations were computed from; fixes whose line no longer exists are
/// skipped rather than treated as errors.
pub fn apply_fixes(text: &str, violations: &[Violation]) -> FixOutcome {
    let batch: Vec<(usize, &FixDescriptor)> = violations
        .iter()
        .filter_map(|v| Some((v.fix_line()?, v.fix.as_ref()?)))
        .collect();

    if batch.is_empty() {
        return FixOutcome::unchanged(text);
    }

    let (fixed, applied) = run_batch(text, batch);
    FixOutcome {
        modified: fixed != text,
        text: fixed,
        applied,
    }
}

/// Applies a raw batch of `(line, fix)` pairs to `text` and returns the
/// transformed text. Lines are 1-based.
pub fn apply_fix_batch(text: &str, fixes: &[(usize, &FixDescriptor)]) -> String {
    run_batch(text, fixes.to_vec()).0
}

/// Core transform. Fixes are sorted by descending line, then descending
/// column within a line, so that every edit lands strictly below or to the
/// right of all still-pending edits. Edits there never shift the coordinates
/// of edits above or to the left, which makes a single pass safe with no
/// offset remapping.
fn run_batch(text: &str, mut fixes: Vec<(usize, &FixDescriptor)>) -> (String, usize) {
    // Split on '\n' only; the trailing empty segment preserves a final
    // newline across the round trip. Mixed terminators are unsupported input.
    let mut lines: Vec<Cow<'_, str>> = text.split('\n').map(Cow::Borrowed).collect();

    fixes.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.edit_column.cmp(&a.1.edit_column)));

    let mut applied = 0;
    for (line_number, fix) in fixes {
        if line_number == 0 || line_number > lines.len() {
            // Stale batch against mutated text; skip, don't fail.
            debug!(line_number, "fix targets a line outside the document, skipping");
            continue;
        }
        let idx = line_number - 1;

        if fix.is_delete_line() {
            lines.remove(idx);
        } else {
            let spliced = splice_line(&lines[idx], fix);
            lines[idx] = Cow::Owned(spliced);
        }
        applied += 1;
    }

    (lines.join("\n"), applied)
}

fn splice_line(line: &str, fix: &FixDescriptor) -> String {
    let col = fix.edit_column.saturating_sub(1);
    let delete = usize::try_from(fix.delete_count).unwrap_or(0);

    let start = byte_at_char(line, col);
    let end = byte_at_char(line, col.saturating_add(delete));

    let mut spliced = String::with_capacity(line.len() + fix.insert_text.len());
    spliced.push_str(&line[..start]);
    spliced.push_str(&fix.insert_text);
    spliced.push_str(&line[end..]);
    spliced
}

/// Byte offset of the `chars`-th character, clamped to the end of the line.
/// The clamp is what makes over-long delete counts truncate instead of panic.
fn byte_at_char(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::FixDescriptor;
    use pretty_assertions::assert_eq;

    fn fixable(line: usize, fix: FixDescriptor) -> Violation {
        Violation::new(line, ["MD000", "test-rule"], "test").with_fix(fix)
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let text = "alpha\nbeta\n";
        let outcome = apply_fixes(text, &[]);
        assert_eq!(outcome.text, text);
        assert_eq!(outcome.applied, 0);
        assert!(!outcome.modified);
    }

    #[test]
    fn single_splice() {
        let outcome = apply_fixes("hello world", &[fixable(1, FixDescriptor::splice(7, 5, "there"))]);
        assert_eq!(outcome.text, "hello there");
        assert_eq!(outcome.applied, 1);
        assert!(outcome.modified);
    }

    #[test]
    fn fixes_on_different_lines_do_not_disturb_each_other() {
        let text = (1..=10).map(|n| format!("line{n}")).collect::<Vec<_>>().join("\n");
        let violations = vec![
            fixable(3, FixDescriptor::splice(1, 4, "third")),
            fixable(5, FixDescriptor::splice(1, 4, "fifth")),
        ];
        let outcome = apply_fixes(&text, &violations);
        let lines: Vec<&str> = outcome.text.split('\n').collect();
        assert_eq!(lines[2], "third3");
        assert_eq!(lines[4], "fifth5");
        assert_eq!(lines[9], "line10");

        // Same result regardless of the order the caller listed them in.
        let reversed: Vec<Violation> = violations.into_iter().rev().collect();
        assert_eq!(apply_fixes(&text, &reversed).text, outcome.text);
    }

    #[test]
    fn whole_line_deletion_shifts_later_indices_correctly() {
        // Delete line 2 and edit line 4. Descending order processes line 4
        // first, so the edit lands on the original "d" before "b" vanishes.
        let text = "a\nb\nc\nd\ne";
        let violations = vec![
            fixable(2, FixDescriptor::delete_line()),
            fixable(4, FixDescriptor::splice(1, 1, "D")),
        ];
        let outcome = apply_fixes(text, &violations);
        assert_eq!(outcome.text, "a\nc\nD\ne");
        assert_eq!(outcome.applied, 2);
    }

    #[test]
    fn same_line_columns_apply_right_to_left() {
        let text = "abcdefgh";
        let violations = vec![
            fixable(1, FixDescriptor::splice(1, 0, "X")),
            fixable(1, FixDescriptor::splice(5, 0, "Y")),
        ];
        let outcome = apply_fixes(text, &violations);
        assert_eq!(outcome.text, "XabcYdefgh");
    }

    #[test]
    fn out_of_range_line_is_skipped_and_rest_applies() {
        let text = "one\ntwo";
        let violations = vec![
            fixable(9, FixDescriptor::splice(1, 3, "nine")),
            fixable(2, FixDescriptor::splice(1, 3, "TWO")),
        ];
        let outcome = apply_fixes(text, &violations);
        assert_eq!(outcome.text, "one\nTWO");
        assert_eq!(outcome.applied, 1);
    }

    #[test]
    fn delete_count_clamps_at_end_of_line() {
        let outcome = apply_fixes("short\nlines", &[fixable(1, FixDescriptor::splice(3, 100, ""))]);
        assert_eq!(outcome.text, "sh\nlines");
    }

    #[test]
    fn column_beyond_line_end_appends() {
        let outcome = apply_fixes("ab", &[fixable(1, FixDescriptor::splice(10, 0, "!"))]);
        assert_eq!(outcome.text, "ab!");
    }

    #[test]
    fn trailing_newline_round_trips() {
        let outcome = apply_fixes("a\nb\n", &[fixable(1, FixDescriptor::splice(1, 1, "A"))]);
        assert_eq!(outcome.text, "A\nb\n");
    }

    #[test]
    fn deleting_the_last_line_removes_its_terminator_slot() {
        let outcome = apply_fixes("a\nb\nc", &[fixable(3, FixDescriptor::delete_line())]);
        assert_eq!(outcome.text, "a\nb");
    }

    #[test]
    fn multibyte_columns_are_character_based() {
        // Columns count characters, not bytes.
        let outcome = apply_fixes("héllo", &[fixable(1, FixDescriptor::splice(2, 1, "e"))]);
        assert_eq!(outcome.text, "hello");
    }

    #[test]
    fn descriptor_line_number_overrides_violation_line() {
        let text = "a\nb";
        let v = Violation::new(1, ["MD000"], "test")
            .with_fix(FixDescriptor::splice(1, 1, "B").on_line(2));
        let outcome = apply_fixes(text, &[v]);
        assert_eq!(outcome.text, "a\nB");
    }

    #[test]
    fn identical_text_reports_unmodified() {
        // A fix that happens to rewrite a line to its current content.
        let outcome = apply_fixes("same", &[fixable(1, FixDescriptor::splice(1, 4, "same"))]);
        assert_eq!(outcome.applied, 1);
        assert!(!outcome.modified);
    }
}
