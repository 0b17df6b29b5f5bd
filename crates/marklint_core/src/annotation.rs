//! Projection of violations into user-facing annotations.

use crate::violation::{FixDescriptor, Severity, Violation};

/// Source tag attached to every annotation this tool produces.
pub const SOURCE_NAME: &str = "marklint";

/// Sentinel end column meaning "rest of the line". Lets an annotation
/// underline a whole line without computing its length; consumers clamp it.
pub const END_OF_LINE: usize = usize::MAX;

/// A user-facing representation of one violation. Ephemeral: the set for a
/// document is replaced wholesale on every lint pass and dropped on close.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Display line (0-based).
    pub line: usize,
    /// Start column of the underline (0-based).
    pub col_start: usize,
    /// End column of the underline; [`END_OF_LINE`] for the whole line.
    pub col_end: usize,
    /// "MD009/no-trailing-spaces: Trailing spaces" style message.
    pub message: String,
    pub severity: Severity,
    /// Stable identifier: the first rule id.
    pub rule_code: String,
    /// The fix carried over from the violation, when present.
    pub fix: Option<FixDescriptor>,
    /// Source line the fix applies to (1-based), when fixable.
    pub fix_line: Option<usize>,
}

impl Annotation {
    pub fn fixable(&self) -> bool {
        self.fix.is_some()
    }
}

/// Maps each violation to one annotation spanning its full reported line.
pub fn project(violations: &[Violation]) -> Vec<Annotation> {
    violations
        .iter()
        .map(|v| Annotation {
            line: v.line_number.saturating_sub(1),
            col_start: 0,
            col_end: END_OF_LINE,
            message: format!("{}: {}", v.rule_ids.join("/"), v.description),
            severity: v.severity,
            rule_code: v.rule_ids.first().cloned().unwrap_or_default(),
            fix: v.fix.clone(),
            fix_line: v.fix_line(),
        })
        .collect()
}

/// Number of annotations carrying a fix.
pub fn fixable_count(annotations: &[Annotation]) -> usize {
    annotations.iter().filter(|a| a.fixable()).count()
}

/// "Found N issues (M auto-fixable)" summary for a lint pass.
pub fn found_summary(total: usize, fixable: usize) -> String {
    format!(
        "Found {total} issue{} ({fixable} auto-fixable)",
        plural(total)
    )
}

/// Summary after a fix pass: "Fixed M issues" or the no-op message.
pub fn fixed_summary(applied: usize) -> String {
    if applied == 0 {
        "No auto-fixable issues found".to_string()
    } else {
        format!("Fixed {applied} issue{}", plural(applied))
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn projection_spans_the_whole_line() {
        let violations = vec![
            Violation::new(3, ["MD009", "no-trailing-spaces"], "Trailing spaces")
                .with_fix(FixDescriptor::splice(5, 2, "")),
            Violation::new(7, ["MD001"], "Heading increment"),
        ];
        let annotations = project(&violations);

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].line, 2);
        assert_eq!(annotations[0].col_start, 0);
        assert_eq!(annotations[0].col_end, END_OF_LINE);
        assert_eq!(
            annotations[0].message,
            "MD009/no-trailing-spaces: Trailing spaces"
        );
        assert_eq!(annotations[0].rule_code, "MD009");
        assert_eq!(annotations[0].fix_line, Some(3));
        assert!(annotations[0].fixable());

        assert_eq!(annotations[1].rule_code, "MD001");
        assert!(!annotations[1].fixable());
        assert_eq!(fixable_count(&annotations), 1);
    }

    #[test]
    fn summaries_handle_plurals() {
        assert_eq!(found_summary(1, 1), "Found 1 issue (1 auto-fixable)");
        assert_eq!(found_summary(3, 2), "Found 3 issues (2 auto-fixable)");
        assert_eq!(fixed_summary(0), "No auto-fixable issues found");
        assert_eq!(fixed_summary(1), "Fixed 1 issue");
        assert_eq!(fixed_summary(4), "Fixed 4 issues");
    }
}
