//! Built-in Markdown rules with auto-fixes.

use crate::engine::RuleEngine;
use crate::violation::{FixDescriptor, Violation};
use crate::{LintError, RuleConfig};

/// The built-in rule engine. Each rule emits well-formed fix descriptors, and
/// no two fixes from one pass overlap on the same line.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinEngine;

impl RuleEngine for BuiltinEngine {
    fn lint(&self, text: &str, config: &RuleConfig) -> Result<Vec<Violation>, LintError> {
        let lines = document_lines(text);
        let mut violations = Vec::new();

        if enabled(config, "MD009", "no-trailing-spaces") {
            check_trailing_spaces(&lines, &mut violations);
        }
        if enabled(config, "MD010", "no-hard-tabs") {
            check_hard_tabs(&lines, &mut violations);
        }
        if enabled(config, "MD012", "no-multiple-blanks") {
            check_multiple_blanks(&lines, &mut violations);
        }
        if enabled(config, "MD047", "single-trailing-newline") {
            check_trailing_newline(text, &lines, &mut violations);
        }

        violations.sort_by_key(|v| v.line_number);
        Ok(violations)
    }
}

/// The document's lines, without the phantom segment a trailing newline
/// produces when splitting on '\n'.
fn document_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if text.ends_with('\n') {
        lines.pop();
    }
    lines
}

fn enabled(config: &RuleConfig, code: &str, name: &str) -> bool {
    config.is_enabled(code) && config.is_enabled(name)
}

fn check_trailing_spaces(lines: &[&str], violations: &mut Vec<Violation>) {
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim_end_matches(' ');
        if trimmed.len() < line.len() {
            let kept = trimmed.chars().count();
            let extra = line.chars().count() - kept;
            violations.push(
                Violation::new(idx + 1, ["MD009", "no-trailing-spaces"], "Trailing spaces")
                    .with_fix(FixDescriptor::splice(kept + 1, extra as i64, "")),
            );
        }
    }
}

fn check_hard_tabs(lines: &[&str], violations: &mut Vec<Violation>) {
    for (idx, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == '\t' {
                violations.push(
                    Violation::new(idx + 1, ["MD010", "no-hard-tabs"], "Hard tabs")
                        .with_fix(FixDescriptor::splice(col + 1, 1, "    ")),
                );
            }
        }
    }
}

fn check_multiple_blanks(lines: &[&str], violations: &mut Vec<Violation>) {
    let mut consecutive = 0usize;
    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            consecutive += 1;
            if consecutive > 1 {
                violations.push(
                    Violation::new(
                        idx + 1,
                        ["MD012", "no-multiple-blanks"],
                        "Multiple consecutive blank lines",
                    )
                    .with_fix(FixDescriptor::delete_line()),
                );
            }
        } else {
            consecutive = 0;
        }
    }
}

fn check_trailing_newline(text: &str, lines: &[&str], violations: &mut Vec<Violation>) {
    if text.is_empty() || text.ends_with('\n') {
        return;
    }
    let last = lines.len();
    let last_len = lines.last().map_or(0, |l| l.chars().count());
    violations.push(
        Violation::new(
            last,
            ["MD047", "single-trailing-newline"],
            "Files should end with a single newline character",
        )
        .with_fix(FixDescriptor::splice(last_len + 1, 0, "\n")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lint(text: &str) -> Vec<Violation> {
        BuiltinEngine.lint(text, &RuleConfig::all_enabled()).unwrap()
    }

    #[test]
    fn clean_document_has_no_violations() {
        assert_eq!(lint("# Title\n\nBody text.\n"), vec![]);
        assert_eq!(lint(""), vec![]);
    }

    #[test]
    fn trailing_spaces_are_flagged_with_a_fix() {
        let violations = lint("text  \n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_ids[0], "MD009");
        assert_eq!(violations[0].line_number, 1);
        let fix = violations[0].fix.as_ref().unwrap();
        assert_eq!(fix.edit_column, 5);
        assert_eq!(fix.delete_count, 2);
        assert_eq!(fix.insert_text, "");
    }

    #[test]
    fn each_tab_gets_its_own_violation() {
        let violations = lint("a\tb\tc\n");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].fix.as_ref().unwrap().edit_column, 2);
        assert_eq!(violations[1].fix.as_ref().unwrap().edit_column, 4);
    }

    #[test]
    fn extra_blank_lines_get_line_deletions() {
        let violations = lint("a\n\n\n\nb\n");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].line_number, 3);
        assert_eq!(violations[1].line_number, 4);
        assert!(violations[0].fix.as_ref().unwrap().is_delete_line());
    }

    #[test]
    fn missing_final_newline_is_flagged() {
        let violations = lint("last line");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_ids[0], "MD047");
        let fix = violations[0].fix.as_ref().unwrap();
        assert_eq!(fix.edit_column, 10);
        assert_eq!(fix.insert_text, "\n");
    }

    #[test]
    fn disabled_rules_are_skipped_under_either_identifier() {
        let config = RuleConfig::from_jsonc(r#"{"MD009": false}"#).unwrap();
        assert!(BuiltinEngine.lint("text  \n", &config).unwrap().is_empty());

        let config = RuleConfig::from_jsonc(r#"{"no-trailing-spaces": false}"#).unwrap();
        assert!(BuiltinEngine.lint("text  \n", &config).unwrap().is_empty());
    }

    #[test]
    fn violations_are_ordered_by_line() {
        let violations = lint("one\t\nclean\ntwo  \n");
        let lines: Vec<usize> = violations.iter().map(|v| v.line_number).collect();
        assert_eq!(lines, vec![1, 3]);
    }
}
