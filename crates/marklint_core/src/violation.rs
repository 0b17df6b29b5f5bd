//! Violation and fix descriptor types produced by rule evaluation.

use serde::{Deserialize, Serialize};

/// Sentinel `delete_count` meaning "delete the whole line and its terminator".
pub const DELETE_LINE: i64 = -1;

/// Severity level for violations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    Error,
    /// Warning - should be reviewed.
    #[default]
    Warning,
    /// Info - informational message.
    Info,
}

/// A positional edit instruction attached to a violation.
///
/// All fields have explicit defaults so rule engines may omit them; a
/// descriptor is validated once at the boundary (see [`FixDescriptor::validate`])
/// rather than re-checked throughout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixDescriptor {
    /// Line the edit applies to (1-based). When set, it overrides the owning
    /// violation's line and is authoritative for the edit.
    pub line_number: Option<usize>,
    /// Column the edit starts at (1-based).
    pub edit_column: usize,
    /// Characters to delete from `edit_column`, or [`DELETE_LINE`] for the
    /// entire line including its terminator.
    pub delete_count: i64,
    /// Text inserted at `edit_column` after deletion.
    pub insert_text: String,
}

impl Default for FixDescriptor {
    fn default() -> Self {
        Self {
            line_number: None,
            edit_column: 1,
            delete_count: 0,
            insert_text: String::new(),
        }
    }
}

impl FixDescriptor {
    /// Creates a fix that deletes `delete_count` characters at `edit_column`
    /// (1-based) and inserts `insert_text` in their place.
    pub fn splice(edit_column: usize, delete_count: i64, insert_text: impl Into<String>) -> Self {
        Self {
            line_number: None,
            edit_column,
            delete_count,
            insert_text: insert_text.into(),
        }
    }

    /// Creates a fix that deletes the whole target line.
    pub fn delete_line() -> Self {
        Self {
            delete_count: DELETE_LINE,
            ..Self::default()
        }
    }

    /// Pins the fix to a specific line, overriding the violation's line.
    pub fn on_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    /// Returns whether this fix removes the entire line.
    pub fn is_delete_line(&self) -> bool {
        self.delete_count == DELETE_LINE
    }

    /// Boundary validation: rejects descriptors a rule engine should never
    /// produce (`delete_count < -1`, zero column). Returns `None` for
    /// malformed descriptors so the violation degrades to non-fixable.
    pub fn validate(self) -> Option<Self> {
        if self.delete_count < DELETE_LINE || self.edit_column == 0 {
            return None;
        }
        Some(self)
    }
}

/// A single rule non-compliance finding for one line.
///
/// Produced fresh on every lint pass and superseded wholesale by the next
/// pass; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Line the violation was reported on (1-based).
    pub line_number: usize,
    /// Rule identifiers, most specific first (at least one).
    pub rule_ids: Vec<String>,
    /// Human-readable description of the finding.
    pub description: String,
    /// Severity level.
    #[serde(default)]
    pub severity: Severity,
    /// Optional fix for this violation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<FixDescriptor>,
}

impl Violation {
    /// Creates a new violation without a fix.
    pub fn new<I, S>(line_number: usize, rule_ids: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line_number,
            rule_ids: rule_ids.into_iter().map(Into::into).collect(),
            description: description.into(),
            severity: Severity::default(),
            fix: None,
        }
    }

    /// Attaches a fix, validating it at the boundary. A malformed descriptor
    /// is dropped and the violation stays non-fixable.
    pub fn with_fix(mut self, fix: FixDescriptor) -> Self {
        self.fix = fix.validate();
        self
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The line the fix applies to, when the violation is fixable. The fix's
    /// own line number wins over the violation's.
    pub fn fix_line(&self) -> Option<usize> {
        let fix = self.fix.as_ref()?;
        Some(fix.line_number.unwrap_or(self.line_number))
    }
}
