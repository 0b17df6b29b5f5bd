//! Rule engine boundary.

use crate::{LintError, RuleConfig, Violation};

/// The rule evaluation boundary: given document text and a rule
/// configuration, produce the violations for one lint pass.
///
/// Implementations must be pure with respect to their inputs; the violations
/// they return are only meaningful against the exact text snapshot they were
/// computed from. Fixes emitted within one pass must not target overlapping
/// column ranges on the same line.
pub trait RuleEngine: Send + Sync {
    /// Runs one lint pass over `text`.
    fn lint(&self, text: &str, config: &RuleConfig) -> Result<Vec<Violation>, LintError>;
}
