//! # marklint_core
//!
//! Core engine for marklint.
//!
//! This crate provides:
//! - The violation model and fix descriptors produced by rule evaluation
//! - The fix batch resolver that applies a lint pass's fixes in one transform
//! - The single-fix translator used for interactive quick-fix actions
//! - Projection of violations into user-facing annotations
//! - Rule configuration loading and discovery
//!
//! ## Example
//!
//! ```rust,ignore
//! use marklint_core::{BuiltinEngine, RuleConfig, RuleEngine, apply_fixes};
//!
//! let config = RuleConfig::all_enabled();
//! let violations = BuiltinEngine.lint(text, &config)?;
//! let outcome = apply_fixes(text, &violations);
//! if outcome.modified {
//!     // write outcome.text back to the document
//! }
//! ```

mod annotation;
mod config;
mod engine;
mod error;
mod fixer;
mod rules;
mod translate;
mod violation;

pub use annotation::{
    Annotation, END_OF_LINE, SOURCE_NAME, fixable_count, fixed_summary, found_summary, project,
};
pub use config::{CONFIG_FILE_NAMES, RuleConfig, RuleSetting};
pub use engine::RuleEngine;
pub use error::LintError;
pub use fixer::{FixOutcome, apply_fix_batch, apply_fixes};
pub use rules::BuiltinEngine;
pub use translate::{Replacement, TextPosition, TextSpan, translate_fix};
pub use violation::{DELETE_LINE, FixDescriptor, Severity, Violation};
