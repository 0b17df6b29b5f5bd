//! LSP backend state management.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tower_lsp::lsp_types::Url;

use marklint_core::{Annotation, RuleConfig, RuleSetting};

/// Document content and version cache.
#[derive(Debug)]
pub(crate) struct DocumentData {
    pub text: String,
    pub version: i32,
}

/// Shared backend state.
///
/// The annotation store is the single process-wide collection keyed by
/// document identity: a lint pass replaces a document's entry wholesale,
/// closing the document removes it. Last write wins per document.
pub(crate) struct BackendState {
    /// Document contents cache.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Per-document annotations from the most recent successful lint pass.
    pub annotations: RwLock<HashMap<Url, Vec<Annotation>>>,
    /// Effective rule configuration.
    pub config: RwLock<RuleConfig>,
    /// Inline rule settings sent by the editor; take precedence over files.
    pub inline_settings: RwLock<Option<BTreeMap<String, RuleSetting>>>,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("documents", &"<HashMap<Url, DocumentData>>")
            .field("annotations", &"<HashMap<Url, Vec<Annotation>>>")
            .field("workspace_root", &self.workspace_root)
            .finish()
    }
}

impl BackendState {
    /// Creates a new empty state with the all-enabled configuration.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            annotations: RwLock::new(HashMap::new()),
            config: RwLock::new(RuleConfig::all_enabled()),
            inline_settings: RwLock::new(None),
            workspace_root: RwLock::new(None),
        }
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for shared state.
pub(crate) type SharedState = Arc<BackendState>;
