//! Configuration resolution for the LSP server.

use tracing::{error, info};

use marklint_core::RuleConfig;

use crate::state::BackendState;

/// Recomputes the effective rule configuration from the inline settings and
/// the workspace root, and stores it in the state. Parse failures fall back
/// to the all-enabled default; they are never surfaced to the user.
pub(crate) fn reload_config(state: &BackendState) {
    let inline = match state.inline_settings.read() {
        Ok(g) => g.clone(),
        Err(e) => {
            error!("Inline settings lock poisoned: {}", e);
            return;
        }
    };

    let root = match state.workspace_root.read() {
        Ok(g) => g.clone(),
        Err(e) => {
            error!("Workspace root lock poisoned: {}", e);
            return;
        }
    };

    let config = RuleConfig::load_or_default(root.as_deref(), inline.as_ref());

    match state.config.write() {
        Ok(mut guard) => {
            *guard = config;
            info!("Rule configuration reloaded");
        }
        Err(e) => error!("Config lock poisoned: {}", e),
    }
}
