//! Initialize and shutdown handlers.

use std::collections::BTreeMap;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{debug, error, info};

use marklint_core::RuleSetting;

use crate::config::reload_config;
use crate::state::BackendState;

/// Handles the `initialize` LSP request.
pub(crate) async fn handle_initialize(
    state: &BackendState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    info!("marklint LSP server initializing...");

    #[allow(deprecated)]
    if let Some(path) = params.root_uri.and_then(|u| u.to_file_path().ok()) {
        match state.workspace_root.write() {
            Ok(mut root) => {
                *root = Some(path);
            }
            Err(e) => {
                error!("Workspace root lock poisoned: {}", e);
                return Ok(InitializeResult::default());
            }
        }
    }

    if let Some(options) = params.initialization_options {
        store_inline_settings(state, options);
    }

    reload_config(state);

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                        include_text: Some(true),
                    })),
                    ..Default::default()
                },
            )),
            code_action_provider: Some(CodeActionProviderCapability::Options(CodeActionOptions {
                code_action_kinds: Some(vec![
                    CodeActionKind::QUICKFIX,
                    CodeActionKind::SOURCE_FIX_ALL,
                ]),
                resolve_provider: Some(false),
                work_done_progress_options: Default::default(),
            })),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "marklint-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

/// Parses editor-provided settings into the inline rule map. Anything that
/// does not look like a rule map is ignored; a malformed override must never
/// break the server.
pub(crate) fn store_inline_settings(state: &BackendState, value: serde_json::Value) {
    let settings: Option<BTreeMap<String, RuleSetting>> = match serde_json::from_value(value) {
        Ok(map) => Some(map),
        Err(e) => {
            debug!("Ignoring malformed inline settings: {}", e);
            None
        }
    };

    if let Some(settings) = settings {
        match state.inline_settings.write() {
            Ok(mut guard) => *guard = Some(settings),
            Err(e) => error!("Inline settings lock poisoned: {}", e),
        }
    }
}

/// Handles the `initialized` LSP notification.
pub(crate) async fn handle_initialized(client: &tower_lsp::Client) {
    client
        .log_message(MessageType::INFO, "marklint LSP server initialized")
        .await;
}

/// Handles the `shutdown` LSP request.
pub(crate) async fn handle_shutdown() -> Result<()> {
    info!("marklint LSP server shutting down...");
    Ok(())
}
