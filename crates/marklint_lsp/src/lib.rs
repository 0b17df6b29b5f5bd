//! marklint LSP server.
//!
//! Language Server Protocol implementation for marklint. Publishes lint
//! annotations as diagnostics and offers quick-fix / fix-all code actions.

mod config;
mod conversion;
mod debounce;
mod handler;
mod state;

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, error, info};

use marklint_core::{BuiltinEngine, RuleEngine, fixable_count, found_summary, project};

use crate::config::reload_config;
use crate::conversion::to_lsp_diagnostic;
use crate::debounce::spawn_debounced_validation;
use crate::state::{BackendState, SharedState};

/// The LSP backend for marklint.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state.
    state: SharedState,
    /// The rule evaluation engine.
    engine: Arc<dyn RuleEngine>,
}

impl Backend {
    /// Creates a new backend with the built-in rule engine.
    pub fn new(client: Client) -> Self {
        Self::with_engine(client, Arc::new(BuiltinEngine))
    }

    /// Creates a new backend with a custom rule engine.
    pub fn with_engine(client: Client, engine: Arc<dyn RuleEngine>) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::new()),
            engine,
        }
    }

    /// Runs a lint pass over a document snapshot, replaces its annotation
    /// set, and publishes diagnostics.
    ///
    /// A failing pass leaves the prior annotations in place: a transient
    /// engine error should not erase still-valid diagnostics.
    async fn validate_document(&self, uri: &Url, text: &str, version: Option<i32>) {
        debug!("Validating document: {}", uri);

        let state = self.state.clone();
        let engine = self.engine.clone();
        let text_owned = text.to_string();

        let lint_result = tokio::task::spawn_blocking(move || {
            let config = match state.config.read() {
                Ok(guard) => guard.clone(),
                Err(poisoned) => {
                    error!("Config lock poisoned: {}", poisoned);
                    return Ok(Vec::new());
                }
            };
            engine.lint(&text_owned, &config)
        })
        .await;

        let violations = match lint_result {
            Ok(Ok(violations)) => violations,
            Ok(Err(e)) => {
                error!("Lint pass failed, keeping previous diagnostics: {}", e);
                return;
            }
            Err(e) => {
                error!("Lint task panicked: {}", e);
                return;
            }
        };

        let annotations = project(&violations);
        let fixable = fixable_count(&annotations);
        info!("{}: {}", uri, found_summary(annotations.len(), fixable));

        let diagnostics: Vec<Diagnostic> = annotations.iter().map(to_lsp_diagnostic).collect();

        match self.state.annotations.write() {
            Ok(mut guard) => {
                guard.insert(uri.clone(), annotations);
            }
            Err(e) => error!("Annotations lock poisoned: {}", e),
        }

        self.client
            .publish_diagnostics(uri.clone(), diagnostics, version)
            .await;
    }

    /// Re-validates every open document, e.g. after a configuration change.
    async fn revalidate_open_documents(&self) {
        let snapshot: Vec<(Url, String, i32)> = match self.state.documents.read() {
            Ok(docs) => docs
                .iter()
                .map(|(uri, doc)| (uri.clone(), doc.text.clone(), doc.version))
                .collect(),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                return;
            }
        };

        for (uri, text, version) in snapshot {
            self.validate_document(&uri, &text, Some(version)).await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::initialize::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::initialize::handle_initialized(&self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::initialize::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let (uri, text, version) = handler::documents::handle_did_open(&self.state, params).await;
        self.validate_document(&uri, &text, version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let Some((uri, text, version)) =
            handler::documents::handle_did_change(&self.state, params).await
        else {
            return;
        };

        let backend = self.clone();
        spawn_debounced_validation(
            self.state.clone(),
            uri,
            text,
            version,
            move |uri, text, version| {
                tokio::spawn(async move {
                    backend.validate_document(&uri, &text, version).await;
                });
            },
        );
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let (uri, text) = handler::documents::handle_did_save(params).await;

        let text = match text {
            Some(t) => t,
            None => match self.state.documents.read() {
                Ok(docs) => match docs.get(&uri) {
                    Some(doc) => doc.text.clone(),
                    None => return,
                },
                Err(e) => {
                    error!("Documents lock poisoned: {}", e);
                    return;
                }
            },
        };

        self.validate_document(&uri, &text, None).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = handler::documents::handle_did_close(&self.state, params).await;
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handler::initialize::store_inline_settings(&self.state, params.settings);
        reload_config(&self.state);
        self.revalidate_open_documents().await;
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        handler::code_action::handle_code_action(&self.state, params).await
    }
}

/// Serves the language server over stdio until the client disconnects.
pub async fn run_server() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
