//! The `lsp` command: serve the language server on stdio.

use std::process::ExitCode;

use miette::{IntoDiagnostic, Result};

pub(crate) fn run() -> Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;

    runtime.block_on(marklint_lsp::run_server());
    Ok(ExitCode::SUCCESS)
}
