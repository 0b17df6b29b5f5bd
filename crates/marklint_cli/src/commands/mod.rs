//! CLI subcommand implementations.

pub(crate) mod check;
pub(crate) mod lsp;
