//! LSP request and notification handlers.

pub(crate) mod code_action;
pub(crate) mod documents;
pub(crate) mod initialize;
