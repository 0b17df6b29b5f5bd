//! Code action handler: quick fixes and fix-all.

use std::collections::HashMap;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use marklint_core::{Annotation, apply_fix_batch, translate_fix};

use crate::conversion::{ranges_intersect, to_lsp_range};
use crate::state::SharedState;

/// Handles the `textDocument/codeAction` request.
pub(crate) async fn handle_code_action(
    state: &SharedState,
    params: CodeActionParams,
) -> Result<Option<CodeActionResponse>> {
    debug!("Code action request: {}", params.text_document.uri);

    let uri = &params.text_document.uri;
    let text = match get_document_content(state, uri) {
        Some(t) => t,
        None => return Ok(None),
    };
    let annotations = match get_annotations(state, uri) {
        Some(a) => a,
        None => return Ok(None),
    };

    let mut actions = Vec::new();

    let (wants_fix_all, wants_quickfix) = match &params.context.only {
        Some(only) => (
            only.contains(&CodeActionKind::SOURCE_FIX_ALL),
            only.contains(&CodeActionKind::QUICKFIX),
        ),
        None => (true, true),
    };

    if wants_quickfix {
        add_quickfix_actions(&annotations, &text, uri, &params.range, &mut actions);
    }

    if wants_fix_all {
        add_fix_all_action(&annotations, &text, uri, &mut actions);
    }

    Ok(Some(actions))
}

/// One quick fix per fixable annotation whose line the request touches,
/// translated to a single replacement edit.
fn add_quickfix_actions(
    annotations: &[Annotation],
    text: &str,
    uri: &Url,
    request_range: &Range,
    actions: &mut Vec<CodeActionOrCommand>,
) {
    let lines: Vec<&str> = text.split('\n').collect();

    for annotation in annotations {
        let Some(ref fix) = annotation.fix else {
            continue;
        };
        let Some(fix_line) = annotation.fix_line else {
            continue;
        };

        let line = u32::try_from(annotation.line).unwrap_or(u32::MAX);
        let annotation_range = Range::new(Position::new(line, 0), Position::new(line, u32::MAX));
        if !ranges_intersect(&annotation_range, request_range) {
            continue;
        }

        if let Some(replacement) = translate_fix(fix, fix_line, &lines) {
            let edit = TextEdit {
                range: to_lsp_range(&replacement.span),
                new_text: replacement.text,
            };
            let action = CodeAction {
                title: format!("Fix: {}", annotation.message),
                kind: Some(CodeActionKind::QUICKFIX),
                edit: Some(WorkspaceEdit {
                    changes: Some(HashMap::from([(uri.clone(), vec![edit])])),
                    ..Default::default()
                }),
                ..Default::default()
            };
            actions.push(CodeActionOrCommand::CodeAction(action));
        }
    }
}

/// One fix-all action carrying the whole corrected document as a single
/// edit, computed by the batch resolver. Emitted only when the batch
/// actually changes the text.
fn add_fix_all_action(
    annotations: &[Annotation],
    text: &str,
    uri: &Url,
    actions: &mut Vec<CodeActionOrCommand>,
) {
    let batch: Vec<(usize, &marklint_core::FixDescriptor)> = annotations
        .iter()
        .filter_map(|a| Some((a.fix_line?, a.fix.as_ref()?)))
        .collect();

    if batch.is_empty() {
        return;
    }

    let fixed = apply_fix_batch(text, &batch);
    if fixed == text {
        return;
    }

    let edit = TextEdit {
        range: full_document_range(text),
        new_text: fixed,
    };
    let action = CodeAction {
        title: "Fix all marklint issues".to_string(),
        kind: Some(CodeActionKind::SOURCE_FIX_ALL),
        edit: Some(WorkspaceEdit {
            changes: Some(HashMap::from([(uri.clone(), vec![edit])])),
            ..Default::default()
        }),
        ..Default::default()
    };
    actions.push(CodeActionOrCommand::CodeAction(action));
}

fn full_document_range(text: &str) -> Range {
    let lines: Vec<&str> = text.split('\n').collect();
    let end_line = lines.len().saturating_sub(1);
    let end_char = lines.last().map_or(0, |l| l.chars().count());
    Range::new(
        Position::new(0, 0),
        Position::new(
            u32::try_from(end_line).unwrap_or(u32::MAX),
            u32::try_from(end_char).unwrap_or(u32::MAX),
        ),
    )
}

fn get_document_content(state: &SharedState, uri: &Url) -> Option<String> {
    let docs = state.documents.read().ok()?;
    docs.get(uri).map(|d| d.text.clone())
}

fn get_annotations(state: &SharedState, uri: &Url) -> Option<Vec<Annotation>> {
    let annotations = state.annotations.read().ok()?;
    annotations.get(uri).cloned()
}
