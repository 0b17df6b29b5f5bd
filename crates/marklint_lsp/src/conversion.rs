//! LSP type conversion utilities.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

use marklint_core::{Annotation, Severity, TextSpan, SOURCE_NAME};

/// Converts a marklint annotation to an LSP diagnostic.
pub(crate) fn to_lsp_diagnostic(annotation: &Annotation) -> Diagnostic {
    let severity = match annotation.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Info => DiagnosticSeverity::INFORMATION,
    };

    Diagnostic {
        range: Range::new(
            Position::new(clamp_u32(annotation.line), clamp_u32(annotation.col_start)),
            // The end-of-line sentinel saturates; clients clamp it to the
            // actual line length.
            Position::new(clamp_u32(annotation.line), clamp_u32(annotation.col_end)),
        ),
        severity: Some(severity),
        code: Some(NumberOrString::String(annotation.rule_code.clone())),
        source: Some(SOURCE_NAME.to_string()),
        message: annotation.message.clone(),
        ..Default::default()
    }
}

/// Converts a core text span to an LSP range.
pub(crate) fn to_lsp_range(span: &TextSpan) -> Range {
    Range::new(
        Position::new(clamp_u32(span.start.line), clamp_u32(span.start.character)),
        Position::new(clamp_u32(span.end.line), clamp_u32(span.end.character)),
    )
}

fn clamp_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Helper to compare positions (p1 <= p2).
pub(crate) fn positions_le(p1: Position, p2: Position) -> bool {
    p1.line < p2.line || (p1.line == p2.line && p1.character <= p2.character)
}

/// Whether two ranges touch or overlap.
pub(crate) fn ranges_intersect(a: &Range, b: &Range) -> bool {
    positions_le(a.start, b.end) && positions_le(b.start, a.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marklint_core::{project, Violation, END_OF_LINE};

    #[test]
    fn annotation_maps_to_lsp_diagnostic() {
        let violations = vec![Violation::new(3, ["MD009", "no-trailing-spaces"], "Trailing spaces")];
        let annotations = project(&violations);
        let diag = to_lsp_diagnostic(&annotations[0]);

        assert_eq!(diag.range.start, Position::new(2, 0));
        assert_eq!(diag.range.end.character, u32::MAX);
        assert_eq!(diag.source.as_deref(), Some("marklint"));
        assert_eq!(
            diag.code,
            Some(NumberOrString::String("MD009".to_string()))
        );
        assert_eq!(diag.message, "MD009/no-trailing-spaces: Trailing spaces");
        assert_eq!(diag.severity, Some(DiagnosticSeverity::WARNING));
    }

    #[test]
    fn sentinel_column_saturates() {
        assert_eq!(clamp_u32(END_OF_LINE), u32::MAX);
        assert_eq!(clamp_u32(7), 7);
    }

    #[test]
    fn range_intersection() {
        let a = Range::new(Position::new(1, 0), Position::new(1, 5));
        let b = Range::new(Position::new(1, 5), Position::new(2, 0));
        let c = Range::new(Position::new(3, 0), Position::new(3, 1));

        assert!(ranges_intersect(&a, &b));
        assert!(!ranges_intersect(&a, &c));
    }
}
