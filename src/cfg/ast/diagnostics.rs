//! Diagnostics collected from embedded error nodes
//!
//! Syntax errors never abort a parse; they live in the tree as `Error`
//! nodes. [`Ast::diagnostics`] gathers them in source order into structured
//! [`Diagnostic`] values an editor host can publish directly.

use serde::Serialize;
use std::fmt;

use super::location::{SourceLocation, Span};
use super::tree::Ast;

/// Severity levels matching the LSP protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    /// Absent when the error node was built without a source range
    pub span: Option<Span>,
    pub severity: DiagnosticSeverity,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            message: message.into(),
            span,
            severity: DiagnosticSeverity::Error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some(span) => write!(f, "{}: {} at {}", self.severity, self.message, span.start),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

impl Ast {
    /// One diagnostic per error node reachable from the root. `source` must
    /// be the buffer the tree was parsed from.
    pub fn diagnostics(&self, source: impl AsRef<[u8]>) -> Vec<Diagnostic> {
        let location = SourceLocation::new(source);
        self.errors()
            .into_iter()
            .map(|id| {
                let node = self.node(id);
                let message = node.message().unwrap_or_default();
                let span = node.span.as_ref().map(|r| location.range_to_span(r));
                Diagnostic::error(message, span)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::ast::location::Position;
    use crate::cfg::ast::node::{Node, NodeKind};

    #[test]
    fn test_diagnostics_from_error_nodes() {
        let source = "x = 1;\nroute { }";
        let mut ast = Ast::new();
        let root = ast.push(Node::new(NodeKind::Root));
        ast.set_root(root);
        let error = ast.push(Node::error("Route name is required").with_span(Some(13..14)));
        ast.add_child(root, error).unwrap();
        let unplaced = ast.push(Node::error("Expected `}` but got EOF"));
        ast.add_child(root, unplaced).unwrap();

        let diagnostics = ast.diagnostics(source);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "Route name is required");
        assert_eq!(
            diagnostics[0].span,
            Some(Span::new(Position::new(1, 6), Position::new(1, 7)))
        );
        assert_eq!(
            diagnostics[0].to_string(),
            "error: Route name is required at 1:6"
        );
        assert_eq!(diagnostics[1].span, None);
        assert_eq!(diagnostics[1].to_string(), "error: Expected `}` but got EOF");
    }

    #[test]
    fn test_clean_tree_has_no_diagnostics() {
        let mut ast = Ast::new();
        let root = ast.push(Node::new(NodeKind::Root));
        ast.set_root(root);
        assert!(ast.diagnostics("").is_empty());
    }
}
