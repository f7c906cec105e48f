//! Fluent assertions over syntax trees
//!
//! ```rust,ignore
//! let ast = parse_str("request_route { x = 1; }");
//! assert_ast(&ast)
//!     .kind(NodeKind::Root)
//!     .child(0, |stmt| {
//!         stmt.kind(NodeKind::TopLevelStatement)
//!             .child(0, |route| route.kind(NodeKind::RequestRoute).child_count(1));
//!     });
//! ```
//!
//! Every failure message carries the path from the root (`root[0][1]`) and
//! the pretty-printed subtree.

use crate::cfg::ast::{Ast, NodeKind, NodeRef, Scalar};
use crate::cfg::config::ParserOptions;
use crate::cfg::lexer::tokenize_with_spans;
use crate::cfg::parser::parse_with_options;

/// Tokenize and parse with default options, panicking on lexical errors
pub fn parse_str(source: &str) -> Ast {
    parse_str_with(source, ParserOptions::default())
}

pub fn parse_str_with(source: &str, options: ParserOptions) -> Ast {
    let tokens = tokenize_with_spans(source)
        .unwrap_or_else(|err| panic!("failed to tokenize {:?}: {}", source, err));
    parse_with_options(tokens, options)
}

pub fn assert_ast(ast: &Ast) -> NodeAssertion<'_> {
    let root = ast
        .root()
        .unwrap_or_else(|| panic!("tree has no root"));
    NodeAssertion {
        node: root,
        context: "root".to_string(),
    }
}

pub struct NodeAssertion<'a> {
    node: NodeRef<'a>,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    fn fail(&self, what: String) -> ! {
        panic!("{}: {}\n{}", self.context, what, self.node.pretty_print(0))
    }

    pub fn kind(self, expected: NodeKind) -> Self {
        if self.node.kind() != expected {
            self.fail(format!(
                "expected {} node, found {}",
                expected,
                self.node.kind()
            ));
        }
        self
    }

    pub fn role(self, expected: &str) -> Self {
        if self.node.role() != Some(expected) {
            self.fail(format!(
                "expected role {:?}, found {:?}",
                expected,
                self.node.role()
            ));
        }
        self
    }

    pub fn no_role(self) -> Self {
        if let Some(role) = self.node.role() {
            self.fail(format!("expected no role, found {:?}", role));
        }
        self
    }

    pub fn text(self, expected: &str) -> Self {
        if self.node.as_str() != Some(expected) {
            self.fail(format!(
                "expected text {:?}, found {:?}",
                expected,
                self.node.scalar()
            ));
        }
        self
    }

    pub fn int(self, expected: i64) -> Self {
        if self.node.scalar() != Some(&Scalar::Int(expected)) {
            self.fail(format!(
                "expected integer {}, found {:?}",
                expected,
                self.node.scalar()
            ));
        }
        self
    }

    /// An `Error` node with exactly this message
    pub fn error(self, message: &str) -> Self {
        if !self.node.is_error() || self.node.message() != Some(message) {
            self.fail(format!("expected error {:?}", message));
        }
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.child_count();
        if actual != expected {
            self.fail(format!("expected {} children, found {}", expected, actual));
        }
        self
    }

    /// Ordered children have exactly these kinds
    pub fn child_kinds(self, expected: &[NodeKind]) -> Self {
        let actual: Vec<NodeKind> = self.node.children().map(|c| c.kind()).collect();
        if actual != expected {
            self.fail(format!(
                "expected children {:?}, found {:?}",
                expected, actual
            ));
        }
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let child = match self.node.child(index) {
            Ok(child) => child,
            Err(err) => self.fail(err.to_string()),
        };
        assertion(NodeAssertion {
            node: child,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// No `Error` node anywhere in this subtree
    pub fn no_errors(self) -> Self {
        let ast = self.node.ast();
        let errors: Vec<&str> = ast
            .descendants(self.node.id())
            .into_iter()
            .filter_map(|id| ast.node(id).message())
            .collect();
        if !errors.is_empty() {
            self.fail(format!("expected no errors, found {:?}", errors));
        }
        self
    }

    pub fn depth(self, expected: u32) -> Self {
        if self.node.depth() != expected {
            self.fail(format!(
                "expected depth {}, found {}",
                expected,
                self.node.depth()
            ));
        }
        self
    }

    pub fn span(self, expected: std::ops::Range<usize>) -> Self {
        if self.node.span() != Some(expected.clone()) {
            self.fail(format!(
                "expected span {:?}, found {:?}",
                expected,
                self.node.span()
            ));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_chain() {
        let ast = parse_str("x = 1");
        assert_ast(&ast)
            .kind(NodeKind::Root)
            .depth(0)
            .child_kinds(&[NodeKind::TopLevelStatement, NodeKind::Eof])
            .no_errors()
            .child(0, |stmt| {
                stmt.child(0, |assignment| {
                    assignment
                        .kind(NodeKind::Assignment)
                        .depth(2)
                        .child(0, |left| {
                            left.role("left").text("x");
                        })
                        .child(1, |op| {
                            op.no_role().text("=");
                        })
                        .child(2, |right| {
                            right.role("right").int(1).span(4..5);
                        });
                });
            });
    }

    #[test]
    #[should_panic(expected = "root[0]: expected Route node, found TopLevelStatement")]
    fn test_failure_reports_path() {
        let ast = parse_str("x = 1");
        assert_ast(&ast).child(0, |stmt| {
            stmt.kind(NodeKind::Route);
        });
    }
}
