//! Parser state: a cursor over the spanned token sequence and the arena the
//! grammar builds into
//!
//! Grammar rules are plain functions `fn(&mut Parser) -> NodeId`. A rule
//! either returns a node it built, the shared `Empty` sentinel, or an
//! `Error` node. A rule that fails must leave the cursor where it found it;
//! the combinators rely on this to stay LL(1).

use std::ops::Range;

use tracing::{debug, error};

use crate::cfg::ast::{Ast, Node, NodeId, NodeKind};
use crate::cfg::config::ParserOptions;
use crate::cfg::lexer::{SpannedToken, Token, TokenKind};

/// Saved cursor position, see [`Parser::mark`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

pub struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    ast: Ast,
    empty: NodeId,
    options: ParserOptions,
    embedded_errors: usize,
    /// Set once an error is embedded that may not be recovered from
    halted: bool,
}

impl Parser {
    /// A missing trailing `EOF` token is appended
    pub fn new(mut tokens: Vec<SpannedToken>, options: ParserOptions) -> Self {
        if !tokens.last().is_some_and(|(token, _)| token.is_eof()) {
            let end = tokens.last().map_or(0, |(_, span)| span.end);
            tokens.push((Token::eof(), end..end));
        }

        let mut ast = Ast::new();
        let empty = ast.push(Node::new(NodeKind::Empty));
        Self {
            tokens,
            pos: 0,
            ast,
            empty,
            options,
            embedded_errors: 0,
            halted: false,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub(crate) fn ast_mut(&mut self) -> &mut Ast {
        &mut self.ast
    }

    pub fn into_ast(self) -> Ast {
        self.ast
    }

    // Cursor

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Save the cursor for a later [`Parser::reset`]
    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    fn current(&self) -> &SpannedToken {
        // `new` guarantees a trailing EOF and `advance` never moves past it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn peek(&self) -> &Token {
        &self.current().0
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub fn peek_span(&self) -> Range<usize> {
        self.current().1.clone()
    }

    pub fn at_eof(&self) -> bool {
        self.peek().is_eof()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consume the current token. The cursor stays on `EOF` once reached.
    pub fn advance(&mut self) -> SpannedToken {
        let token = self.current().clone();
        if !token.0.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Skip whatever is left and return the trailing `EOF`
    pub fn advance_to_eof(&mut self) -> SpannedToken {
        self.pos = self.tokens.len() - 1;
        self.current().clone()
    }

    /// Consume the current token if it has `kind`
    pub fn consume(&mut self, kind: TokenKind) -> Option<SpannedToken> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    // Nodes

    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.ast.push(node)
    }

    /// The shared "nothing here, not an error" sentinel
    pub fn empty(&self) -> NodeId {
        self.empty
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.ast.kind(id)
    }

    pub fn is_error(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::Error
    }

    pub fn is_empty(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::Empty
    }

    /// Neither `Empty` nor `Error`
    pub fn is_success(&self, id: NodeId) -> bool {
        !self.is_error(id) && !self.is_empty(id)
    }

    pub fn error(&mut self, message: impl Into<String>, span: Range<usize>) -> NodeId {
        self.alloc(Node::error(message).with_span(Some(span)))
    }

    /// Error describing the current token as not being `expected`
    pub fn expected(&mut self, expected: &str) -> NodeId {
        let message = if self.at_eof() {
            format!("Expected `{}` but got EOF", expected)
        } else {
            format!("Expected `{}` but got `{}`", expected, self.peek())
        };
        let span = self.peek_span();
        self.error(message, span)
    }

    /// Append `child` to `parent`. Both must have been built by this parser.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Err(err) = self.ast.add_child(parent, child) {
            error!(%err, parent = %self.kind(parent), child = %self.kind(child), "grammar built an invalid tree");
            debug_assert!(false, "grammar built an invalid tree: {}", err);
        }
    }

    /// Attach an error node as a diagnostic inside `parent`
    pub fn embed_error(&mut self, parent: NodeId, error: NodeId) {
        self.embedded_errors += 1;
        debug!(
            message = self.ast.node(error).message().unwrap_or_default(),
            span = ?self.ast.node(error).span,
            inside = %self.kind(parent),
            "embedded error"
        );
        self.attach(parent, error);

        if !self.halted && !self.can_recover() {
            self.halted = true;
            debug!(embedded = self.embedded_errors, "halting, no further recovery");
        }
    }

    pub fn embedded_errors(&self) -> usize {
        self.embedded_errors
    }

    /// True once an error was embedded with recovery off or the error
    /// budget spent. Rules that see this stop reading input.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Whether another error may be embedded and parsing resumed after it
    pub fn can_recover(&self) -> bool {
        self.options.recover && self.embedded_errors < self.options.max_errors
    }

    /// Set the span of `id` to cover its children's spans, unless it has
    /// one already
    pub fn cover(&mut self, id: NodeId) {
        if self.ast.node(id).span.is_some() {
            return;
        }
        let span = self
            .ast
            .children(id)
            .iter()
            .filter_map(|child| self.ast.node(*child).span.clone())
            .reduce(|acc, span| acc.start.min(span.start)..acc.end.max(span.end));
        self.ast.node_mut(id).span = span;
    }

    /// Widen the span of `id` to also cover `span`
    pub fn extend_span(&mut self, id: NodeId, span: Range<usize>) {
        let node = self.ast.node_mut(id);
        node.span = Some(match node.span.take() {
            Some(current) => current.start.min(span.start)..current.end.max(span.end),
            None => span,
        });
    }

    /// Skip tokens after a failure until a plausible restart point: past a
    /// `;` or a `}` closing the current nesting level, or before a route
    /// keyword or preprocessor directive at nesting level zero. With
    /// `stop_before_close` the closing `}` of the enclosing block is left in
    /// place. Always consumes at least one token unless at `EOF`.
    pub fn synchronize(&mut self, stop_before_close: bool) {
        let start = self.pos;
        let mut depth = 0usize;

        while !self.at_eof() {
            let kind = self.peek_kind();
            let first = self.pos == start;

            match kind {
                TokenKind::Route | TokenKind::Preproc if depth == 0 && !first => break,
                TokenKind::RBrace if depth == 0 && stop_before_close && !first => break,
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace if depth > 0 => {
                    depth -= 1;
                    if depth == 0 && !stop_before_close {
                        self.advance();
                        break;
                    }
                }
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    break;
                }
                _ => {}
            }
            self.advance();
        }

        debug!(
            from = start,
            to = self.pos,
            resume_at = %self.peek(),
            "resynchronised"
        );
    }
}
