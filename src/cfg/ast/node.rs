//! AST node type definitions
//!
//! A node is a tagged value: an optional role name, a [`NodeKind`], a
//! [`NodePayload`] and its place in the tree (parent, depth). Nodes live in
//! an [`Ast`](super::tree::Ast) arena and refer to each other by [`NodeId`].

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// Handle of a node inside its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Root,
    /// "No node produced, not an error". Never attached to the final tree.
    Empty,
    /// Embedded diagnostic; the payload is the message
    Error,
    Eof,
    /// End of statement (`;`)
    Eos,
    TopLevelStatement,
    FileStarter,
    RequestRoute,
    ReplyRoute,
    FailureRoute,
    OnReplyRoute,
    BranchRoute,
    LocalRoute,
    StartupRoute,
    Route,
    Block,
    Statement,
    Assignment,
    Operator,
    Identifier,
    Number,
    String,
    CoreVarVar,
    CoreVarAvp,
}

impl NodeKind {
    /// Node kind for a route keyword literal
    pub fn from_route_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword {
            "request_route" => NodeKind::RequestRoute,
            "reply_route" => NodeKind::ReplyRoute,
            "failure_route" => NodeKind::FailureRoute,
            "onreply_route" => NodeKind::OnReplyRoute,
            "branch_route" => NodeKind::BranchRoute,
            "local_route" => NodeKind::LocalRoute,
            "startup_route" => NodeKind::StartupRoute,
            "route" => NodeKind::Route,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_route(&self) -> bool {
        matches!(
            self,
            NodeKind::RequestRoute
                | NodeKind::ReplyRoute
                | NodeKind::FailureRoute
                | NodeKind::OnReplyRoute
                | NodeKind::BranchRoute
                | NodeKind::LocalRoute
                | NodeKind::StartupRoute
                | NodeKind::Route
        )
    }

    pub fn is_core_variable(&self) -> bool {
        matches!(self, NodeKind::CoreVarVar | NodeKind::CoreVarAvp)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Empty => "Empty",
            NodeKind::Error => "Error",
            NodeKind::Eof => "Eof",
            NodeKind::Eos => "Eos",
            NodeKind::TopLevelStatement => "TopLevelStatement",
            NodeKind::FileStarter => "FileStarter",
            NodeKind::RequestRoute => "RequestRoute",
            NodeKind::ReplyRoute => "ReplyRoute",
            NodeKind::FailureRoute => "FailureRoute",
            NodeKind::OnReplyRoute => "OnReplyRoute",
            NodeKind::BranchRoute => "BranchRoute",
            NodeKind::LocalRoute => "LocalRoute",
            NodeKind::StartupRoute => "StartupRoute",
            NodeKind::Route => "Route",
            NodeKind::Block => "Block",
            NodeKind::Statement => "Statement",
            NodeKind::Assignment => "Assignment",
            NodeKind::Operator => "Operator",
            NodeKind::Identifier => "Identifier",
            NodeKind::Number => "Number",
            NodeKind::String => "String",
            NodeKind::CoreVarVar => "CoreVarVar",
            NodeKind::CoreVarAvp => "CoreVarAvp",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf value of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Str(String),
    Int(i64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => write!(f, "{}", s),
            Scalar::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

/// What a node carries. Exactly one shape at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodePayload {
    #[default]
    None,
    Scalar(Scalar),
    Children(Vec<NodeId>),
    NamedChildren(BTreeMap<String, NodeId>),
}

/// Payload shape, for queries and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadShape {
    None,
    Scalar,
    Children,
    NamedChildren,
}

impl NodePayload {
    pub fn shape(&self) -> PayloadShape {
        match self {
            NodePayload::None => PayloadShape::None,
            NodePayload::Scalar(_) => PayloadShape::Scalar,
            NodePayload::Children(_) => PayloadShape::Children,
            NodePayload::NamedChildren(_) => PayloadShape::NamedChildren,
        }
    }
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadShape::None => "no payload",
            PayloadShape::Scalar => "a scalar",
            PayloadShape::Children => "ordered children",
            PayloadShape::NamedChildren => "named children",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Operand side of an assignment (`left`/`right`) or a route's name
    pub role: Option<String>,
    pub kind: NodeKind,
    pub payload: NodePayload,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: u32,
    /// Byte range of the source this node was built from
    pub span: Option<Range<usize>>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            role: None,
            kind,
            payload: NodePayload::None,
            parent: None,
            depth: 0,
            span: None,
        }
    }

    pub fn scalar(kind: NodeKind, value: impl Into<Scalar>) -> Self {
        Self {
            payload: NodePayload::Scalar(value.into()),
            ..Self::new(kind)
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::scalar(NodeKind::Error, message.into())
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_span(mut self, span: Option<Range<usize>>) -> Self {
        self.span = span;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_error(&self) -> bool {
        self.kind == NodeKind::Error
    }

    pub fn is_empty(&self) -> bool {
        self.kind == NodeKind::Empty
    }

    /// A node with no ordered children
    pub fn is_leaf(&self) -> bool {
        !matches!(self.payload, NodePayload::Children(_))
    }

    pub fn scalar_value(&self) -> Option<&Scalar> {
        match &self.payload {
            NodePayload::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Message of an error node
    pub fn message(&self) -> Option<&str> {
        match (&self.kind, &self.payload) {
            (NodeKind::Error, NodePayload::Scalar(Scalar::Str(message))) => Some(message),
            _ => None,
        }
    }
}
