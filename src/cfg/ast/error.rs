//! Error types for tree operations

use thiserror::Error;

use super::node::{NodeKind, PayloadShape};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The operation needs a payload shape the node does not hold
    #[error("{kind} node holds {found}, expected {expected}")]
    PayloadMismatch {
        kind: NodeKind,
        expected: PayloadShape,
        found: PayloadShape,
    },

    #[error("{kind} node has {len} children, no child at index {index}")]
    ChildNotFound {
        kind: NodeKind,
        index: usize,
        len: usize,
    },

    #[error("{kind} node has no child named `{name}`")]
    NameNotFound { kind: NodeKind, name: String },

    /// Empty sentinels never become part of a tree
    #[error("an Empty node cannot be attached as a child")]
    EmptyChild,

    #[error("attaching the node would make it its own ancestor")]
    WouldCycle,
}
