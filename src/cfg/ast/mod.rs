//! Syntax tree for the cfg dialect
//!
//! ## Modules
//!
//! - `node` - node kinds, payloads and the [`Node`] value
//! - `tree` - the [`Ast`] arena and [`NodeRef`] views
//! - `builder` - declarative construction of expected trees
//! - `location` - byte offset to line/column conversion
//! - `diagnostics` - error nodes as structured diagnostics
//! - `lookup` - nodes under a byte offset
//! - `error` - errors of tree operations

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod location;
pub mod lookup;
pub mod node;
pub mod tree;

pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use error::TreeError;
pub use location::{Position, SourceLocation, Span};
pub use node::{Node, NodeId, NodeKind, NodePayload, PayloadShape, Scalar};
pub use tree::{Ast, NodeRef};
