//! Output formats for syntax trees
//!
//! Besides the s-expression [`Ast::pretty_print`](crate::cfg::ast::Ast::pretty_print):
//!
//! - `treeviz` - one line per node with box-drawing connectors
//! - `json` - a serde_json document for tooling

pub mod json;
pub mod treeviz;

pub use json::{to_json, to_json_value, JsonNode};
pub use treeviz::to_treeviz_str;
