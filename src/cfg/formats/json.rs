//! JSON export of a syntax tree
//!
//! The arena is flattened into nested objects so consumers do not need to
//! know about node ids:
//!
//! ```json
//! {"kind": "Assignment", "span": [0, 7], "children": [
//!   {"kind": "Identifier", "role": "left", "value": "x", "span": [0, 1]}, ...]}
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

use crate::cfg::ast::{Ast, NodeId, NodeKind, NodePayload, Scalar};

/// Owned, nested view of one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonNode {
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub named: BTreeMap<String, JsonNode>,
}

impl JsonNode {
    pub fn from_ast(ast: &Ast, id: NodeId) -> Self {
        let node = ast.node(id);
        let mut json = JsonNode {
            kind: node.kind,
            role: node.role.clone(),
            value: None,
            span: node.span.as_ref().map(|r| (r.start, r.end)),
            children: Vec::new(),
            named: BTreeMap::new(),
        };
        match &node.payload {
            NodePayload::None => {}
            NodePayload::Scalar(value) => json.value = Some(value.clone()),
            NodePayload::Children(children) => {
                json.children = children
                    .iter()
                    .map(|child| JsonNode::from_ast(ast, *child))
                    .collect();
            }
            NodePayload::NamedChildren(named) => {
                json.named = named
                    .iter()
                    .map(|(name, child)| (name.clone(), JsonNode::from_ast(ast, *child)))
                    .collect();
            }
        }
        json
    }
}

pub fn to_json_value(ast: &Ast) -> serde_json::Value {
    match ast.root_id() {
        Some(root) => serde_json::to_value(JsonNode::from_ast(ast, root))
            .unwrap_or(serde_json::Value::Null),
        None => serde_json::Value::Null,
    }
}

/// Pretty-printed JSON for the whole tree (`null` without a root)
pub fn to_json(ast: &Ast) -> Result<String, serde_json::Error> {
    match ast.root_id() {
        Some(root) => serde_json::to_string_pretty(&JsonNode::from_ast(ast, root)),
        None => Ok("null".to_string()),
    }
}
