//! Treeviz formatter
//!
//! One line per node, nesting drawn with box connectors:
//!
//! ```text
//! └─ Root
//!   ├─ TopLevelStatement
//!   │ └─ RequestRoute
//!   │   └─ Block
//!   │     └─ Statement
//!   │       ├─ Assignment
//!   │       │ ├─ Identifier [left]: x
//!   │       │ ├─ Operator: =
//!   │       │ └─ Number [right]: 123
//!   │       └─ Eos
//!   └─ Eof
//! ```
//!
//! Scalar labels are truncated to 30 characters.

use crate::cfg::ast::{Ast, NodeId, NodePayload};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(ast: &Ast) -> String {
    let mut result = String::new();
    if let Some(root) = ast.root_id() {
        append_node(&mut result, ast, root, None, "", true);
    }
    result
}

fn append_node(
    result: &mut String,
    ast: &Ast,
    id: NodeId,
    name: Option<&str>,
    prefix: &str,
    is_last: bool,
) {
    let node = ast.node(id);
    let connector = if is_last { "└─" } else { "├─" };

    let mut line = format!("{}{} ", prefix, connector);
    if let Some(name) = name {
        line.push_str(&format!("{} = ", name));
    }
    line.push_str(node.kind.as_str());
    if let Some(role) = &node.role {
        line.push_str(&format!(" [{}]", role));
    }
    if let Some(value) = node.scalar_value() {
        line.push_str(&format!(": {}", truncate(&value.to_string(), LABEL_WIDTH)));
    }
    result.push_str(&line);
    result.push('\n');

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    match &node.payload {
        NodePayload::Children(children) => {
            for (i, child) in children.iter().enumerate() {
                let last = i == children.len() - 1;
                append_node(result, ast, *child, None, &new_prefix, last);
            }
        }
        NodePayload::NamedChildren(named) => {
            for (i, (child_name, child)) in named.iter().enumerate() {
                let last = i == named.len() - 1;
                append_node(result, ast, *child, Some(child_name), &new_prefix, last);
            }
        }
        NodePayload::None | NodePayload::Scalar(_) => {}
    }
}
