//! Declarative construction of expected trees
//!
//! ```rust,ignore
//! let expected = tree(NodeKind::Root)
//!     .child(tree(NodeKind::TopLevelStatement).child(leaf(NodeKind::FileStarter, "KAMAILIO")))
//!     .child(tree(NodeKind::Eof))
//!     .build();
//! assert!(parsed.tree_equals(&expected));
//! ```

use super::node::{Node, NodeId, NodeKind, Scalar};
use super::tree::Ast;

#[derive(Debug, Clone)]
pub struct NodeBuilder {
    node: Node,
    children: Vec<NodeBuilder>,
    named: Vec<(String, NodeBuilder)>,
}

/// Node without payload; add children with [`NodeBuilder::child`]
pub fn tree(kind: NodeKind) -> NodeBuilder {
    NodeBuilder {
        node: Node::new(kind),
        children: Vec::new(),
        named: Vec::new(),
    }
}

pub fn leaf(kind: NodeKind, value: impl Into<Scalar>) -> NodeBuilder {
    NodeBuilder {
        node: Node::scalar(kind, value),
        children: Vec::new(),
        named: Vec::new(),
    }
}

pub fn error(message: &str) -> NodeBuilder {
    leaf(NodeKind::Error, message)
}

impl NodeBuilder {
    pub fn role(mut self, role: &str) -> Self {
        self.node.role = Some(role.to_string());
        self
    }

    pub fn child(mut self, child: NodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn named(mut self, name: &str, child: NodeBuilder) -> Self {
        self.named.push((name.to_string(), child));
        self
    }

    fn attach(self, ast: &mut Ast) -> NodeId {
        let id = ast.push(self.node);
        for child in self.children {
            let child_id = child.attach(ast);
            if let Err(err) = ast.add_child(id, child_id) {
                panic!("invalid expected tree: {}", err);
            }
        }
        for (name, child) in self.named {
            let child_id = child.attach(ast);
            if let Err(err) = ast.insert_named_child(id, name, child_id) {
                panic!("invalid expected tree: {}", err);
            }
        }
        id
    }

    /// Build a standalone tree rooted at this node.
    ///
    /// Panics when a node mixes ordered and named children, or holds a
    /// scalar and children, or contains an `Empty` node.
    pub fn build(self) -> Ast {
        let mut ast = Ast::new();
        let root = self.attach(&mut ast);
        ast.set_root(root);
        ast
    }
}
