//! Arena-backed syntax tree
//!
//! [`Ast`] owns every node; children are referenced by [`NodeId`] from their
//! parent's payload and each node keeps a non-owning `parent` index for
//! upward navigation. A node has at most one parent: attaching it somewhere
//! else first detaches it from where it was.
//!
//! Nodes that never get attached (discarded alternatives, the `Empty`
//! sentinel) stay in the arena but are unreachable from the root, and every
//! traversal starts from the root.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use super::error::TreeError;
use super::node::{Node, NodeId, NodeKind, NodePayload, PayloadShape, Scalar};

#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a node into the arena
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the arena, attached or not
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Panics if `id` was not produced by this arena.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { ast: self, id }
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|id| self.get(id))
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.detach(id);
        self.root = Some(id);
        self.stamp_depths();
    }

    /// Drop every source range, for trees built from unspanned tokens
    pub fn clear_spans(&mut self) {
        for node in &mut self.nodes {
            node.span = None;
        }
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn set_role(&mut self, id: NodeId, role: impl Into<String>) {
        self.node_mut(id).role = Some(role.into());
    }

    /// Ordered children, empty for any other payload shape
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).payload {
            NodePayload::Children(children) => children,
            _ => &[],
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            match self.node(node).parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if self.node(child).kind == NodeKind::Empty {
            return Err(TreeError::EmptyChild);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::WouldCycle);
        }
        Ok(())
    }

    /// Remove `child` from its current parent's payload, if it has one
    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.0].parent.take() else {
            return;
        };
        match &mut self.nodes[parent.0].payload {
            NodePayload::Children(children) => children.retain(|c| *c != child),
            NodePayload::NamedChildren(named) => named.retain(|_, c| *c != child),
            NodePayload::None | NodePayload::Scalar(_) => {}
        }
        if self.root == Some(child) {
            self.root = None;
        }
    }

    fn adopt(&mut self, parent: NodeId, child: NodeId) {
        let depth = self.node(parent).depth + 1;
        let node = self.node_mut(child);
        node.parent = Some(parent);
        node.depth = depth;
        self.restamp_below(child);
    }

    /// Append `child` to `parent`'s ordered children, creating the list when
    /// `parent` has no payload yet
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let shape = self.node(parent).payload.shape();
        if !matches!(shape, PayloadShape::None | PayloadShape::Children) {
            return Err(TreeError::PayloadMismatch {
                kind: self.kind(parent),
                expected: PayloadShape::Children,
                found: shape,
            });
        }
        self.check_attachable(parent, child)?;
        self.detach(child);

        match &mut self.node_mut(parent).payload {
            NodePayload::Children(children) => children.push(child),
            payload => *payload = NodePayload::Children(vec![child]),
        }
        self.adopt(parent, child);
        Ok(())
    }

    /// Insert `child` under `name`, replacing (and detaching) any previous
    /// child of that name
    pub fn insert_named_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        child: NodeId,
    ) -> Result<(), TreeError> {
        let shape = self.node(parent).payload.shape();
        if !matches!(shape, PayloadShape::None | PayloadShape::NamedChildren) {
            return Err(TreeError::PayloadMismatch {
                kind: self.kind(parent),
                expected: PayloadShape::NamedChildren,
                found: shape,
            });
        }
        self.check_attachable(parent, child)?;
        self.detach(child);

        let name = name.into();
        let replaced = match &mut self.node_mut(parent).payload {
            NodePayload::NamedChildren(named) => named.insert(name, child),
            payload => {
                *payload = NodePayload::NamedChildren(BTreeMap::from([(name, child)]));
                None
            }
        };
        if let Some(previous) = replaced {
            self.nodes[previous.0].parent = None;
        }
        self.adopt(parent, child);
        Ok(())
    }

    /// Move every ordered child of `from` to the end of `to`
    pub fn adopt_children(&mut self, to: NodeId, from: NodeId) -> Result<(), TreeError> {
        let children = self.children(from).to_vec();
        for child in children {
            self.add_child(to, child)?;
        }
        Ok(())
    }

    pub fn get_child(&self, parent: NodeId, index: usize) -> Result<NodeId, TreeError> {
        let node = self.node(parent);
        match &node.payload {
            NodePayload::Children(children) => {
                children
                    .get(index)
                    .copied()
                    .ok_or(TreeError::ChildNotFound {
                        kind: node.kind,
                        index,
                        len: children.len(),
                    })
            }
            NodePayload::None => Err(TreeError::ChildNotFound {
                kind: node.kind,
                index,
                len: 0,
            }),
            payload => Err(TreeError::PayloadMismatch {
                kind: node.kind,
                expected: PayloadShape::Children,
                found: payload.shape(),
            }),
        }
    }

    pub fn get_child_by_name(&self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        let node = self.node(parent);
        match &node.payload {
            NodePayload::NamedChildren(named) => {
                named.get(name).copied().ok_or_else(|| TreeError::NameNotFound {
                    kind: node.kind,
                    name: name.to_string(),
                })
            }
            NodePayload::None => Err(TreeError::NameNotFound {
                kind: node.kind,
                name: name.to_string(),
            }),
            payload => Err(TreeError::PayloadMismatch {
                kind: node.kind,
                expected: PayloadShape::NamedChildren,
                found: payload.shape(),
            }),
        }
    }

    /// Child ids of any shape, in payload order (named children by name)
    fn all_children(&self, id: NodeId) -> Vec<NodeId> {
        match &self.node(id).payload {
            NodePayload::Children(children) => children.clone(),
            NodePayload::NamedChildren(named) => named.values().copied().collect(),
            NodePayload::None | NodePayload::Scalar(_) => Vec::new(),
        }
    }

    /// Topmost ancestor of `id`
    pub fn root_of(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.node(id).parent {
            id = parent;
        }
        id
    }

    fn restamp_below(&mut self, top: NodeId) {
        let mut stack = vec![top];
        while let Some(id) = stack.pop() {
            let depth = self.node(id).depth + 1;
            for child in self.all_children(id) {
                let node = self.node_mut(child);
                node.parent = Some(id);
                node.depth = depth;
                stack.push(child);
            }
        }
    }

    /// Re-stamp `depth` (and parent links) for everything reachable from the
    /// root; the root itself gets depth 0
    pub fn stamp_depths(&mut self) {
        if let Some(root) = self.root {
            let node = self.node_mut(root);
            node.depth = 0;
            node.parent = None;
            self.restamp_below(root);
        }
    }

    /// Pre-order walk starting at `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            let children = self.all_children(current);
            stack.extend(children.into_iter().rev());
        }
        order
    }

    /// Error nodes reachable from the root, in source order
    pub fn errors(&self) -> Vec<NodeId> {
        self.root
            .map(|root| {
                self.descendants(root)
                    .into_iter()
                    .filter(|id| self.node(*id).is_error())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// Structural equality of the subtree at `a` with the subtree at `b` in
    /// `other`. Roles are compared only when both are set; depth, parent
    /// and span are ignored.
    pub fn equals(&self, a: NodeId, other: &Ast, b: NodeId) -> bool {
        let left = self.node(a);
        let right = other.node(b);

        if let (Some(l), Some(r)) = (&left.role, &right.role) {
            if l != r {
                return false;
            }
        }
        if left.kind != right.kind {
            return false;
        }

        match (&left.payload, &right.payload) {
            (NodePayload::None, NodePayload::None) => true,
            (NodePayload::Scalar(l), NodePayload::Scalar(r)) => l == r,
            (NodePayload::Children(l), NodePayload::Children(r)) => {
                l.len() == r.len()
                    && l.iter()
                        .zip(r.iter())
                        .all(|(lc, rc)| self.equals(*lc, other, *rc))
            }
            (NodePayload::NamedChildren(l), NodePayload::NamedChildren(r)) => {
                l.len() == r.len()
                    && l.iter().all(|(name, lc)| {
                        r.get(name)
                            .is_some_and(|rc| self.equals(*lc, other, *rc))
                    })
            }
            _ => false,
        }
    }

    /// Whole-tree structural equality, comparing roots
    pub fn tree_equals(&self, other: &Ast) -> bool {
        match (self.root, other.root) {
            (Some(a), Some(b)) => self.equals(a, other, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Indented s-expression rendering of the subtree at `id`
    pub fn pretty_print(&self, id: NodeId, indent: usize) -> String {
        let mut out = String::new();
        self.write_node(&mut out, id, indent, None);
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, indent: usize, name: Option<&str>) {
        let node = self.node(id);
        out.push_str(&"  ".repeat(indent));
        if let Some(name) = name {
            out.push_str(&format!("[{}] ", name));
        }
        if let Some(role) = &node.role {
            out.push_str(&format!("{}: ", role));
        }
        out.push('(');
        out.push_str(node.kind.as_str());

        match &node.payload {
            NodePayload::None => {}
            NodePayload::Scalar(Scalar::Str(s)) => out.push_str(&format!(" {:?}", s)),
            NodePayload::Scalar(Scalar::Int(n)) => out.push_str(&format!(" {}", n)),
            NodePayload::Children(children) => {
                for child in children {
                    out.push('\n');
                    self.write_node(out, *child, indent + 1, None);
                }
            }
            NodePayload::NamedChildren(named) => {
                for (child_name, child) in named {
                    out.push('\n');
                    self.write_node(out, *child, indent + 1, Some(child_name));
                }
            }
        }
        out.push(')');
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => f.write_str(&self.pretty_print(root, 0)),
            None => f.write_str("(<no root>)"),
        }
    }
}

/// Read-only view of one node and its surroundings
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    pub fn node(&self) -> &'a Node {
        self.ast.node(self.id)
    }

    pub fn kind(&self) -> NodeKind {
        self.node().kind
    }

    pub fn role(&self) -> Option<&'a str> {
        self.node().role.as_deref()
    }

    pub fn payload(&self) -> &'a NodePayload {
        &self.node().payload
    }

    pub fn shape(&self) -> PayloadShape {
        self.payload().shape()
    }

    pub fn scalar(&self) -> Option<&'a Scalar> {
        self.node().scalar_value()
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self.scalar() {
            Some(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.scalar() {
            Some(Scalar::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&'a str> {
        self.node().message()
    }

    pub fn is_error(&self) -> bool {
        self.node().is_error()
    }

    pub fn depth(&self) -> u32 {
        self.node().depth
    }

    pub fn span(&self) -> Option<Range<usize>> {
        self.node().span.clone()
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let ast = self.ast;
        ast.children(self.id).iter().map(move |id| ast.get(*id))
    }

    pub fn child_count(&self) -> usize {
        self.ast.children(self.id).len()
    }

    pub fn child(&self, index: usize) -> Result<NodeRef<'a>, TreeError> {
        self.ast
            .get_child(self.id, index)
            .map(|id| self.ast.get(id))
    }

    pub fn child_by_name(&self, name: &str) -> Result<NodeRef<'a>, TreeError> {
        self.ast
            .get_child_by_name(self.id, name)
            .map(|id| self.ast.get(id))
    }

    /// First ordered child carrying `role`
    pub fn child_with_role(&self, role: &str) -> Option<NodeRef<'a>> {
        self.children().find(|child| child.role() == Some(role))
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.ast.get(id))
    }

    pub fn root(&self) -> NodeRef<'a> {
        self.ast.get(self.ast.root_of(self.id))
    }

    pub fn equals(&self, other: &NodeRef<'_>) -> bool {
        self.ast.equals(self.id, other.ast, other.id)
    }

    pub fn pretty_print(&self, indent: usize) -> String {
        self.ast.pretty_print(self.id, indent)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_print(0))
    }
}
