//! Offset-based node lookup, for hover and outline in an editor host

use super::node::NodeId;
use super::tree::Ast;

impl Ast {
    /// Nodes whose span contains `offset`, outermost first. Nodes without a
    /// span are walked through but not reported.
    pub fn nodes_at(&self, offset: usize) -> Vec<NodeId> {
        let mut found = Vec::new();
        let Some(mut current) = self.root_id() else {
            return found;
        };

        loop {
            if self.covers(current, offset) {
                found.push(current);
            }
            let next = self
                .get(current)
                .children()
                .find(|child| match &child.node().span {
                    Some(span) => span.contains(&offset),
                    None => child.child_count() > 0,
                });
            match next {
                Some(child) => current = child.id(),
                None => return found,
            }
        }
    }

    fn covers(&self, id: NodeId, offset: usize) -> bool {
        self.node(id)
            .span
            .as_ref()
            .is_some_and(|span| span.contains(&offset))
    }

    /// One line per node at `offset`: kind, role and scalar
    pub fn format_at_offset(&self, offset: usize) -> String {
        let nodes = self.nodes_at(offset);
        if nodes.is_empty() {
            return "No AST nodes at this position".to_string();
        }
        nodes
            .into_iter()
            .map(|id| {
                let node = self.node(id);
                let mut line = format!("- {}", node.kind);
                if let Some(role) = &node.role {
                    line.push_str(&format!(" [{}]", role));
                }
                if let Some(value) = node.scalar_value() {
                    line.push_str(&format!(": {}", value));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
