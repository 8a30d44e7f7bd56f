//! Read-only visitor for inspecting syntax trees.
//!
//! [`walk_node`] traverses a tree depth-first in descent-table order and
//! calls the [`NodeVisitor`] hooks. Rewriting goes through the filter chain
//! instead; visitors never change the tree.
//!
//! # Example
//!
//! ```
//! use arbor_syntax::parse;
//! use arbor_syntax::NodeKind;
//! use arbor_syntax::visitor::{NodeCounter, walk_node};
//!
//! let tree = parse("f(x, y.z)").unwrap();
//! let mut counter = NodeCounter::default();
//! walk_node(&mut counter, &tree);
//! assert_eq!(counter.count(NodeKind::Identifier), 3);
//! ```

use std::collections::BTreeMap;

use crate::ast::{Node, NodeKind};

/// Trait for read-only tree visitors.
///
/// The default implementations do nothing.
#[allow(unused_variables)]
pub trait NodeVisitor {
    /// Called when entering any node, before its children.
    fn enter_node(&mut self, node: &Node) {}

    /// Called when leaving any node, after its children.
    fn leave_node(&mut self, node: &Node) {}

    /// Visit an identifier reference.
    fn visit_identifier(&mut self, name: &str) {}

    /// Visit a number literal.
    fn visit_number(&mut self, value: f64) {}

    /// Visit a string literal.
    fn visit_string(&mut self, value: &str) {}

    /// Visit a boolean literal.
    fn visit_boolean(&mut self, value: bool) {}
}

/// Walk a tree, calling visitor hooks.
///
/// Calls `enter_node`, then the leaf hook for literal kinds, then walks the
/// children in recipe order, then `leave_node`.
pub fn walk_node<V: NodeVisitor + ?Sized>(visitor: &mut V, node: &Node) {
    visitor.enter_node(node);

    match node {
        Node::Identifier(name) => visitor.visit_identifier(name),
        Node::Number(value) => visitor.visit_number(*value),
        Node::String(value) => visitor.visit_string(value),
        Node::Boolean(value) => visitor.visit_boolean(*value),
        _ => {
            for child in node.children() {
                walk_node(visitor, child);
            }
        }
    }

    visitor.leave_node(node);
}

/// Counts nodes, in total and per kind.
#[derive(Debug, Default)]
pub struct NodeCounter {
    /// Total nodes visited.
    pub total: usize,
    /// Nodes visited per kind.
    pub by_kind: BTreeMap<NodeKind, usize>,
}

impl NodeCounter {
    /// Returns how many nodes of `kind` were seen.
    #[must_use]
    pub fn count(&self, kind: NodeKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

impl NodeVisitor for NodeCounter {
    fn enter_node(&mut self, node: &Node) {
        self.total += 1;
        *self.by_kind.entry(node.kind()).or_default() += 1;
    }
}
