//! Decision-tree nodes.
//!
//! A node is either a leaf carrying a predicted class or an internal node
//! carrying a split attribute and one child per domain value. Trees are
//! grown once and never mutated afterwards, so nodes hold no parent links;
//! a node's position under its parent already says which value it handles.

use serde::{Deserialize, Serialize};

/// One node of a fitted decision tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// A terminal node.
    Leaf(LeafNode),
    /// A split node.
    Internal(InternalNode),
}

/// Terminal node payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    /// Index of the predicted label in the schema's label list.
    pub label: usize,
    /// Training rows that reached this leaf. `None` when the leaf was grown
    /// for an empty subset and predicts an inherited default label.
    pub rows: Option<Vec<usize>>,
}

/// Split node payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalNode {
    /// Index of the split attribute in the schema's attribute list.
    pub attribute: usize,
    /// One child per domain value of `attribute`, positionally aligned with
    /// the domain. That alignment is what classification and printing walk.
    pub children: Vec<Node>,
    /// Training rows that reached this node.
    pub rows: Option<Vec<usize>>,
}

impl Node {
    /// Whether this node is terminal.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Number of leaves in the subtree rooted here.
    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Internal(node) => node.children.iter().map(Node::n_leaves).sum(),
        }
    }

    /// Depth of the subtree rooted here. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Internal(node) => 1 + node.children.iter().map(Node::depth).max().unwrap_or(0),
        }
    }
}
