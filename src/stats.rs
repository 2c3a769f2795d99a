use std::collections::HashMap;

use crate::node::{Node, NodeType};

/// Aggregate shape statistics for a tree, gathered by a full pre-order
/// walk via [`AdaptiveRadixTree::stats`].
///
/// [`AdaptiveRadixTree::stats`]: crate::AdaptiveRadixTree::stats
#[derive(Debug, Default)]
pub struct TreeStats {
    /// Number of nodes of each layout, leaves included.
    pub node_counts: HashMap<NodeType, usize>,
    /// Number of key-value pairs.
    pub num_keys: usize,
    pub num_inner_nodes: usize,
    /// Longest root-to-leaf path, counted in nodes.
    pub max_height: usize,
    /// Occupied fraction of all inner-node child slots.
    pub density: f64,
    pub(crate) total_children: usize,
    pub(crate) total_slots: usize,
}

impl TreeStats {
    pub fn count(&self, node_type: NodeType) -> usize {
        self.node_counts.get(&node_type).copied().unwrap_or(0)
    }
}

pub(crate) fn update_tree_stats<V>(stats: &mut TreeStats, node: &Node<V>, height: usize) {
    *stats.node_counts.entry(node.node_type()).or_insert(0) += 1;
    if height > stats.max_height {
        stats.max_height = height;
    }
    match node {
        Node::Leaf(_) => stats.num_keys += 1,
        Node::Inner(inner) => {
            stats.num_inner_nodes += 1;
            stats.total_children += inner.num_children();
            stats.total_slots += inner.capacity();
        }
    }
}
