//! The tree façade and the insert, search, and delete algorithms.
//!
//! All three algorithms descend from the root following key bytes and
//! compressed prefixes. Mutation works on *slots* (`Option<Box<Node>>`):
//! the parent's child pointer, or the tree's root pointer, is the unit of
//! replacement whenever a node changes shape.

use crate::iter::Iter;
use crate::node::{Header, InnerNode, Node, NodeRef, byte_at, longest_common_prefix};
use crate::stats::{TreeStats, update_tree_stats};

/// An Adaptive Radix Tree: an ordered map from byte-string keys to values.
///
/// Inner nodes adapt their layout (4, 16, 48 or 256 child slots) to the
/// number of children they hold, paths with no branches are compressed
/// into per-node prefixes, and single keys are stored as leaves without
/// expanding their full path.
///
/// ## Examples
///
/// ```rust
/// use artree::AdaptiveRadixTree;
///
/// let mut tree = AdaptiveRadixTree::new();
/// tree.insert(b"apple", 1);
/// tree.insert(b"application", 2);
///
/// assert_eq!(tree.get(b"apple"), Some(&1));
/// assert_eq!(tree.get(b"orange"), None);
/// assert_eq!(tree.len(), 2);
///
/// assert!(tree.remove(b"apple"));
/// assert!(!tree.remove(b"apple"));
/// ```
pub struct AdaptiveRadixTree<V> {
    root: Option<Box<Node<V>>>,
    size: usize,
}

impl<V> Default for AdaptiveRadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> AdaptiveRadixTree<V> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Number of key-value pairs in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Look up `key`.
    #[inline]
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let mut cur = self.root.as_deref();
        let mut depth = 0;
        while let Some(node) = cur {
            if node.is_leaf() {
                return if node.leaf_matches(key) {
                    node.value()
                } else {
                    None
                };
            }
            if node.prefix_mismatch(key, depth) != node.prefix_len() {
                return None;
            }
            depth += node.prefix_len();
            cur = node.seek_child(byte_at(key, depth));
            depth += 1;
        }
        None
    }

    /// Look up `key`, returning a mutable reference to its value.
    #[inline]
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let mut cur = self.root.as_deref_mut()?;
        let mut depth = 0;
        loop {
            if cur.is_leaf() {
                return if cur.leaf_matches(key) {
                    cur.value_mut()
                } else {
                    None
                };
            }
            if cur.prefix_mismatch(key, depth) != cur.prefix_len() {
                return None;
            }
            depth += cur.prefix_len();
            let c = byte_at(key, depth);
            cur = cur.seek_child_mut(c)?;
            depth += 1;
        }
    }

    /// Insert `key` with `value`, overwriting the value under an equal key.
    /// The key bytes are copied; the caller keeps ownership of its buffer.
    #[inline]
    pub fn insert(&mut self, key: &[u8], value: V) {
        if Self::insert_recurse(&mut self.root, key, value, 0) {
            self.size += 1;
        }
    }

    /// Remove `key`. Returns true iff a key-value pair was removed.
    pub fn remove(&mut self, key: &[u8]) -> bool {
        if key.is_empty() {
            return false;
        }
        let removed = Self::remove_recurse(&mut self.root, key, 0);
        if removed {
            self.size -= 1;
        }
        removed
    }

    /// Visit every node in pre-order, children in ascending key-byte order.
    /// Leaves are therefore reached in ascending lexicographic key order.
    pub fn each<F>(&self, mut callback: F)
    where
        F: FnMut(NodeRef<'_, V>),
    {
        if let Some(root) = self.root.as_deref() {
            Self::each_recurse(root, &mut callback);
        }
    }

    /// Iterate `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root.as_deref())
    }

    /// Entry with the lexicographically smallest key.
    pub fn minimum(&self) -> Option<(&[u8], &V)> {
        let leaf = self.root.as_deref()?.minimum();
        Some((&leaf.key, &leaf.value))
    }

    /// Entry with the lexicographically largest key.
    pub fn maximum(&self) -> Option<(&[u8], &V)> {
        let leaf = self.root.as_deref()?.maximum();
        Some((&leaf.key, &leaf.value))
    }

    /// Gather shape statistics with a full pre-order walk.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        if let Some(root) = self.root.as_deref() {
            Self::stats_recurse(root, &mut stats, 1);
        }
        if stats.total_slots > 0 {
            stats.density = stats.total_children as f64 / stats.total_slots as f64;
        }
        stats
    }
}

// Internals implementation
impl<V> AdaptiveRadixTree<V> {
    /// Returns true when the tree gained a key (as opposed to overwriting).
    fn insert_recurse(
        slot: &mut Option<Box<Node<V>>>,
        key: &[u8],
        value: V,
        mut depth: usize,
    ) -> bool {
        let Some(cur) = slot.as_deref_mut() else {
            *slot = Some(Box::new(Node::new_leaf(key, value)));
            return true;
        };

        if let Node::Leaf(leaf) = cur {
            // Equal key: overwrite in place.
            if leaf.matches(key) {
                leaf.value = value;
                return false;
            }

            // Lazy expansion ends here: a fresh node4 takes the span the
            // two keys share as its prefix and both leaves hang off it. A
            // key that ends at the divergence point hangs off edge 0.
            let limit = longest_common_prefix(&leaf.key, key, depth);
            let old_edge = byte_at(&leaf.key, depth + limit);
            let new_edge = byte_at(key, depth + limit);
            let header = Header::from_key(key, depth, limit);

            let old_node = slot.take().unwrap();
            let mut branch = InnerNode::new_node4(header);
            branch.add_child(old_edge, old_node);
            branch.add_child(new_edge, Box::new(Node::new_leaf(key, value)));
            *slot = Some(Box::new(Node::Inner(branch)));
            return true;
        }

        let Node::Inner(inner) = cur else {
            unreachable!("leaf insertions handled above")
        };

        let prefix_len = inner.header.prefix_len;
        if prefix_len != 0 {
            let mismatch = inner.prefix_mismatch(key, depth);
            if mismatch != prefix_len {
                // The key departs inside this node's compressed path. A new
                // node4 takes over the matched span; this node keeps the
                // tail and joins the new leaf as a sibling under it.
                let (old_edge, parent_header) = inner.split_prefix(mismatch, depth);
                let new_edge = byte_at(key, depth + mismatch);

                let old_node = slot.take().unwrap();
                let mut branch = InnerNode::new_node4(parent_header);
                branch.add_child(old_edge, old_node);
                branch.add_child(new_edge, Box::new(Node::new_leaf(key, value)));
                *slot = Some(Box::new(Node::Inner(branch)));
                return true;
            }
            depth += prefix_len;
        }

        let c = byte_at(key, depth);
        let Some(child_slot) = inner.child_slot_mut(c) else {
            inner.add_child(c, Box::new(Node::new_leaf(key, value)));
            return true;
        };
        Self::insert_recurse(child_slot, key, value, depth + 1)
    }

    fn remove_recurse(slot: &mut Option<Box<Node<V>>>, key: &[u8], mut depth: usize) -> bool {
        let Some(cur) = slot.as_deref_mut() else {
            return false;
        };

        // A leaf here is the root, or a non-matching child descended into
        // below; matching children are detached by their parent instead.
        if cur.is_leaf() {
            if cur.leaf_matches(key) {
                *slot = None;
                return true;
            }
            return false;
        }

        let prefix_len = cur.prefix_len();
        if prefix_len != 0 {
            if cur.prefix_mismatch(key, depth) != prefix_len {
                return false;
            }
            depth += prefix_len;
        }

        let c = byte_at(key, depth);
        let child_is_matching_leaf = match cur.seek_child(c) {
            Some(child) => child.leaf_matches(key),
            None => return false,
        };

        // A matching leaf is detached at its parent, so the parent can
        // shrink (or collapse) in the same step.
        if child_is_matching_leaf {
            cur.remove_child(c);
            return true;
        }

        let Node::Inner(inner) = cur else {
            unreachable!("leaves handled above")
        };
        let Some(child_slot) = inner.child_slot_mut(c) else {
            return false;
        };
        Self::remove_recurse(child_slot, key, depth + 1)
    }

    fn each_recurse<F>(node: &Node<V>, callback: &mut F)
    where
        F: FnMut(NodeRef<'_, V>),
    {
        callback(NodeRef { node });
        for (_edge, child) in node.children() {
            Self::each_recurse(child, callback);
        }
    }

    fn stats_recurse(node: &Node<V>, stats: &mut TreeStats, height: usize) {
        update_tree_stats(stats, node, height);
        for (_edge, child) in node.children() {
            Self::stats_recurse(child, stats, height + 1);
        }
    }
}
