//! # artree — Adaptive Radix Tree
//!
//! An in-memory ordered index from byte-string keys to arbitrary values,
//! implemented as an Adaptive Radix Tree (ART).
//!
//! ## Overview
//!
//! An ART is a trie whose inner nodes adapt their layout (4, 16, 48 or 256
//! child slots) to the number of children they actually hold, combined with
//! path compression and lazy leaf expansion:
//!
//! - **Space efficient**: node layouts grow and shrink with local density
//! - **Cache friendly**: narrow nodes are a handful of sorted bytes
//! - **Fast operations**: O(k) where k is the key length
//! - **Ordered**: traversal visits keys in lexicographic order
//!
//! ## Quick Start
//!
//! ```rust
//! use artree::AdaptiveRadixTree;
//!
//! let mut tree = AdaptiveRadixTree::new();
//!
//! tree.insert(b"hello", "world".to_string());
//! tree.insert(b"foo", "bar".to_string());
//!
//! assert_eq!(tree.get(b"hello"), Some(&"world".to_string()));
//! assert_eq!(tree.get(b"missing"), None);
//! assert_eq!(tree.len(), 2);
//!
//! for (key, value) in tree.iter() {
//!     println!("{:?} -> {}", key, value);
//! }
//!
//! assert!(tree.remove(b"foo"));
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! Keys are arbitrary byte strings; the tree copies them on insert, so the
//! caller keeps ownership of its buffers. The tree is not internally
//! synchronized: callers serialize access externally.

// Private implementation modules
mod node;

// Internal modules (public for benchmarking, not part of the stable API)
#[doc(hidden)]
pub mod mapping;
#[doc(hidden)]
pub mod utils;

// Public API modules
pub mod iter;
pub mod stats;
pub mod tree;

// Re-export main types for convenience
pub use iter::Iter;
pub use node::{NodeRef, NodeType};
pub use stats::TreeStats;
pub use tree::AdaptiveRadixTree;
