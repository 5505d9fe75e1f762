//! # octart
//!
//! An Adaptive Radix Tree (ART) keyed by fixed 8-byte keys, after Leis et al., "The Adaptive
//! Radix Tree: ARTful Indexing for Main-Memory Databases".
//!
//! Inner nodes come in four sizes and grow from one to the next as children are added:
//!
//! - **Node4** and **Node16** keep up to 4 or 16 key bytes sorted next to their children.
//! - **Node48** maps each of the 256 possible key bytes to one of 48 child slots.
//! - **Node256** holds one child slot per key byte.
//!
//! Key bytes shared by every key below a node are stored once, in that node's prefix, so long
//! common runs cost one node rather than one per byte.
//!
//! ## Quick Start
//!
//! ```rust
//! use octart::AdaptiveRadixTree;
//!
//! let mut tree = AdaptiveRadixTree::<&str>::new();
//! tree.insert(1u64, "one");
//! tree.insert(1_000_000u64, "a million");
//!
//! assert_eq!(tree.get(1u64), Some(&"one"));
//! assert!(tree.get(2u64).is_none());
//! assert_eq!(tree.len(), 2);
//! ```
//!
//! Keys are anything that converts into a [`Key`]: `[u8; 8]`, `u64` (big-endian) and `i64`
//! (sign bit flipped so negative numbers sort first). Byte slices go through `TryFrom` and fail
//! with a [`KeyError`] unless they are exactly eight bytes long.
//!
//! Removal is not supported; nodes only ever grow.

pub mod config;
pub mod error;
pub mod iter;
pub mod keys;
pub mod mapping;
mod node;
pub mod partials;
pub mod stats;
pub mod tree;
pub mod utils;

pub use config::{DuplicatePolicy, TreeConfig};
pub use error::KeyError;
pub use keys::{KEY_LEN, Key};
pub use node::{Leaf, NodeKind};
pub use tree::AdaptiveRadixTree;
