//! Adaptive Radix Tree implementation.
//!
//! This module contains the main [`AdaptiveRadixTree`] and its search and insert algorithms.

use std::fmt;

use crate::config::{DuplicatePolicy, TreeConfig};
use crate::iter::Iter;
use crate::keys::Key;
use crate::node::{Leaf, Node};
use crate::partials::Prefix;

/// An Adaptive Radix Tree (ART) over fixed 8-byte keys.
///
/// Inner nodes switch between four size classes (4, 16, 48 and 256 children) as they fill up,
/// and runs of key bytes shared by a whole subtree are compressed into the subtree root's
/// prefix. Lookups visit at most one node per key byte, whatever the number of entries.
///
/// ## Examples
///
/// ```rust
/// use octart::{AdaptiveRadixTree, Key};
///
/// let mut tree = AdaptiveRadixTree::<&str>::new();
///
/// tree.insert(42u64, "answer");
/// tree.insert(-7i64, "negative");
/// tree.insert([0, 1, 2, 3, 4, 5, 6, 7], "raw bytes");
///
/// assert_eq!(tree.get(42u64), Some(&"answer"));
/// assert_eq!(tree.get(43u64), None);
///
/// let leaf = tree.search(&Key::new([0, 1, 2, 3, 4, 5, 6, 7])).unwrap();
/// assert_eq!(leaf.value(), &"raw bytes");
///
/// // Entries come back in ascending key order.
/// let values: Vec<_> = tree.iter().map(|(_, v)| *v).collect();
/// assert_eq!(values, vec!["answer", "raw bytes", "negative"]);
/// ```
pub struct AdaptiveRadixTree<V> {
    root: Option<Node<V>>,
    len: usize,
    config: TreeConfig,
}

impl<V> Default for AdaptiveRadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> AdaptiveRadixTree<V> {
    /// Create a new empty tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            root: None,
            len: 0,
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn root(&self) -> Option<&Node<V>> {
        self.root.as_ref()
    }

    /// Find the leaf stored under `key`.
    ///
    /// Never modifies the tree. A miss is `None`, not an error.
    pub fn search(&self, key: &Key) -> Option<&Leaf<V>> {
        let mut cur_node = self.root.as_ref()?;
        let mut depth = 0;
        loop {
            if let Some(leaf) = cur_node.leaf() {
                // Prefixes on the way down only cover some of the bytes, so check them all.
                return (leaf.key == *key).then_some(leaf);
            }

            let prefix = cur_node.prefix();
            if prefix.prefix_length_key(key, depth) != prefix.len() {
                return None;
            }
            depth += prefix.len();

            // The byte at `depth` picks the child and is consumed by it.
            cur_node = cur_node.seek_child(key.get(depth)?)?;
            depth += 1;
        }
    }

    /// Get a value by key (generic version).
    #[inline]
    pub fn get<K>(&self, key: K) -> Option<&V>
    where
        K: Into<Key>,
    {
        self.get_k(&key.into())
    }

    /// Get a value by key reference.
    #[inline]
    pub fn get_k(&self, key: &Key) -> Option<&V> {
        self.search(key).map(Leaf::value)
    }

    pub fn contains_key<K>(&self, key: K) -> bool
    where
        K: Into<Key>,
    {
        self.get_k(&key.into()).is_some()
    }

    /// Get a mutable reference to a value by key (generic version).
    #[inline]
    pub fn get_mut<K>(&mut self, key: K) -> Option<&mut V>
    where
        K: Into<Key>,
    {
        self.get_mut_k(&key.into())
    }

    /// Get a mutable reference to a value by key reference.
    pub fn get_mut_k(&mut self, key: &Key) -> Option<&mut V> {
        Self::get_mut_recurse(self.root.as_mut()?, key, 0)
    }

    fn get_mut_recurse<'a>(cur_node: &'a mut Node<V>, key: &Key, depth: usize) -> Option<&'a mut V> {
        if cur_node.is_leaf() {
            let leaf = cur_node.leaf_mut()?;
            return (leaf.key == *key).then_some(&mut leaf.value);
        }

        let prefix_len = cur_node.prefix().len();
        if cur_node.prefix().prefix_length_key(key, depth) != prefix_len {
            return None;
        }
        let depth = depth + prefix_len;
        let child = cur_node.seek_child_mut(key.get(depth)?)?;
        Self::get_mut_recurse(child, key, depth + 1)
    }

    /// Insert a key-value pair (generic version).
    ///
    /// Returns `None` if the key was not present before. For an existing key the outcome
    /// depends on the configured [`DuplicatePolicy`]:
    ///
    /// - `Replace` stores the new value and returns `Some(old_value)`.
    /// - `KeepExisting` leaves the tree alone and returns `Some(value)`, the rejected value.
    ///
    /// ```rust
    /// use octart::AdaptiveRadixTree;
    ///
    /// let mut tree = AdaptiveRadixTree::<i32>::new();
    /// assert_eq!(tree.insert(1u64, 100), None);
    /// assert_eq!(tree.insert(1u64, 200), Some(100));
    /// assert_eq!(tree.get(1u64), Some(&200));
    /// ```
    #[inline]
    pub fn insert<K>(&mut self, key: K, value: V) -> Option<V>
    where
        K: Into<Key>,
    {
        self.insert_k(&key.into(), value)
    }

    /// Insert a key-value pair using a key reference.
    pub fn insert_k(&mut self, key: &Key, value: V) -> Option<V> {
        let Some(root) = self.root.as_mut() else {
            // The first node simply becomes the root.
            self.root = Some(Node::new_leaf(*key, value));
            self.len = 1;
            return None;
        };

        let result = Self::insert_recurse(root, key, value, 0, self.config.duplicate_policy);
        if result.is_none() {
            self.len += 1;
        }
        result
    }

    fn insert_recurse(
        cur_node: &mut Node<V>,
        key: &Key,
        value: V,
        depth: usize,
        policy: DuplicatePolicy,
    ) -> Option<V> {
        if let Some(leaf) = cur_node.leaf_mut() {
            if leaf.key == *key {
                return Some(match policy {
                    DuplicatePolicy::Replace => std::mem::replace(&mut leaf.value, value),
                    DuplicatePolicy::KeepExisting => value,
                });
            }

            // Two different keys now share this slot. They agree on everything above `depth`;
            // the run they still share from here becomes the prefix of a new binary inner node.
            let existing_key = leaf.key;
            let shared = key.common_prefix_length(&existing_key, depth);
            let split_at = depth + shared;
            let (Some(new_byte), Some(existing_byte)) =
                (key.get(split_at), existing_key.get(split_at))
            else {
                unreachable!("distinct keys must differ before the end of the key");
            };

            // Build the replacement in full, then swap it in and hang the old leaf beneath it.
            let n4 = Node::new_4(Prefix::from_slice(&key.bytes_from(depth)[..shared]));
            let existing = std::mem::replace(cur_node, n4);
            cur_node.add_child(existing_byte, existing);
            cur_node.add_child(new_byte, Node::new_leaf(*key, value));
            return None;
        }

        let cur_node_prefix = *cur_node.prefix();
        let longest_common_prefix = cur_node_prefix.prefix_length_key(key, depth);

        // The key leaves this node's prefix part way through. Split: a new inner node takes the
        // shared part, and the current node keeps what follows the byte where they diverged.
        if longest_common_prefix != cur_node_prefix.len() {
            let Some(new_byte) = key.get(depth + longest_common_prefix) else {
                unreachable!("prefix longer than the remaining key");
            };
            let existing_byte = cur_node_prefix.at(longest_common_prefix);

            cur_node.prefix = cur_node_prefix.partial_after(longest_common_prefix + 1);
            let n4 = Node::new_4(cur_node_prefix.partial_before(longest_common_prefix));
            let existing = std::mem::replace(cur_node, n4);
            cur_node.add_child(existing_byte, existing);
            cur_node.add_child(new_byte, Node::new_leaf(*key, value));
            return None;
        }

        let depth = depth + cur_node_prefix.len();
        let Some(k) = key.get(depth) else {
            unreachable!("inner node prefix reaches the end of the key");
        };

        if let Some(child) = cur_node.seek_child_mut(k) {
            return Self::insert_recurse(child, key, value, depth + 1, policy);
        }

        if cur_node.is_full() {
            cur_node.grow();
        }
        cur_node.add_child(k, Node::new_leaf(*key, value));
        None
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Iterate over all entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root.as_ref(), self.len)
    }

    /// Iterate over all keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate over all values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<'a, V> IntoIterator for &'a AdaptiveRadixTree<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<Key>, V> Extend<(K, V)> for AdaptiveRadixTree<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<Key>, V> FromIterator<(K, V)> for AdaptiveRadixTree<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = AdaptiveRadixTree::new();
        tree.extend(iter);
        tree
    }
}

impl<V: fmt::Debug> fmt::Debug for AdaptiveRadixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{DuplicatePolicy, TreeConfig};
    use crate::keys::Key;
    use crate::node::{Node, NodeKind};
    use crate::tree::AdaptiveRadixTree;

    fn root<V>(tree: &AdaptiveRadixTree<V>) -> &Node<V> {
        tree.root.as_ref().expect("tree has a root")
    }

    fn value_under<V: Copy>(node: &Node<V>, byte: u8) -> Option<V> {
        node.seek_child(byte)
            .and_then(|c| c.leaf())
            .map(|l| *l.value())
    }

    #[test]
    fn test_empty_tree() {
        let tree = AdaptiveRadixTree::<i32>::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.search(&Key::new([0; 8])).is_none());
        assert_eq!(tree.get(0u64), None);
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_leaf_promotion() {
        let mut tree = AdaptiveRadixTree::<i32>::new();
        let k1 = Key::new([1, 2, 3, 4, 5, 6, 7, 8]);
        let k2 = Key::new([1, 2, 3, 4, 9, 9, 9, 9]);

        assert_eq!(tree.insert(k1, 1), None);
        assert_eq!(root(&tree).kind(), NodeKind::Leaf);
        assert_eq!(tree.get(k1), Some(&1));

        assert_eq!(tree.insert(k2, 2), None);
        let r = root(&tree);
        assert_eq!(r.kind(), NodeKind::Node4);
        assert_eq!(r.prefix().to_slice(), &[1, 2, 3, 4]);
        assert_eq!(r.num_children(), 2);
        assert_eq!(value_under(r, 5), Some(1));
        assert_eq!(value_under(r, 9), Some(2));
        assert_eq!(tree.get(k1), Some(&1));
        assert_eq!(tree.get(k2), Some(&2));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_prefix_split_on_leaf() {
        let mut tree = AdaptiveRadixTree::<i32>::new();
        let k1 = Key::new([0, 1, 2, 3, 4, 5, 6, 7]);
        let k2 = Key::new([0, 1, 9, 3, 4, 5, 6, 7]);
        tree.insert(k1, 1);
        tree.insert(k2, 2);

        let r = root(&tree);
        assert_eq!(r.kind(), NodeKind::Node4);
        assert_eq!(r.prefix().to_slice(), &[0, 1]);
        assert_eq!(r.prefix().len(), 2);
        assert_eq!(value_under(r, 2), Some(1));
        assert_eq!(value_under(r, 9), Some(2));
        assert_eq!(tree.search(&k1).map(|l| *l.key()), Some(k1));
        assert_eq!(tree.search(&k2).map(|l| *l.key()), Some(k2));
    }

    #[test]
    fn test_prefix_split_on_inner_node() {
        let mut tree = AdaptiveRadixTree::<i32>::new();
        let a = Key::new([1, 2, 3, 4, 5, 6, 7, 8]);
        let b = Key::new([1, 2, 3, 4, 5, 6, 7, 9]);
        let c = Key::new([1, 2, 3, 0, 0, 0, 0, 0]);
        tree.insert(a, 1);
        tree.insert(b, 2);
        assert_eq!(root(&tree).prefix().to_slice(), &[1, 2, 3, 4, 5, 6, 7]);

        tree.insert(c, 3);
        let r = root(&tree);
        assert_eq!(r.kind(), NodeKind::Node4);
        assert_eq!(r.prefix().to_slice(), &[1, 2, 3]);
        assert_eq!(value_under(r, 0), Some(3));

        // The old node moved down under its first diverging byte, keeping only what follows it.
        let moved = r.seek_child(4).unwrap();
        assert_eq!(moved.kind(), NodeKind::Node4);
        assert_eq!(moved.prefix().to_slice(), &[5, 6, 7]);
        assert_eq!(value_under(moved, 8), Some(1));
        assert_eq!(value_under(moved, 9), Some(2));

        assert_eq!(tree.get(a), Some(&1));
        assert_eq!(tree.get(b), Some(&2));
        assert_eq!(tree.get(c), Some(&3));
        // Shares the new root prefix but nothing below it.
        assert_eq!(tree.get([1, 2, 3, 4, 5, 6, 0, 8]), None);
        assert_eq!(tree.get([1, 2, 3, 7, 5, 6, 7, 8]), None);
    }

    #[test]
    fn test_split_at_first_byte_gives_empty_prefix() {
        let mut tree = AdaptiveRadixTree::<i32>::new();
        tree.insert([1, 1, 1, 1, 1, 1, 1, 1], 1);
        tree.insert([1, 1, 1, 1, 1, 1, 1, 2], 2);
        tree.insert([2, 1, 1, 1, 1, 1, 1, 1], 3);
        let r = root(&tree);
        assert!(r.prefix().is_empty());
        let moved = r.seek_child(1).unwrap();
        assert_eq!(moved.prefix().to_slice(), &[1, 1, 1, 1, 1, 1]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get([1, 1, 1, 1, 1, 1, 1, 2]), Some(&2));
    }

    #[test]
    fn test_capacity_transition() {
        let mut tree = AdaptiveRadixTree::<u8>::new();
        for b in 0x00..=0x04u8 {
            tree.insert([7, 7, 7, 7, 7, 7, 7, b], b);
            let r = root(&tree);
            match b {
                0 => assert_eq!(r.kind(), NodeKind::Leaf),
                1..=3 => assert_eq!(r.kind(), NodeKind::Node4),
                _ => assert_eq!(r.kind(), NodeKind::Node16),
            }
        }
        let r = root(&tree);
        assert_eq!(r.num_children(), 5);
        assert_eq!(r.prefix().to_slice(), &[7; 7]);
        for b in 0x00..=0x04u8 {
            assert_eq!(value_under(r, b), Some(b));
            assert_eq!(tree.get([7, 7, 7, 7, 7, 7, 7, b]), Some(&b));
        }
    }

    #[test]
    fn test_all_size_classes_under_one_parent() {
        let mut tree = AdaptiveRadixTree::<u8>::new();
        for b in 0..=255u8 {
            tree.insert([0, 0, 0, 0, 0, 0, 0, b], b);
            let expected = match b as usize + 1 {
                1 => NodeKind::Leaf,
                2..=4 => NodeKind::Node4,
                5..=16 => NodeKind::Node16,
                17..=48 => NodeKind::Node48,
                _ => NodeKind::Node256,
            };
            assert_eq!(root(&tree).kind(), expected, "after {} children", b as usize + 1);
        }
        for b in 0..=255u8 {
            assert_eq!(tree.get([0, 0, 0, 0, 0, 0, 0, b]), Some(&b));
        }
        assert_eq!(tree.len(), 256);
    }

    #[test]
    fn test_sentinel_bytes_are_ordinary_keys() {
        let mut tree = AdaptiveRadixTree::<u32>::new();
        let keys: [[u8; 8]; 6] = [
            [255; 8],
            [0; 8],
            [50; 8],
            [255, 0, 255, 0, 255, 0, 255, 0],
            [0, 0, 0, 0, 0, 0, 0, 255],
            [50, 50, 50, 50, 50, 50, 50, 255],
        ];
        for (i, k) in keys.iter().enumerate() {
            tree.insert(*k, i as u32);
        }
        for (i, k) in keys.iter().enumerate() {
            assert_eq!(tree.get(*k), Some(&(i as u32)));
        }
        assert_eq!(tree.get([255, 255, 255, 255, 255, 255, 255, 0]), None);
        assert_eq!(tree.get([0, 0, 0, 0, 0, 0, 0, 50]), None);

        // Also through a Node48, where the byte maps to a slot.
        let mut tree = AdaptiveRadixTree::<u32>::new();
        for b in [255u8, 0, 50].into_iter().chain(100..120) {
            tree.insert([1, 1, 1, 1, 1, 1, 1, b], b as u32);
        }
        assert_eq!(root(&tree).kind(), NodeKind::Node48);
        assert_eq!(tree.get([1, 1, 1, 1, 1, 1, 1, 255]), Some(&255));
        assert_eq!(tree.get([1, 1, 1, 1, 1, 1, 1, 0]), Some(&0));
        assert_eq!(tree.get([1, 1, 1, 1, 1, 1, 1, 50]), Some(&50));
        assert_eq!(tree.get([1, 1, 1, 1, 1, 1, 1, 1]), None);
    }

    #[test]
    fn test_search_is_idempotent() {
        let tree: AdaptiveRadixTree<u64> = (0..1000u64).map(|i| (i * 7919, i)).collect();
        for i in 0..1000u64 {
            let first = tree.search(&Key::from(i * 7919)).cloned();
            let second = tree.search(&Key::from(i * 7919)).cloned();
            assert_eq!(first, second);
            assert_eq!(first.map(|l| *l.value()), Some(i));
        }
        assert_eq!(tree.len(), 1000);
    }

    #[test]
    fn test_replace_policy() {
        let mut tree = AdaptiveRadixTree::<&str>::new();
        assert_eq!(tree.insert(5u64, "a"), None);
        assert_eq!(tree.insert(6u64, "b"), None);
        assert_eq!(tree.insert(5u64, "c"), Some("a"));
        assert_eq!(tree.get(5u64), Some(&"c"));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_keep_existing_policy() {
        let config = TreeConfig::default().with_duplicate_policy(DuplicatePolicy::KeepExisting);
        let mut tree = AdaptiveRadixTree::<&str>::with_config(config);
        assert_eq!(tree.insert(5u64, "a"), None);
        assert_eq!(tree.insert(5u64, "c"), Some("c"));
        assert_eq!(tree.get(5u64), Some(&"a"));
        // Also when the duplicate sits below an inner node.
        assert_eq!(tree.insert(6u64, "b"), None);
        assert_eq!(tree.insert(6u64, "d"), Some("d"));
        assert_eq!(tree.get(6u64), Some(&"b"));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_get_mut() {
        let mut tree = AdaptiveRadixTree::<String>::new();
        for i in 0..100u64 {
            tree.insert(i << 8, i.to_string());
        }
        for i in 0..100u64 {
            tree.get_mut(i << 8).unwrap().push('!');
        }
        assert!(tree.get_mut(1u64).is_none());
        assert!(tree.get_mut(u64::MAX).is_none());
        for i in 0..100u64 {
            assert_eq!(tree.get(i << 8), Some(&format!("{i}!")));
        }
    }

    #[test]
    fn test_clear_and_contains() {
        let mut tree: AdaptiveRadixTree<i64> = (-10..10i64).map(|i| (i, i)).collect();
        assert!(tree.contains_key(-10i64));
        assert!(!tree.contains_key(10i64));
        tree.clear();
        assert!(tree.is_empty());
        assert!(!tree.contains_key(-10i64));
        tree.insert(3i64, 3);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AdaptiveRadixTree<String>>();
    }

    #[test]
    fn test_debug_lists_entries_in_order() {
        let tree: AdaptiveRadixTree<u8> = [(2u64, 2u8), (1u64, 1u8)].into_iter().collect();
        let s = format!("{:?}", tree);
        assert!(s.starts_with("{Key([0, 0, 0, 0, 0, 0, 0, 1]): 1"), "{s}");
    }
}
