use crate::keys::Key;
use crate::mapping::NodeMapping;
use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;
use crate::partials::Prefix;
use crate::utils::bitset::Bitset64;

/// A stored entry: the full key it was inserted under, and its value.
///
/// The key is authoritative. Prefix matches on the way down only prove that the bytes covered by
/// inner-node prefixes agree, so lookups always compare the whole key here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<V> {
    pub(crate) key: Key,
    pub(crate) value: V,
}

impl<V> Leaf<V> {
    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

/// The size class of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Leaf,
    Node4,
    Node16,
    Node48,
    Node256,
}

impl NodeKind {
    /// Maximum number of children; zero for leaves.
    pub fn capacity(&self) -> usize {
        match self {
            NodeKind::Leaf => 0,
            NodeKind::Node4 => 4,
            NodeKind::Node16 => 16,
            NodeKind::Node48 => 48,
            NodeKind::Node256 => 256,
        }
    }
}

pub(crate) struct Node<V> {
    pub(crate) prefix: Prefix,
    pub(crate) content: Content<V>,
}

pub(crate) enum Content<V> {
    Leaf(Leaf<V>),
    Node4(SortedKeyedMapping<Node<V>, 4>),
    Node16(SortedKeyedMapping<Node<V>, 16>),
    Node48(IndexedMapping<Node<V>, 48, Bitset64<1>>),
    Node256(DirectMapping<Node<V>>),
}

impl<V> Node<V> {
    /// Leaves never carry a prefix; their key says everything.
    #[inline]
    pub(crate) fn new_leaf(key: Key, value: V) -> Node<V> {
        Self {
            prefix: Prefix::empty(),
            content: Content::Leaf(Leaf { key, value }),
        }
    }

    #[inline]
    pub(crate) fn new_4(prefix: Prefix) -> Self {
        Self {
            prefix,
            content: Content::Node4(SortedKeyedMapping::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn new_16(prefix: Prefix) -> Self {
        Self {
            prefix,
            content: Content::Node16(SortedKeyedMapping::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn new_48(prefix: Prefix) -> Self {
        Self {
            prefix,
            content: Content::Node48(IndexedMapping::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn new_256(prefix: Prefix) -> Self {
        Self {
            prefix,
            content: Content::Node256(DirectMapping::new()),
        }
    }

    pub(crate) fn kind(&self) -> NodeKind {
        match &self.content {
            Content::Leaf(_) => NodeKind::Leaf,
            Content::Node4(_) => NodeKind::Node4,
            Content::Node16(_) => NodeKind::Node16,
            Content::Node48(_) => NodeKind::Node48,
            Content::Node256(_) => NodeKind::Node256,
        }
    }

    #[inline]
    pub(crate) fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub(crate) fn leaf(&self) -> Option<&Leaf<V>> {
        let Content::Leaf(leaf) = &self.content else {
            return None;
        };
        Some(leaf)
    }

    pub(crate) fn leaf_mut(&mut self) -> Option<&mut Leaf<V>> {
        let Content::Leaf(leaf) = &mut self.content else {
            return None;
        };
        Some(leaf)
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(&self.content, Content::Leaf(_))
    }

    pub(crate) fn num_children(&self) -> usize {
        match &self.content {
            Content::Leaf(_) => 0,
            Content::Node4(km) => km.num_children(),
            Content::Node16(km) => km.num_children(),
            Content::Node48(im) => im.num_children(),
            Content::Node256(dm) => dm.num_children(),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.kind().capacity()
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        match &self.content {
            Content::Leaf(_) => unreachable!("leaves have no children"),
            Content::Node4(km) => km.is_full(),
            Content::Node16(km) => km.is_full(),
            Content::Node48(im) => im.is_full(),
            Content::Node256(dm) => dm.is_full(),
        }
    }

    pub(crate) fn seek_child(&self, key: u8) -> Option<&Node<V>> {
        match &self.content {
            Content::Leaf(_) => None,
            Content::Node4(km) => km.seek_child(key),
            Content::Node16(km) => km.seek_child(key),
            Content::Node48(im) => im.seek_child(key),
            Content::Node256(dm) => dm.seek_child(key),
        }
    }

    pub(crate) fn seek_child_mut(&mut self, key: u8) -> Option<&mut Node<V>> {
        match &mut self.content {
            Content::Leaf(_) => None,
            Content::Node4(km) => km.seek_child_mut(key),
            Content::Node16(km) => km.seek_child_mut(key),
            Content::Node48(im) => im.seek_child_mut(key),
            Content::Node256(dm) => dm.seek_child_mut(key),
        }
    }

    /// Attaches `node` under `key`. The node must not be full; callers grow it first.
    pub(crate) fn add_child(&mut self, key: u8, node: Node<V>) {
        debug_assert!(!self.is_full(), "add_child on a full {:?}", self.kind());
        match &mut self.content {
            Content::Leaf(_) => unreachable!("cannot add a child to a leaf"),
            Content::Node4(km) => km.add_child(key, node),
            Content::Node16(km) => km.add_child(key, node),
            Content::Node48(im) => im.add_child(key, node),
            Content::Node256(dm) => dm.add_child(key, node),
        }
    }

    /// Replaces the content with the next size class, moving every child across. The prefix
    /// stays as it is.
    pub(crate) fn grow(&mut self) {
        let grown = match &mut self.content {
            Content::Node4(km) => Content::Node16(SortedKeyedMapping::from_resized(km)),
            Content::Node16(km) => Content::Node48(IndexedMapping::from_sorted_keyed(km)),
            Content::Node48(im) => Content::Node256(DirectMapping::from_indexed(im)),
            Content::Node256(_) => unreachable!("Should never grow a node256"),
            Content::Leaf(_) => unreachable!("Should never grow a leaf"),
        };
        // The old content was emptied by the conversion above, so dropping it frees no children.
        self.content = grown;
    }

    /// Children in ascending key-byte order.
    pub(crate) fn iter(&self) -> Box<dyn Iterator<Item = (u8, &Self)> + '_> {
        match &self.content {
            Content::Leaf(_) => Box::new(std::iter::empty()),
            Content::Node4(km) => Box::new(km.iter()),
            Content::Node16(km) => Box::new(km.iter()),
            Content::Node48(im) => Box::new(im.iter()),
            Content::Node256(dm) => Box::new(dm.iter()),
        }
    }
}
