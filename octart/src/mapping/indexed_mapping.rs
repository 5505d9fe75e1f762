use crate::mapping::NodeMapping;
use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;
use crate::utils::bitarray::BitArray;
use crate::utils::bitset::{Bitset64, BitsetTrait};

/// A mapping from keys to separate child slots, used by the 48-wide node.
///
/// `child_ptr_indexes` maps a key byte to a slot in `children`. Whether a key byte is mapped at
/// all is tracked by the index array's own bitset, so every slot number and every key byte is
/// usable. Children are placed in arrival order: the n-th child added goes in slot n.
pub struct IndexedMapping<N, const WIDTH: usize, B: BitsetTrait> {
    child_ptr_indexes: Box<BitArray<u8, 256, Bitset64<4>>>,
    children: Box<BitArray<N, WIDTH, B>>,
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize, B: BitsetTrait> Default for IndexedMapping<N, WIDTH, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize, B: BitsetTrait> IndexedMapping<N, WIDTH, B> {
    pub fn new() -> Self {
        Self {
            child_ptr_indexes: Box::new(BitArray::new()),
            children: Box::new(BitArray::new()),
            num_children: 0,
        }
    }

    /// Re-adds every entry of `km`, in `km`'s key order, so slots are handed out afresh.
    /// `km` is left empty.
    pub fn from_sorted_keyed<const KM_WIDTH: usize>(
        km: &mut SortedKeyedMapping<N, KM_WIDTH>,
    ) -> Self {
        let mut im = IndexedMapping::new();
        km.drain_into(|key, child| im.add_child(key, child));
        im
    }

    /// Moves every child into `nm`, in ascending key order, leaving this mapping empty.
    pub(crate) fn move_into<NM: NodeMapping<N>>(&mut self, nm: &mut NM) {
        let Self {
            child_ptr_indexes,
            children,
            num_children,
        } = self;
        for (key, pos) in child_ptr_indexes.iter() {
            if let Some(node) = children.erase(*pos as usize) {
                nm.add_child(key as u8, node);
            }
        }
        child_ptr_indexes.clear();
        *num_children = 0;
    }

    /// The slot `key` maps to, if any.
    #[inline]
    pub fn slot_of(&self, key: u8) -> Option<usize> {
        self.child_ptr_indexes.get(key as usize).map(|pos| *pos as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.child_ptr_indexes
            .iter()
            .filter_map(move |(key, pos)| Some((key as u8, self.children.get(*pos as usize)?)))
    }
}

impl<N, const WIDTH: usize, B: BitsetTrait> NodeMapping<N> for IndexedMapping<N, WIDTH, B> {
    fn add_child(&mut self, key: u8, node: N) {
        debug_assert!(!self.child_ptr_indexes.check(key as usize), "key {key} already mapped");
        let pos = self.num_children as usize;
        assert!(pos < WIDTH, "add_child on a full {WIDTH}-wide node");
        debug_assert_eq!(self.children.first_free_pos(), Some(pos));
        self.child_ptr_indexes.set(key as usize, pos as u8);
        self.children.set(pos, node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let pos = self.child_ptr_indexes.get(key as usize)?;
        self.children.get(*pos as usize)
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let pos = self.child_ptr_indexes.get(key as usize)?;
        self.children.get_mut(*pos as usize)
    }

    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    #[inline]
    fn width(&self) -> usize {
        WIDTH
    }
}
