use crate::mapping::NodeMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::utils::bitarray::BitArray;
use crate::utils::bitset::{Bitset64, BitsetTrait};

/// One slot per possible key byte, used by the 256-wide node.
pub struct DirectMapping<N> {
    pub(crate) children: Box<BitArray<N, 256, Bitset64<4>>>,
    num_children: usize,
}

impl<N> Default for DirectMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> DirectMapping<N> {
    pub fn new() -> Self {
        Self {
            children: Box::new(BitArray::new()),
            num_children: 0,
        }
    }

    pub fn from_indexed<const WIDTH: usize, FromBitset: BitsetTrait>(
        im: &mut IndexedMapping<N, WIDTH, FromBitset>,
    ) -> Self {
        let mut new_mapping = DirectMapping::<N>::new();
        im.move_into(&mut new_mapping);
        new_mapping
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.children.iter().map(|(key, node)| (key as u8, node))
    }
}

impl<N> NodeMapping<N> for DirectMapping<N> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        let displaced = self.children.set(key as usize, node);
        debug_assert!(displaced.is_none(), "key {key} already mapped");
        if displaced.is_none() {
            self.num_children += 1;
        }
    }

    #[inline]
    fn seek_child(&self, key: u8) -> Option<&N> {
        self.children.get(key as usize)
    }

    #[inline]
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        self.children.get_mut(key as usize)
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.num_children
    }

    fn width(&self) -> usize {
        256
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::NodeMapping;

    #[test]
    fn direct_mapping_test() {
        let mut dm = super::DirectMapping::new();
        for i in 0..=255u8 {
            assert_eq!(dm.seek_child(i), None);
            dm.add_child(i, i);
            assert_eq!(*dm.seek_child(i).unwrap(), i);
        }
        assert_eq!(dm.num_children(), 256);
        assert!(dm.is_full());
        for i in 0..=255u8 {
            *dm.seek_child_mut(i).unwrap() = i.wrapping_add(1);
        }
        let collected: Vec<(u8, u8)> = dm.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(collected.len(), 256);
        assert_eq!(collected[0], (0, 1));
        assert_eq!(collected[255], (255, 0));
    }
}
