use std::mem::MaybeUninit;
use std::ops::Index;

use crate::utils::bitset::BitsetTrait;

/// A fixed-capacity array of optionally-present values. Presence of each position is tracked in
/// `B`, so no value of `X` is reserved to mean "absent".
///
/// `B` must have at least `RANGE_WIDTH` bits of capacity.
pub struct BitArray<X, const RANGE_WIDTH: usize, B: BitsetTrait> {
    bitset: B,
    storage: [MaybeUninit<X>; RANGE_WIDTH],
}

impl<X, const RANGE_WIDTH: usize, B: BitsetTrait> BitArray<X, RANGE_WIDTH, B> {
    pub fn new() -> Self {
        let bitset = B::default();
        assert!(bitset.capacity() >= RANGE_WIDTH);

        Self {
            bitset,
            storage: [const { MaybeUninit::uninit() }; RANGE_WIDTH],
        }
    }

    #[inline]
    pub fn first_free_pos(&self) -> Option<usize> {
        self.bitset.first_empty().filter(|pos| *pos < RANGE_WIDTH)
    }

    #[inline]
    pub fn last_used_pos(&self) -> Option<usize> {
        self.bitset.last()
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Option<&X> {
        assert!(pos < RANGE_WIDTH);
        if self.bitset.check(pos) {
            Some(unsafe { self.storage[pos].assume_init_ref() })
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut X> {
        assert!(pos < RANGE_WIDTH);
        if self.bitset.check(pos) {
            Some(unsafe { self.storage[pos].assume_init_mut() })
        } else {
            None
        }
    }

    #[inline]
    pub fn check(&self, pos: usize) -> bool {
        assert!(pos < RANGE_WIDTH);
        self.bitset.check(pos)
    }

    /// Stores `x` at `pos`, returning whatever was there before.
    #[inline]
    pub fn set(&mut self, pos: usize, x: X) -> Option<X> {
        let old = self.erase(pos);
        self.storage[pos].write(x);
        self.bitset.set(pos);
        old
    }

    #[inline]
    pub fn erase(&mut self, pos: usize) -> Option<X> {
        assert!(pos < RANGE_WIDTH);
        if !self.bitset.check(pos) {
            return None;
        }
        self.bitset.unset(pos);
        let old = std::mem::replace(&mut self.storage[pos], MaybeUninit::uninit());
        Some(unsafe { old.assume_init() })
    }

    pub fn clear(&mut self) {
        for i in 0..RANGE_WIDTH {
            if self.bitset.check(i) {
                unsafe { self.storage[i].assume_init_drop() }
            }
        }
        self.bitset.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bitset.is_empty()
    }

    pub fn size(&self) -> usize {
        self.bitset.size()
    }

    /// Present positions in ascending order.
    pub fn iter_keys(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        (0..RANGE_WIDTH).filter(|pos| self.bitset.check(*pos))
    }

    /// Present `(position, value)` pairs in ascending position order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &X)> {
        self.storage
            .iter()
            .enumerate()
            .filter(|(pos, _)| self.bitset.check(*pos))
            .map(|(pos, x)| (pos, unsafe { x.assume_init_ref() }))
    }
}

impl<X, const RANGE_WIDTH: usize, B: BitsetTrait> Default for BitArray<X, RANGE_WIDTH, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X, const RANGE_WIDTH: usize, B: BitsetTrait> Index<usize> for BitArray<X, RANGE_WIDTH, B> {
    type Output = X;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(x) => x,
            None => panic!("BitArray: no value at position {index}"),
        }
    }
}

impl<X, const RANGE_WIDTH: usize, B: BitsetTrait> Drop for BitArray<X, RANGE_WIDTH, B> {
    fn drop(&mut self) {
        self.clear();
    }
}
