use std::fmt;

use crate::keys::{KEY_LEN, Key};

/// The compressed path segment stored in every node header: the key bytes skipped between a
/// node's parent and the node itself. Never longer than a key.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Prefix {
    data: [u8; KEY_LEN],
    len: u8,
}

impl Prefix {
    pub const fn empty() -> Self {
        Self {
            data: [0; KEY_LEN],
            len: 0,
        }
    }

    pub fn from_slice(src: &[u8]) -> Self {
        assert!(src.len() <= KEY_LEN, "prefix longer than a key");
        let mut data = [0; KEY_LEN];
        data[..src.len()].copy_from_slice(src);
        Self {
            data,
            len: src.len() as u8,
        }
    }

    /// The first `length` bytes.
    pub fn partial_before(&self, length: usize) -> Self {
        assert!(length <= self.len());
        Self::from_slice(&self.data[..length])
    }

    /// Everything from `start` onwards.
    pub fn partial_after(&self, start: usize) -> Self {
        assert!(start <= self.len());
        Self::from_slice(&self.data[start..self.len()])
    }

    #[inline(always)]
    pub fn at(&self, pos: usize) -> u8 {
        assert!(pos < self.len());
        self.data[pos]
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn to_slice(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    /// Number of bytes, starting at `at_depth` in `key`, that match this prefix. Bounded by the
    /// prefix length and by the bytes left in the key.
    pub fn prefix_length_key(&self, key: &Key, at_depth: usize) -> usize {
        self.prefix_length_slice(key.bytes_from(at_depth))
    }

    pub fn prefix_length_slice(&self, slice: &[u8]) -> usize {
        self.to_slice()
            .iter()
            .zip(slice)
            .take_while(|(a, b)| a == b)
            .count()
    }
}

impl AsRef<[u8]> for Prefix {
    fn as_ref(&self) -> &[u8] {
        self.to_slice()
    }
}

impl From<&[u8]> for Prefix {
    fn from(src: &[u8]) -> Self {
        Self::from_slice(src)
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefix(")?;
        for (i, b) in self.to_slice().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}
