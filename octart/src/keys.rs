//! Fixed-length keys.
//!
//! Every key in the tree is exactly [`KEY_LEN`] bytes and is compared lexicographically, byte by
//! byte. Mapping application data onto those 8 bytes is the caller's business; this module
//! provides the order-preserving encodings for 64-bit integers:
//!
//! - `u64` is stored big-endian, so numeric order equals byte order.
//! - `i64` is stored big-endian with the sign bit flipped. Negative numbers then map to
//!   `0x00..=0x7f` in the first byte and non-negative ones to `0x80..=0xff`, so
//!   `i64::MIN < -1 < 0 < 1 < i64::MAX` holds for the encoded keys as well.

use crate::error::KeyError;

/// Length of every key, in bytes.
pub const KEY_LEN: usize = 8;

const SIGN_BIT: u64 = 1 << 63;

/// An 8-byte tree key.
///
/// ```rust
/// use octart::keys::Key;
///
/// let k: Key = 0x0102_0304_0506_0708u64.into();
/// assert_eq!(k.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
///
/// let neg: Key = (-5i64).into();
/// let pos: Key = 5i64.into();
/// assert!(neg < pos);
/// assert_eq!(neg.to_i64(), -5);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    pub const fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// The byte at `pos`, or `None` once `pos` runs past the end of the key.
    #[inline(always)]
    pub fn get(&self, pos: usize) -> Option<u8> {
        self.0.get(pos).copied()
    }

    /// The bytes from `depth` to the end of the key; empty if `depth >= KEY_LEN`.
    #[inline]
    pub fn bytes_from(&self, depth: usize) -> &[u8] {
        self.0.get(depth..).unwrap_or(&[])
    }

    /// Number of bytes, starting at `depth`, on which `self` and `other` agree.
    pub fn common_prefix_length(&self, other: &Key, depth: usize) -> usize {
        self.bytes_from(depth)
            .iter()
            .zip(other.bytes_from(depth))
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Inverse of `From<u64>`.
    pub fn to_be_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    /// Inverse of `From<i64>`.
    pub fn to_i64(&self) -> i64 {
        (self.to_be_u64() ^ SIGN_BIT) as i64
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; KEY_LEN]> for Key {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<&[u8; KEY_LEN]> for Key {
    fn from(bytes: &[u8; KEY_LEN]) -> Self {
        Self(*bytes)
    }
}

impl From<Key> for [u8; KEY_LEN] {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = KeyError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; KEY_LEN] = data.try_into().map_err(|_| KeyError::InvalidLength {
            expected: KEY_LEN,
            actual: data.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl From<u64> for Key {
    fn from(data: u64) -> Self {
        Self(data.to_be_bytes())
    }
}

impl From<&u64> for Key {
    fn from(data: &u64) -> Self {
        (*data).into()
    }
}

impl From<i64> for Key {
    fn from(val: i64) -> Self {
        // Flip the sign bit so negative numbers sort below non-negative ones.
        Self(((val as u64) ^ SIGN_BIT).to_be_bytes())
    }
}

impl From<&i64> for Key {
    fn from(val: &i64) -> Self {
        (*val).into()
    }
}
