//! Position search over the sorted key-byte arrays of the 4- and 16-wide nodes.
//!
//! Only the first `num_children` entries of `keys` are meaningful. Bytes past that point are
//! leftovers and are never compared, so every byte value 0..=255 is a legal key.

fn binary_find_key(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    keys[..num_children].binary_search(&key).ok()
}

/// Returns the index of `key` among the first `num_children` entries of `keys`.
pub fn u8_keys_find_key_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8],
    num_children: usize,
) -> Option<usize> {
    debug_assert!(num_children <= WIDTH);
    if WIDTH >= 16 {
        binary_find_key(key, keys, num_children)
    } else {
        // Linear search beats binary search at this size.
        keys[..num_children].iter().position(|&k| k == key)
    }
}

/// Returns the index at which `key` must be inserted to keep the first `num_children` entries of
/// `keys` sorted. Returns `None` if there is no room left.
pub fn u8_keys_find_insert_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8],
    num_children: usize,
) -> Option<usize> {
    if num_children >= WIDTH {
        return None;
    }
    Some(keys[..num_children].partition_point(|&k| k < key))
}
