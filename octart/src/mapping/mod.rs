//! Child index strategies: how each inner-node size class maps a key byte to a child.

pub mod direct_mapping;
pub mod indexed_mapping;
pub mod sorted_keyed_mapping;

pub trait NodeMapping<N> {
    /// Maps `key` to `node`. The caller guarantees there is room and that `key` is not already
    /// mapped; a full mapping must be grown into the next size class first.
    fn add_child(&mut self, key: u8, node: N);
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn num_children(&self) -> usize;
    fn width(&self) -> usize;
    #[inline]
    fn is_full(&self) -> bool {
        self.num_children() >= self.width()
    }
}
