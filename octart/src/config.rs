/// What `insert` does when the key is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Overwrite the stored value and hand back the previous one.
    #[default]
    Replace,
    /// Keep the stored value and hand back the one offered to `insert`.
    KeepExisting,
}

/// Configuration for an [`AdaptiveRadixTree`](crate::tree::AdaptiveRadixTree).
#[derive(Debug, Clone, Default)]
pub struct TreeConfig {
    /// Behaviour on inserting an existing key (default: `Replace`)
    pub duplicate_policy: DuplicatePolicy,
}

impl TreeConfig {
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
