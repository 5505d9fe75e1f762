use std::fmt;

/// Errors raised when turning caller data into a tree [`Key`](crate::keys::Key).
///
/// The tree operations themselves cannot fail; a missing key is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The byte slice was not exactly [`KEY_LEN`](crate::keys::KEY_LEN) bytes long.
    InvalidLength { expected: usize, actual: usize },
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::InvalidLength { expected, actual } => {
                write!(f, "invalid key length: expected {} bytes, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for KeyError {}
