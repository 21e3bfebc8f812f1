use thiserror::Error;

/// A key that cannot be stored in a [RadixTree](crate::RadixTree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// the key has no symbols, and the root never holds a value
    #[error("key must not be empty")]
    EmptyKey,
    /// the key bytes are not valid utf-8
    #[error("key is not valid utf-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 {
        /// length of the longest valid prefix of the key
        valid_up_to: usize,
    },
}

impl From<std::str::Utf8Error> for ValidationError {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 {
            valid_up_to: value.valid_up_to(),
        }
    }
}
