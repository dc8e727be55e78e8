//! Error types for termgraph-core.

use thiserror::Error;

/// Result type for termgraph-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for termgraph-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A span is empty, reversed, or reaches past the end of the text.
    #[error("Invalid span [{begin}, {end}) for text of {text_len} characters")]
    InvalidSpan {
        /// Start offset (characters).
        begin: usize,
        /// End offset (characters).
        end: usize,
        /// Length of the document text in characters.
        text_len: usize,
    },

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create an invalid span error.
    #[must_use]
    pub fn invalid_span(begin: usize, end: usize, text_len: usize) -> Self {
        Self::InvalidSpan {
            begin,
            end,
            text_len,
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
