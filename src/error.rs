//! Error types for termgraph.

use thiserror::Error;

/// Result type for termgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for termgraph operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Span, term or lookup error from the core types.
    #[error(transparent)]
    Core(#[from] termgraph_core::Error),

    /// Invalid pipeline configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A document of a batch could not be converted.
    #[error("Document {id} failed: {source}")]
    Document {
        /// Identifier of the failing document.
        id: String,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Wrap a failure with the identifier of the document it belongs to.
    pub fn in_document(id: impl Into<String>, source: Error) -> Self {
        Error::Document {
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// The core error behind this one, looking through document wrappers.
    #[must_use]
    pub fn core(&self) -> Option<&termgraph_core::Error> {
        match self {
            Error::Core(e) => Some(e),
            Error::Document { source, .. } => source.core(),
            _ => None,
        }
    }
}

