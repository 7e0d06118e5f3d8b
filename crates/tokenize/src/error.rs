use std::path::PathBuf;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, TokenizeError>;

/// Error type for tokenizer, vocabulary and persistence operations.
///
/// Encoding and decoding never produce errors: unknown tokens and codes are
/// substituted instead.
#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    /// A caller-supplied value is out of range (e.g. a negative vocabulary size).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The requested file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// path that was looked up
        path: PathBuf,
    },
    /// Any other I/O failure while reading or writing `path`.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// path being accessed
        path: PathBuf,
        /// underlying error
        #[source]
        source: std::io::Error,
    },
    /// The file at `path` is not valid JSON of the expected shape.
    #[error("malformed json in {}: {source}", path.display())]
    Json {
        /// path being parsed
        path: PathBuf,
        /// underlying error
        #[source]
        source: serde_json::Error,
    },
    /// A vocabulary breaks the code invariants (duplicate or reserved code) or
    /// contains the unknown placeholder as a real token.
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),
}

impl TokenizeError {
    /// Classify an I/O error for `path`, keeping missing files distinct.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            TokenizeError::NotFound { path }
        } else {
            TokenizeError::Io { path, source }
        }
    }
}
