use thiserror::Error;

/// Errors that can occur while preparing sentences.
///
/// A text that yields no sentences is not an error at this layer; the
/// comparison engine decides whether an empty document is fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
