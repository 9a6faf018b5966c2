//! Error types for document path parsing.

use thiserror::Error;

/// Errors raised when a path string cannot be used as a pattern.
///
/// These are the only hard failures of the path engine. A path that simply
/// does not match a document is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Nothing left to match after tokenization.
    #[error("supplied path is invalid: path is empty")]
    Empty,
    /// The last segment is `*` or `**`.
    #[error("supplied path is invalid: `{path}` ends in a wildcard")]
    TrailingWildcard { path: String },
    /// Two wildcards follow each other.
    #[error(
        "supplied path is invalid: `{path}` has adjacent wildcards `{first}/{second}` at segment {position}"
    )]
    AdjacentWildcards {
        path: String,
        first: String,
        second: String,
        position: usize,
    },
}
