//! Error types for predicate parsing and evaluation

use thiserror::Error;

/// Main error type for predicate operations.
///
/// Parse errors carry the expression substring that failed to resolve.
#[derive(Error, Debug)]
pub enum PredicateError {
    /// A closing parenthesis appeared with nothing left open.
    #[error("missing an opening parenthesis in `{0}`")]
    MissingOpeningParen(String),

    /// The expression ended with open parentheses unresolved.
    #[error("missing a closing parenthesis in `{0}`")]
    MissingClosingParen(String),

    /// The eval target could not be serialized to a JSON value.
    #[error("unserializable eval target: {0}")]
    TargetSerialization(#[from] serde_json::Error),
}

/// Result type alias for predicate operations.
pub type Result<T> = std::result::Result<T, PredicateError>;
