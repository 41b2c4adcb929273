//! Error types for the changelog tree
//!
//! Every kind is fail-fast: the operation that raised it returns immediately
//! and nothing is retried. Mutations are not transactional, so a failure in
//! the middle of `add_change` may leave a version block partially updated.

/// Result type for changelog tree operations
pub type ChangelogResult<T> = Result<T, ChangelogError>;

/// Errors that can occur while parsing or editing a changelog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChangelogError {
    /// A category heading appeared before any version heading
    #[error("Parsing error in row #{row}: section heading provided before any version heading")]
    Sequence { row: usize },

    /// No numeric version could be located in the input
    #[error("Cannot resolve a version number from '{0}'")]
    Format(String),

    /// A category name outside the six-label taxonomy
    #[error("Undefined section: {0}")]
    InvalidCategory(String),

    /// A date that is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A dynamically-typed value of the wrong shape
    #[error("Only {expected} values can be added. But provided: {found}")]
    TypeMismatch { expected: &'static str, found: String },

    /// The version is already present in the document
    #[error("Version {0} already exists")]
    DuplicateVersion(String),
}
