//! Domain error types.

/// Domain-level errors for lookup and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Display name is not in the supported state table
    #[error("unsupported state: {0}")]
    UnknownState(String),
}
