//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Target reference is missing a namespace or name
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
