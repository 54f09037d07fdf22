//! Application-level errors

use domain::{DomainError, TargetRef};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The requested instance does not exist
    #[error("Instance not found: {0}")]
    NotFound(String),

    /// Any other failure reported by the cluster control interface
    #[error("Cluster API error: {}", describe(.status, .reason))]
    ControlInterface {
        /// HTTP-like status code, when the control plane returned one
        status: Option<u16>,
        /// Reason reported by the control plane
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[allow(clippy::ref_option)] // called from the error attribute with field references
fn describe(status: &Option<u16>, reason: &str) -> String {
    match status {
        Some(code) => format!("{code} - {reason}"),
        None => reason.to_string(),
    }
}

impl ApplicationError {
    /// Create a not found error for a target
    pub fn not_found(target: &TargetRef) -> Self {
        Self::NotFound(target.to_string())
    }

    /// Create a control interface error
    pub fn control_interface(status: Option<u16>, reason: impl Into<String>) -> Self {
        Self::ControlInterface {
            status,
            reason: reason.into(),
        }
    }

    /// Check if this error reports an absent instance
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_target() {
        let target = TargetRef::new("default", "web-1").unwrap();
        let err = ApplicationError::not_found(&target);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Instance not found: default/web-1");
    }

    #[test]
    fn control_interface_with_status() {
        let err = ApplicationError::control_interface(Some(403), "Forbidden");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Cluster API error: 403 - Forbidden");
    }

    #[test]
    fn control_interface_without_status() {
        let err = ApplicationError::control_interface(None, "connection refused");
        assert_eq!(err.to_string(), "Cluster API error: connection refused");
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::InvalidTarget("name must not be empty".into()).into();
        assert_eq!(err.to_string(), "Invalid target: name must not be empty");
    }
}
