//! Target reference value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Identifies the instance a run will destroy (`namespace/name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    namespace: String,
    name: String,
}

impl TargetRef {
    /// Create a new target reference
    ///
    /// Both parts are trimmed and must be non-empty.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, DomainError> {
        let namespace = namespace.into().trim().to_string();
        let name = name.into().trim().to_string();

        if namespace.is_empty() {
            return Err(DomainError::InvalidTarget(
                "namespace must not be empty".to_string(),
            ));
        }
        if name.is_empty() {
            return Err(DomainError::InvalidTarget(
                "name must not be empty".to_string(),
            ));
        }

        Ok(Self { namespace, name })
    }

    /// Namespace the instance lives in
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Instance name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl std::str::FromStr for TargetRef {
    type Err = DomainError;

    /// Parse `namespace/name`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = s.split_once('/').ok_or_else(|| {
            DomainError::InvalidTarget(format!("expected namespace/name, got '{s}'"))
        })?;
        Self::new(namespace, name)
    }
}
