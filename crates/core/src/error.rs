//! Engine error model.

use thiserror::Error;

/// Result type used across the analytics layer.
pub type FleetResult<T> = Result<T, FleetError>;

/// Engine-level error.
///
/// Keep this focused on deterministic failures of the analytics transform.
/// IO and decoding concerns belong to the relation source in `fleetops-infra`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FleetError {
    /// A relation the requested operation cannot run without was not supplied.
    #[error("missing required relation: {0}")]
    MissingRelation(String),

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl FleetError {
    pub fn missing_relation(name: impl Into<String>) -> Self {
        Self::MissingRelation(name.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Name of the missing relation, if this is a `MissingRelation` error.
    pub fn relation(&self) -> Option<&str> {
        match self {
            Self::MissingRelation(name) => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_relation_names_the_relation() {
        let err = FleetError::missing_relation("rentals");
        assert_eq!(err.to_string(), "missing required relation: rentals");
        assert_eq!(err.relation(), Some("rentals"));
        assert_eq!(FleetError::validation("x").relation(), None);
    }
}
