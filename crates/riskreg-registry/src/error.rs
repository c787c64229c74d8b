//! Error types for registry operations and persistence

use riskreg_model::{RiskId, ValidationError};
use std::path::PathBuf;

/// Errors raised by [`crate::RiskRegistry`]
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Field or budget value rejected
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Operation on an unknown id
    #[error("risk not found: {0}")]
    NotFound(RiskId),

    /// Budget read before it was set
    #[error("project budget has not been set")]
    BudgetNotSet,

    /// Same id appears twice in a store document
    #[error("duplicate risk id: {0}")]
    DuplicateId(RiskId),

    /// No identifier left after the given one
    #[error("risk ids exhausted after {0}")]
    IdsExhausted(RiskId),

    /// IO error reading or writing a store file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file is not a valid register document
    #[error("malformed store {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// In-memory document could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RegistryError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create JSON error for path
    pub fn json_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Check if the error is caused by bad input values
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DuplicateId(_))
    }

    /// Check if the error is a missing-file condition
    #[must_use]
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_display() {
        let err = RegistryError::NotFound(RiskId(4));
        assert_eq!(err.to_string(), "risk not found: R-4");

        let err = RegistryError::from(ValidationError::EmptyName);
        assert!(err.to_string().contains("name is required"));
        assert!(err.is_validation());
    }

    #[test]
    fn registry_error_missing_file() {
        let err = RegistryError::io_error(
            "risks.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_missing_file());
        assert!(err.to_string().contains("risks.json"));

        let err = RegistryError::io_error(
            "risks.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(!err.is_missing_file());
    }

    #[test]
    fn registry_error_ids_exhausted() {
        let err = RegistryError::IdsExhausted(RiskId(u64::MAX));
        assert_eq!(err.to_string(), format!("risk ids exhausted after R-{}", u64::MAX));
        assert!(!err.is_validation());
    }
}
