//! Validation errors for risk fields and the project budget

/// A field value was rejected on create, update or budget assignment
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Name missing or blank
    #[error("name is required")]
    EmptyName,

    /// Description missing or blank
    #[error("description is required")]
    EmptyDescription,

    /// Probability outside the inclusive percentage range
    #[error("probability must be between 0 and 100 percent, got {0}")]
    ProbabilityOutOfRange(f64),

    /// Impact below zero
    #[error("impact must not be negative, got {0}")]
    NegativeImpact(f64),

    /// NaN or infinite number supplied
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Name of the offending field
        field: &'static str,
    },

    /// Budget zero or negative
    #[error("project budget must be positive, got {0}")]
    NonPositiveBudget(f64),

    /// Unrecognised reporting level text
    #[error("unknown reporting level: '{0}' (expected Project, Program or SteerCo)")]
    UnknownReportingLevel(String),

    /// Unrecognised risk type text
    #[error("unknown risk type: '{0}' (expected Project or Business)")]
    UnknownRiskType(String),

    /// Risk identifier text could not be parsed
    #[error("invalid risk id: '{0}'")]
    InvalidRiskId(String),
}

impl ValidationError {
    /// Check if the error concerns a numeric field
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::ProbabilityOutOfRange(_)
                | Self::NegativeImpact(_)
                | Self::NotFinite { .. }
                | Self::NonPositiveBudget(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ValidationError::ProbabilityOutOfRange(150.0);
        assert!(err.to_string().contains("between 0 and 100"));
        assert!(err.to_string().contains("150"));
    }

    #[test]
    fn validation_error_is_numeric() {
        assert!(ValidationError::NegativeImpact(-1.0).is_numeric());
        assert!(ValidationError::NotFinite { field: "impact" }.is_numeric());
        assert!(!ValidationError::EmptyName.is_numeric());
        assert!(!ValidationError::UnknownRiskType("x".into()).is_numeric());
    }
}
