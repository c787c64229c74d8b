//! Project budget
//!
//! A [`ProjectBudget`] can only hold a finite positive amount, so impact
//! percentages computed against it never divide by zero.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive monetary ceiling against which impact percentages are computed
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ProjectBudget(f64);

impl ProjectBudget {
    /// Create a validated budget
    ///
    /// # Errors
    /// Returns [`ValidationError::NonPositiveBudget`] if `value <= 0` and
    /// [`ValidationError::NotFinite`] for NaN or infinity
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "project budget",
            });
        }
        if value <= 0.0 {
            return Err(ValidationError::NonPositiveBudget(value));
        }
        Ok(Self(value))
    }

    /// Raw amount
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Impact expressed as a percentage of this budget
    #[inline]
    #[must_use]
    pub fn percent_of(self, impact: f64) -> f64 {
        impact / self.0 * 100.0
    }
}

impl TryFrom<f64> for ProjectBudget {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectBudget> for f64 {
    fn from(budget: ProjectBudget) -> Self {
        budget.0
    }
}

impl fmt::Display for ProjectBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
