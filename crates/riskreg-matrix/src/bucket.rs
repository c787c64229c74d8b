//! Ordinal matrix bands

use riskreg_model::ProjectBudget;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive upper bound of each band except the last
pub const BUCKET_UPPER_BOUNDS: [f64; 4] = [5.0, 10.0, 50.0, 75.0];

/// One of the five bands of a matrix axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Up to 5
    VeryLow,
    /// Up to 10
    Low,
    /// Up to 50
    Medium,
    /// Up to 75
    High,
    /// Above 75
    VeryHigh,
}

impl Bucket {
    /// All bands, lowest first
    pub const ALL: [Self; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::VeryHigh,
    ];

    /// Band containing a percentage value
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        BUCKET_UPPER_BOUNDS
            .iter()
            .position(|bound| percent <= *bound)
            .map_or(Self::VeryHigh, |index| Self::ALL[index])
    }

    /// Grid coordinate, `0..=4`
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Band at a grid coordinate
    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Axis label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Band of an impact measured as a share of the budget
#[must_use]
pub fn impact_bucket(impact: f64, budget: ProjectBudget) -> Bucket {
    Bucket::from_percent(budget.percent_of(impact))
}

/// Band of a percentage probability
#[must_use]
pub fn probability_bucket(probability: f64) -> Bucket {
    Bucket::from_percent(probability)
}
