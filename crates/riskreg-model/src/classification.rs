//! Enumerated risk attributes and the risk-level bands

use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Score below which a risk is [`RiskLevel::Low`]
pub const LOW_THRESHOLD: f64 = 10.0;

/// Score below which a risk is [`RiskLevel::Medium`]
pub const MEDIUM_THRESHOLD: f64 = 30.0;

/// Classification band derived from probability × impact
///
/// The score is the raw product of the percentage probability and the impact,
/// not the expected value (`probability / 100 * impact`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Score below 10
    Low,
    /// Score below 30
    Medium,
    /// Everything else
    High,
}

impl RiskLevel {
    /// Classify a probability/impact pair
    #[must_use]
    pub fn classify(probability: f64, impact: f64) -> Self {
        let score = probability * impact;
        if score < LOW_THRESHOLD {
            Self::Low
        } else if score < MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Display label
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audience a risk is escalated to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ReportingLevel {
    /// Project team
    #[default]
    Project,
    /// Programme management
    Program,
    /// Steering committee
    SteerCo,
}

impl ReportingLevel {
    /// All levels in escalation order
    pub const ALL: [Self; 3] = [Self::Project, Self::Program, Self::SteerCo];

    /// Canonical label
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Program => "Program",
            Self::SteerCo => "SteerCo",
        }
    }
}

impl FromStr for ReportingLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownReportingLevel(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for ReportingLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ReportingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nature of the risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RiskType {
    /// Delivery risk inside the project
    #[default]
    Project,
    /// Risk to the business case
    Business,
}

impl RiskType {
    /// All risk types
    pub const ALL: [Self; 2] = [Self::Project, Self::Business];

    /// Canonical label
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Business => "Business",
        }
    }
}

impl FromStr for RiskType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownRiskType(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for RiskType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
