//! Risk entity
//!
//! Provides [`Risk`] together with its creation payload [`NewRisk`] and the
//! typed partial update [`RiskUpdate`].

use crate::classification::{ReportingLevel, RiskLevel, RiskType};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registry-assigned risk identifier
///
/// Displays as `R-<n>`; parses from either `R-<n>` or a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskId(pub u64);

impl RiskId {
    /// Prefix used in display form
    pub const PREFIX: &'static str = "R-";

    /// Numeric value
    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Identifier following this one, `None` past `u64::MAX`
    #[inline]
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for RiskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for RiskId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix(Self::PREFIX)
            .or_else(|| trimmed.strip_prefix("r-"))
            .unwrap_or(trimmed);
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidRiskId(s.to_string()))
    }
}

/// Field values for a risk about to be created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRisk {
    /// Short name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Probability in percent (0-100)
    pub probability: f64,
    /// Monetary impact, same unit as the project budget
    pub impact: f64,
    /// Escalation audience
    pub reporting_level: ReportingLevel,
    /// Risk nature
    pub risk_type: RiskType,
}

impl NewRisk {
    /// Create field set with default reporting level and type
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        probability: f64,
        impact: f64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            probability,
            impact,
            reporting_level: ReportingLevel::default(),
            risk_type: RiskType::default(),
        }
    }

    /// With reporting level
    #[inline]
    #[must_use]
    pub fn with_reporting_level(mut self, level: ReportingLevel) -> Self {
        self.reporting_level = level;
        self
    }

    /// With risk type
    #[inline]
    #[must_use]
    pub fn with_risk_type(mut self, risk_type: RiskType) -> Self {
        self.risk_type = risk_type;
        self
    }

    /// Check every field against the entity rules
    ///
    /// # Errors
    /// Returns the first rule violated
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, &self.description, self.probability, self.impact)
    }
}

/// Partial update of a risk's mutable fields
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskUpdate {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New probability
    pub probability: Option<f64>,
    /// New impact
    pub impact: Option<f64>,
    /// New reporting level
    pub reporting_level: Option<ReportingLevel>,
    /// New risk type
    pub risk_type: Option<RiskType>,
}

impl RiskUpdate {
    /// Empty update
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set probability
    #[must_use]
    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Set impact
    #[must_use]
    pub fn impact(mut self, impact: f64) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Set reporting level
    #[must_use]
    pub fn reporting_level(mut self, level: ReportingLevel) -> Self {
        self.reporting_level = Some(level);
        self
    }

    /// Set risk type
    #[must_use]
    pub fn risk_type(mut self, risk_type: RiskType) -> Self {
        self.risk_type = Some(risk_type);
        self
    }

    /// Check if no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A recorded project risk
#[derive(Debug, Clone, PartialEq)]
pub struct Risk {
    id: RiskId,
    name: String,
    description: String,
    probability: f64,
    impact: f64,
    reporting_level: ReportingLevel,
    risk_type: RiskType,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Risk {
    /// Construct a validated risk stamped with the current time
    ///
    /// # Errors
    /// Returns [`ValidationError`] if name or description is blank, the
    /// probability is outside `[0, 100]` or the impact is negative
    pub fn new(id: RiskId, fields: NewRisk) -> Result<Self, ValidationError> {
        let now = Utc::now();
        Self::with_timestamps(id, fields, now, now)
    }

    /// Construct a validated risk with explicit timestamps
    ///
    /// Used when restoring persisted risks.
    ///
    /// # Errors
    /// Same rules as [`Risk::new`]
    pub fn with_timestamps(
        id: RiskId,
        fields: NewRisk,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        fields.validate()?;
        Ok(Self {
            id,
            name: fields.name,
            description: fields.description,
            probability: fields.probability,
            impact: fields.impact,
            reporting_level: fields.reporting_level,
            risk_type: fields.risk_type,
            created_at,
            updated_at,
        })
    }

    /// Apply a partial update
    ///
    /// The merged values are validated before anything is assigned, so a
    /// rejected update leaves the risk unchanged.
    ///
    /// # Errors
    /// Returns [`ValidationError`] under the same rules as construction
    pub fn update(&mut self, update: RiskUpdate) -> Result<(), ValidationError> {
        let name = update.name.as_deref().unwrap_or(&self.name);
        let description = update.description.as_deref().unwrap_or(&self.description);
        let probability = update.probability.unwrap_or(self.probability);
        let impact = update.impact.unwrap_or(self.impact);
        validate_fields(name, description, probability, impact)?;

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        self.probability = probability;
        self.impact = impact;
        if let Some(level) = update.reporting_level {
            self.reporting_level = level;
        }
        if let Some(risk_type) = update.risk_type {
            self.risk_type = risk_type;
        }
        self.updated_at = Utc::now().max(self.created_at);
        Ok(())
    }

    /// Identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> RiskId {
        self.id
    }

    /// Name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Probability in percent
    #[inline]
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Monetary impact
    #[inline]
    #[must_use]
    pub fn impact(&self) -> f64 {
        self.impact
    }

    /// Reporting level
    #[inline]
    #[must_use]
    pub fn reporting_level(&self) -> ReportingLevel {
        self.reporting_level
    }

    /// Risk type
    #[inline]
    #[must_use]
    pub fn risk_type(&self) -> RiskType {
        self.risk_type
    }

    /// Creation time
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last mutation
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Classification from the current probability and impact
    #[inline]
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::classify(self.probability, self.impact)
    }

    /// Probability-weighted impact, `probability * impact / 100`
    #[inline]
    #[must_use]
    pub fn expected_value(&self) -> f64 {
        self.probability * self.impact / 100.0
    }

    /// Impact as a percentage of `budget`, or `0` if the budget is not positive
    #[must_use]
    pub fn budget_usage_percent(&self, budget: f64) -> f64 {
        if budget > 0.0 {
            self.impact / budget * 100.0
        } else {
            0.0
        }
    }

    /// Field values, without id and timestamps
    #[must_use]
    pub fn fields(&self) -> NewRisk {
        NewRisk {
            name: self.name.clone(),
            description: self.description.clone(),
            probability: self.probability,
            impact: self.impact,
            reporting_level: self.reporting_level,
            risk_type: self.risk_type,
        }
    }
}

fn validate_fields(
    name: &str,
    description: &str,
    probability: f64,
    impact: f64,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if !probability.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "probability",
        });
    }
    if !(0.0..=100.0).contains(&probability) {
        return Err(ValidationError::ProbabilityOutOfRange(probability));
    }
    if !impact.is_finite() {
        return Err(ValidationError::NotFinite { field: "impact" });
    }
    if impact < 0.0 {
        return Err(ValidationError::NegativeImpact(impact));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(probability: f64, impact: f64) -> NewRisk {
        NewRisk::new("Supplier delay", "Vendor misses delivery", probability, impact)
    }

    #[test]
    fn risk_id_next_stops_at_max() {
        assert_eq!(RiskId(1).next(), Some(RiskId(2)));
        assert_eq!(RiskId(u64::MAX).next(), None);
    }

    #[test]
    fn risk_id_display_and_parse() {
        assert_eq!(RiskId(7).to_string(), "R-7");
        assert_eq!("R-7".parse::<RiskId>(), Ok(RiskId(7)));
        assert_eq!("7".parse::<RiskId>(), Ok(RiskId(7)));
        assert_eq!("r-12".parse::<RiskId>(), Ok(RiskId(12)));
        assert!("R-x".parse::<RiskId>().is_err());
        assert!("".parse::<RiskId>().is_err());
    }

    #[test]
    fn construct_sets_equal_timestamps() {
        let risk = Risk::new(RiskId(1), fields(50.0, 1.0)).unwrap();
        assert_eq!(risk.created_at(), risk.updated_at());
        assert_eq!(risk.id(), RiskId(1));
    }

    #[test]
    fn construct_probability_bounds() {
        assert!(Risk::new(RiskId(1), fields(0.0, 1.0)).is_ok());
        assert!(Risk::new(RiskId(1), fields(100.0, 1.0)).is_ok());
        assert_eq!(
            Risk::new(RiskId(1), fields(150.0, 1.0)),
            Err(ValidationError::ProbabilityOutOfRange(150.0))
        );
        assert!(Risk::new(RiskId(1), fields(-0.1, 1.0)).is_err());
        assert!(Risk::new(RiskId(1), fields(f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn construct_impact_bounds() {
        assert!(Risk::new(RiskId(1), fields(10.0, 0.0)).is_ok());
        assert_eq!(
            Risk::new(RiskId(1), fields(10.0, -1.0)),
            Err(ValidationError::NegativeImpact(-1.0))
        );
        assert!(Risk::new(RiskId(1), fields(10.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn construct_requires_text() {
        let mut no_name = fields(10.0, 1.0);
        no_name.name = String::new();
        assert_eq!(Risk::new(RiskId(1), no_name), Err(ValidationError::EmptyName));

        let mut blank_description = fields(10.0, 1.0);
        blank_description.description = "   ".into();
        assert_eq!(
            Risk::new(RiskId(1), blank_description),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn update_recomputes_level() {
        let mut risk = Risk::new(RiskId(1), fields(1.0, 1.0)).unwrap();
        assert_eq!(risk.risk_level(), RiskLevel::Low);

        risk.update(RiskUpdate::new().probability(20.0)).unwrap();
        assert_eq!(risk.risk_level(), RiskLevel::Medium);

        risk.update(RiskUpdate::new().impact(5.0)).unwrap();
        assert_eq!(risk.risk_level(), RiskLevel::High);
    }

    #[test]
    fn update_refreshes_updated_at() {
        let mut risk = Risk::new(RiskId(1), fields(1.0, 1.0)).unwrap();
        let created = risk.created_at();
        risk.update(RiskUpdate::new().name("Renamed")).unwrap();
        assert_eq!(risk.name(), "Renamed");
        assert_eq!(risk.created_at(), created);
        assert!(risk.updated_at() >= created);
    }

    #[test]
    fn rejected_update_leaves_risk_unchanged() {
        let mut risk = Risk::new(RiskId(1), fields(40.0, 2.0)).unwrap();
        let before = risk.clone();

        let err = risk
            .update(
                RiskUpdate::new()
                    .name("Changed")
                    .risk_type(RiskType::Business)
                    .probability(101.0),
            )
            .unwrap_err();

        assert_eq!(err, ValidationError::ProbabilityOutOfRange(101.0));
        assert_eq!(risk, before);
    }

    #[test]
    fn update_enums() {
        let mut risk = Risk::new(RiskId(3), fields(1.0, 1.0)).unwrap();
        risk.update(
            RiskUpdate::new()
                .reporting_level(ReportingLevel::SteerCo)
                .risk_type(RiskType::Business),
        )
        .unwrap();
        assert_eq!(risk.reporting_level(), ReportingLevel::SteerCo);
        assert_eq!(risk.risk_type(), RiskType::Business);
    }

    #[test]
    fn expected_value_and_budget_usage() {
        let risk = Risk::new(RiskId(1), fields(80.0, 8.0)).unwrap();
        assert!((risk.expected_value() - 6.4).abs() < 1e-9);
        assert!((risk.budget_usage_percent(10.0) - 80.0).abs() < 1e-9);
        assert!(risk.budget_usage_percent(0.0).abs() < f64::EPSILON);
        assert!(risk.budget_usage_percent(-3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn update_is_empty() {
        assert!(RiskUpdate::new().is_empty());
        assert!(!RiskUpdate::new().impact(1.0).is_empty());
    }

    #[test]
    fn fields_round_trip() {
        let original = fields(25.0, 3.5).with_risk_type(RiskType::Business);
        let risk = Risk::new(RiskId(9), original.clone()).unwrap();
        assert_eq!(risk.fields(), original);
    }
}
