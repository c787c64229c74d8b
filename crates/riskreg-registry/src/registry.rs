//! Risk registry
//!
//! Provides [`RiskRegistry`], the owned collection the presentation layer
//! mutates and queries.

use crate::error::RegistryError;
use indexmap::map::Entry;
use indexmap::IndexMap;
use riskreg_model::{
    NewRisk, ProjectBudget, ReportingLevel, Risk, RiskId, RiskLevel, RiskType, RiskUpdate,
};

/// In-memory risk collection with a project budget
///
/// Risks iterate in insertion order. Identifiers start at `R-1`, increase by
/// one per added risk and are never handed out twice, even after deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRegistry {
    risks: IndexMap<RiskId, Risk>,
    next_id: RiskId,
    budget: Option<ProjectBudget>,
}

impl Default for RiskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRegistry {
    /// First identifier handed out by an empty registry
    pub const FIRST_ID: RiskId = RiskId(1);

    /// Create empty registry with no budget
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            risks: IndexMap::new(),
            next_id: Self::FIRST_ID,
            budget: None,
        }
    }

    /// Rebuild a registry from already validated parts
    ///
    /// `next_id` is raised above every stored id so identifiers stay unique.
    ///
    /// # Errors
    /// Returns [`RegistryError::IdsExhausted`] if a stored id is `u64::MAX`
    pub(crate) fn from_parts(
        risks: IndexMap<RiskId, Risk>,
        next_id: RiskId,
        budget: Option<ProjectBudget>,
    ) -> Result<Self, RegistryError> {
        let floor = match risks.keys().max() {
            Some(&max) => max.next().ok_or(RegistryError::IdsExhausted(max))?,
            None => Self::FIRST_ID,
        };
        Ok(Self {
            risks,
            next_id: next_id.max(floor),
            budget,
        })
    }

    /// Set the project budget, replacing any previous value
    ///
    /// # Errors
    /// Returns [`RegistryError::Validation`] if `value` is not a positive number
    pub fn set_budget(&mut self, value: f64) -> Result<ProjectBudget, RegistryError> {
        let budget = ProjectBudget::new(value)?;
        tracing::info!(budget = budget.value(), "project budget set");
        self.budget = Some(budget);
        Ok(budget)
    }

    /// Current project budget
    ///
    /// # Errors
    /// Returns [`RegistryError::BudgetNotSet`] if no budget was ever set
    pub fn budget(&self) -> Result<ProjectBudget, RegistryError> {
        self.budget.ok_or(RegistryError::BudgetNotSet)
    }

    /// Current project budget, if set
    #[inline]
    #[must_use]
    pub fn try_budget(&self) -> Option<ProjectBudget> {
        self.budget
    }

    /// Validate and store a new risk under the next identifier
    ///
    /// # Errors
    /// Returns [`RegistryError::Validation`] if any field is rejected; the
    /// identifier is not consumed in that case. Returns
    /// [`RegistryError::IdsExhausted`] once no identifier is left.
    pub fn add_risk(&mut self, fields: NewRisk) -> Result<&Risk, RegistryError> {
        let id = self.next_id;
        let following = id.next().ok_or(RegistryError::IdsExhausted(id))?;
        let risk = Risk::new(id, fields)?;
        match self.risks.entry(id) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateId(id)),
            Entry::Vacant(slot) => {
                tracing::info!(%id, name = risk.name(), level = %risk.risk_level(), "risk added");
                self.next_id = following;
                Ok(&*slot.insert(risk))
            }
        }
    }

    /// Apply a partial update to an existing risk
    ///
    /// # Errors
    /// Returns [`RegistryError::NotFound`] for an unknown id and
    /// [`RegistryError::Validation`] if the merged fields are rejected
    pub fn update_risk(&mut self, id: RiskId, update: RiskUpdate) -> Result<&Risk, RegistryError> {
        let risk = self.risks.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        risk.update(update)?;
        tracing::info!(%id, level = %risk.risk_level(), "risk updated");
        Ok(&*risk)
    }

    /// Remove a risk, returning it
    ///
    /// # Errors
    /// Returns [`RegistryError::NotFound`] for an unknown id
    pub fn delete_risk(&mut self, id: RiskId) -> Result<Risk, RegistryError> {
        let removed = self
            .risks
            .shift_remove(&id)
            .ok_or(RegistryError::NotFound(id))?;
        tracing::info!(%id, "risk deleted");
        Ok(removed)
    }

    /// Look up a risk
    #[inline]
    #[must_use]
    pub fn get_risk(&self, id: RiskId) -> Option<&Risk> {
        self.risks.get(&id)
    }

    /// All risks in insertion order
    #[must_use]
    pub fn list_all(&self) -> Vec<&Risk> {
        self.risks.values().collect()
    }

    /// Iterate over risks in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Risk> {
        self.risks.values()
    }

    /// Risks of the given type
    #[must_use]
    pub fn by_type(&self, risk_type: RiskType) -> Vec<&Risk> {
        self.filter(|risk| risk.risk_type() == risk_type)
    }

    /// Risks reported at the given level
    #[must_use]
    pub fn by_reporting_level(&self, level: ReportingLevel) -> Vec<&Risk> {
        self.filter(|risk| risk.reporting_level() == level)
    }

    /// Risks currently classified [`RiskLevel::High`]
    #[must_use]
    pub fn high_risks(&self) -> Vec<&Risk> {
        self.filter(|risk| risk.risk_level() == RiskLevel::High)
    }

    /// Risks matching an arbitrary predicate
    pub fn filter<F>(&self, mut predicate: F) -> Vec<&Risk>
    where
        F: FnMut(&Risk) -> bool,
    {
        self.risks.values().filter(|risk| predicate(risk)).collect()
    }

    /// Identifier the next added risk will receive
    #[inline]
    #[must_use]
    pub fn next_id(&self) -> RiskId {
        self.next_id
    }

    /// Number of stored risks
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.risks.len()
    }

    /// Check if no risks are stored
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }

    /// Replace the whole registry, budget included, with `other`
    pub fn replace_with(&mut self, other: RiskRegistry) {
        if !self.is_empty() {
            tracing::warn!(
                discarded = self.len(),
                loaded = other.len(),
                "replacing registry contents"
            );
        }
        *self = other;
    }
}
