//! JSON persistence
//!
//! A registry is saved as one [`RegisterSnapshot`] document and loaded back
//! wholesale. Loading re-validates every record and keeps the stored ids.

use crate::error::RegistryError;
use crate::registry::RiskRegistry;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use riskreg_model::{NewRisk, ProjectBudget, ReportingLevel, Risk, RiskId, RiskType};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Persisted form of a whole registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterSnapshot {
    /// Project budget
    pub project_budget: ProjectBudget,
    /// Identifier the next added risk receives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<RiskId>,
    /// Risks in table order
    pub risks: Vec<RiskRecord>,
}

/// Persisted form of one risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    /// Numeric identifier
    pub id: RiskId,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Probability in percent
    pub probability: f64,
    /// Monetary impact
    pub impact: f64,
    /// Reporting level
    pub reporting_level: ReportingLevel,
    /// Risk type
    pub risk_type: RiskType,
    /// Creation time, absent in older files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last mutation time, absent in older files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Risk> for RiskRecord {
    fn from(risk: &Risk) -> Self {
        Self {
            id: risk.id(),
            name: risk.name().to_string(),
            description: risk.description().to_string(),
            probability: risk.probability(),
            impact: risk.impact(),
            reporting_level: risk.reporting_level(),
            risk_type: risk.risk_type(),
            created_at: Some(risk.created_at()),
            updated_at: Some(risk.updated_at()),
        }
    }
}

impl RiskRecord {
    fn into_risk(self, loaded_at: DateTime<Utc>) -> Result<Risk, RegistryError> {
        let created_at = self.created_at.unwrap_or(loaded_at);
        let updated_at = self.updated_at.unwrap_or(created_at).max(created_at);
        let fields = NewRisk {
            name: self.name,
            description: self.description,
            probability: self.probability,
            impact: self.impact,
            reporting_level: self.reporting_level,
            risk_type: self.risk_type,
        };
        Ok(Risk::with_timestamps(self.id, fields, created_at, updated_at)?)
    }
}

impl RiskRegistry {
    /// Capture the registry as a persistable document
    ///
    /// # Errors
    /// Returns [`RegistryError::BudgetNotSet`] if no budget was set
    pub fn snapshot(&self) -> Result<RegisterSnapshot, RegistryError> {
        Ok(RegisterSnapshot {
            project_budget: self.budget()?,
            next_id: Some(self.next_id()),
            risks: self.iter().map(RiskRecord::from).collect(),
        })
    }

    /// Rebuild a registry from a document
    ///
    /// # Errors
    /// Returns [`RegistryError::Validation`] for a record that fails entity
    /// validation and [`RegistryError::DuplicateId`] if an id repeats
    pub fn from_snapshot(snapshot: RegisterSnapshot) -> Result<Self, RegistryError> {
        let loaded_at = Utc::now();
        let mut risks = IndexMap::with_capacity(snapshot.risks.len());
        for record in snapshot.risks {
            let id = record.id;
            if risks.contains_key(&id) {
                return Err(RegistryError::DuplicateId(id));
            }
            risks.insert(id, record.into_risk(loaded_at)?);
        }
        let next_id = snapshot.next_id.unwrap_or(RiskRegistry::FIRST_ID);
        Self::from_parts(risks, next_id, Some(snapshot.project_budget))
    }

    /// Encode as pretty-printed JSON
    ///
    /// # Errors
    /// Returns [`RegistryError::BudgetNotSet`] if no budget was set
    pub fn to_json(&self) -> Result<String, RegistryError> {
        Ok(serde_json::to_string_pretty(&self.snapshot()?)?)
    }

    /// Decode from JSON text
    ///
    /// # Errors
    /// Returns [`RegistryError::Serialization`] for malformed JSON, otherwise
    /// as [`RiskRegistry::from_snapshot`]
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let snapshot: RegisterSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Write the registry to `path`, replacing the file atomically
    ///
    /// # Errors
    /// Returns [`RegistryError::BudgetNotSet`] if no budget was set and
    /// [`RegistryError::Io`] if the file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        let path = path.as_ref();
        let snapshot = self.snapshot()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| RegistryError::io_error(path, e))?;
        serde_json::to_writer_pretty(&mut file, &snapshot)
            .map_err(|e| RegistryError::json_error(path, e))?;
        file.write_all(b"\n")
            .and_then(|()| file.flush())
            .map_err(|e| RegistryError::io_error(path, e))?;
        file.persist(path)
            .map_err(|e| RegistryError::io_error(path, e.error))?;

        tracing::info!(path = %path.display(), risks = self.len(), "register saved");
        Ok(())
    }

    /// Read a registry from `path`
    ///
    /// # Errors
    /// Returns [`RegistryError::Io`] if the file cannot be read,
    /// [`RegistryError::Json`] if it is not a register document, otherwise
    /// as [`RiskRegistry::from_snapshot`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RegistryError::io_error(path, e))?;
        let snapshot: RegisterSnapshot =
            serde_json::from_str(&text).map_err(|e| RegistryError::json_error(path, e))?;
        let registry = Self::from_snapshot(snapshot)?;

        tracing::info!(path = %path.display(), risks = registry.len(), "register loaded");
        Ok(registry)
    }

    /// Replace this registry with the one stored at `path`
    ///
    /// On error the current contents are kept.
    ///
    /// # Errors
    /// As [`RiskRegistry::load`]
    pub fn load_into(&mut self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        let loaded = Self::load(path)?;
        self.replace_with(loaded);
        Ok(())
    }
}
