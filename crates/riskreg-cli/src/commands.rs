//! Command execution
//!
//! A [`Session`] loads the store named by the configuration, applies one
//! [`Action`] and writes the store back when the action changed it.

use crate::config::RegisterConfig;
use crate::table::{render_details, render_table, sort_risks, SortColumn};
use anyhow::Context;
use riskreg_matrix::{RiskMatrix, TextRenderer};
use riskreg_model::{NewRisk, ProjectBudget, ReportingLevel, RiskId, RiskLevel, RiskType, RiskUpdate};
use riskreg_registry::{RegistryError, RiskRegistry};
use std::fmt::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Filters and ordering for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
    /// Sort column, insertion order when unset
    pub sort: Option<SortColumn>,
    /// Reverse the sort
    pub descending: bool,
    /// Keep only this risk type
    pub risk_type: Option<RiskType>,
    /// Keep only this reporting level
    pub reporting_level: Option<ReportingLevel>,
    /// Keep only High risks
    pub high_only: bool,
}

/// Output format of `matrix`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    /// Plain-text grid
    Text,
    /// Occupied cells as JSON
    Json,
}

/// One register operation
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Set the project budget
    SetBudget(f64),
    /// Print the project budget
    ShowBudget,
    /// Record a new risk
    Add(NewRisk),
    /// Change fields of an existing risk
    Update(RiskId, RiskUpdate),
    /// Remove a risk
    Delete(RiskId),
    /// Print one risk in detail
    Show(RiskId),
    /// Print risks as a table
    List(ListOptions),
    /// Print the probability/impact matrix
    Matrix {
        /// Output format
        format: MatrixFormat,
        /// Heading for text output
        title: String,
    },
    /// Save the register to another file
    Export(PathBuf),
    /// Replace the register with a file's contents
    Import(PathBuf),
}

impl Action {
    /// Whether a successful run of this action changes the register
    #[inline]
    #[must_use]
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::SetBudget(_) | Self::Add(_) | Self::Update(..) | Self::Delete(_) | Self::Import(_)
        )
    }
}

const BUDGET_HINT: &str = "set one with `riskreg budget set <amount>`";

/// Loaded register plus the configuration it came from
#[derive(Debug)]
pub struct Session {
    config: RegisterConfig,
    registry: RiskRegistry,
    dirty: bool,
    color: bool,
}

impl Session {
    /// Load the store named by `config`
    ///
    /// A store file that does not exist yet yields an empty register.
    ///
    /// # Errors
    /// Returns an error if the store exists but cannot be read or parsed
    pub fn open(config: RegisterConfig) -> anyhow::Result<Self> {
        let registry = match RiskRegistry::load(&config.data_file) {
            Ok(registry) => registry,
            Err(e) if e.is_missing_file() => {
                debug!(path = %config.data_file.display(), "no store yet, starting empty");
                RiskRegistry::new()
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("cannot open register {}", config.data_file.display())
                })
            }
        };
        Ok(Self::with_registry(config, registry))
    }

    /// Wrap an already loaded register
    #[must_use]
    pub fn with_registry(config: RegisterConfig, registry: RiskRegistry) -> Self {
        Self {
            config,
            registry,
            dirty: false,
            color: false,
        }
    }

    /// Colour the text matrix by zone
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The register
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &RiskRegistry {
        &self.registry
    }

    /// The configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Whether unsaved changes are pending
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn require_budget(&self) -> anyhow::Result<ProjectBudget> {
        self.registry.budget().context(BUDGET_HINT)
    }

    /// Run one action and return its output text
    ///
    /// # Errors
    /// Returns validation, lookup and IO errors from the register
    pub fn execute(&mut self, action: Action) -> anyhow::Result<String> {
        let mutates = action.mutates();
        let output = self.dispatch(action)?;
        if mutates {
            self.dirty = true;
        }
        Ok(output)
    }

    fn dispatch(&mut self, action: Action) -> anyhow::Result<String> {
        let currency = self.config.currency.clone();
        match action {
            Action::SetBudget(value) => {
                let budget = self.registry.set_budget(value)?;
                Ok(format!("Project budget set to {budget} {currency}\n"))
            }
            Action::ShowBudget => {
                let budget = self.require_budget()?;
                Ok(format!("{budget} {currency}\n"))
            }
            Action::Add(fields) => {
                self.require_budget()?;
                let risk = self.registry.add_risk(fields)?;
                Ok(format!("Added {} ({})\n", risk.id(), risk.risk_level()))
            }
            Action::Update(id, update) => {
                self.require_budget()?;
                if update.is_empty() {
                    anyhow::bail!("nothing to update for {id}");
                }
                let risk = self.registry.update_risk(id, update)?;
                Ok(format!("Updated {} ({})\n", risk.id(), risk.risk_level()))
            }
            Action::Delete(id) => {
                let risk = self.registry.delete_risk(id)?;
                Ok(format!("Deleted {} ({})\n", risk.id(), risk.name()))
            }
            Action::Show(id) => {
                let risk = self
                    .registry
                    .get_risk(id)
                    .ok_or(RegistryError::NotFound(id))?;
                Ok(render_details(risk, self.registry.try_budget(), &currency))
            }
            Action::List(options) => Ok(self.list(options)),
            Action::Matrix { format, title } => {
                let budget = self.require_budget()?;
                let matrix = RiskMatrix::build(self.registry.iter(), budget);
                match format {
                    MatrixFormat::Text => Ok(TextRenderer::new()
                        .with_title(title)
                        .with_color(self.color)
                        .render(&matrix)),
                    MatrixFormat::Json => {
                        let mut json = serde_json::to_string_pretty(&matrix.entries())?;
                        json.push('\n');
                        Ok(json)
                    }
                }
            }
            Action::Export(path) => {
                self.registry
                    .save(&path)
                    .with_context(|| format!("cannot export to {}", path.display()))?;
                info!(path = %path.display(), "exported register");
                Ok(format!(
                    "Saved {} risks to {}\n",
                    self.registry.len(),
                    path.display()
                ))
            }
            Action::Import(path) => {
                self.registry
                    .load_into(&path)
                    .with_context(|| format!("cannot import {}", path.display()))?;
                Ok(format!(
                    "Loaded {} risks from {}\n",
                    self.registry.len(),
                    path.display()
                ))
            }
        }
    }

    fn list(&self, options: ListOptions) -> String {
        if self.registry.is_empty() {
            return "No risks recorded\n".to_string();
        }
        let mut risks = self.registry.filter(|risk| {
            options.risk_type.map_or(true, |t| risk.risk_type() == t)
                && options
                    .reporting_level
                    .map_or(true, |l| risk.reporting_level() == l)
                && (!options.high_only || risk.risk_level() == RiskLevel::High)
        });
        if risks.is_empty() {
            return format!("0 of {} risks\n", self.registry.len());
        }
        if let Some(column) = options.sort {
            sort_risks(&mut risks, column, options.descending);
        }

        let mut out = render_table(&risks);
        let _ = writeln!(out, "{} of {} risks", risks.len(), self.registry.len());
        out
    }

    /// Write the register back if it changed
    ///
    /// # Errors
    /// Returns an error if the store cannot be written
    pub fn close(self) -> anyhow::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.registry
            .save(&self.config.data_file)
            .with_context(|| format!("cannot save register {}", self.config.data_file.display()))
    }
}
