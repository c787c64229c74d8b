//! Risk Register Model
//!
//! The risk entity and the pure arithmetic that classifies it.
//!
//! # Core Concepts
//!
//! - [`Risk`]: one recorded project risk with validated fields
//! - [`RiskLevel`]: Low/Medium/High band derived from probability × impact
//! - [`ProjectBudget`]: positive monetary ceiling for impact percentages
//! - [`RiskUpdate`]: typed partial update applied to an existing risk
//!
//! # Example
//!
//! ```rust
//! use riskreg_model::{NewRisk, Risk, RiskId, RiskLevel};
//!
//! let fields = NewRisk::new("Supplier delay", "Key vendor misses delivery", 80.0, 8.0);
//! let risk = Risk::new(RiskId(1), fields).unwrap();
//!
//! assert_eq!(risk.risk_level(), RiskLevel::High);
//! assert_eq!(risk.id().to_string(), "R-1");
//! ```

#![warn(missing_docs)]

mod budget;
mod classification;
mod error;
mod risk;

pub use budget::ProjectBudget;
pub use classification::{ReportingLevel, RiskLevel, RiskType};
pub use error::ValidationError;
pub use risk::{NewRisk, Risk, RiskId, RiskUpdate};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with risks
    pub use crate::{
        NewRisk, ProjectBudget, ReportingLevel, Risk, RiskId, RiskLevel, RiskType, RiskUpdate,
        ValidationError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
