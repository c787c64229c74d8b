//! Risk Registry
//!
//! Owned, in-memory collection of risks keyed by sequential identifier, plus
//! the single project budget they are measured against.
//!
//! # Overview
//!
//! - [`RiskRegistry`]: create, update, delete and query risks
//! - [`RegisterSnapshot`]: the JSON document a registry is saved to and
//!   loaded from
//!
//! # Example
//!
//! ```rust
//! use riskreg_model::{NewRisk, RiskLevel};
//! use riskreg_registry::RiskRegistry;
//!
//! let mut registry = RiskRegistry::new();
//! registry.set_budget(10.0).unwrap();
//!
//! let id = registry
//!     .add_risk(NewRisk::new("A", "d", 80.0, 8.0))
//!     .unwrap()
//!     .id();
//!
//! assert_eq!(registry.get_risk(id).unwrap().risk_level(), RiskLevel::High);
//! assert_eq!(registry.high_risks().len(), 1);
//! ```

#![warn(missing_docs)]

mod error;
mod registry;
mod store;

pub use error::RegistryError;
pub use registry::RiskRegistry;
pub use store::{RegisterSnapshot, RiskRecord};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
