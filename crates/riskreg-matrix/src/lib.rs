//! Risk Matrix
//!
//! Buckets risks onto the 5×5 probability/impact grid.
//!
//! Probability is bucketed directly on its 0–100 scale; impact is bucketed on
//! its share of the [`ProjectBudget`](riskreg_model::ProjectBudget). Both use
//! the same upper bounds: 5, 10, 50, 75, then everything above.
//!
//! # Example
//!
//! ```rust
//! use riskreg_matrix::{group_by_cell, Bucket, Cell, Zone};
//! use riskreg_model::{NewRisk, ProjectBudget, Risk, RiskId};
//!
//! let budget = ProjectBudget::new(10.0).unwrap();
//! let risk = Risk::new(RiskId(1), NewRisk::new("A", "d", 80.0, 8.0)).unwrap();
//!
//! let cells = group_by_cell([&risk], budget);
//! let cell = Cell::new(Bucket::VeryHigh, Bucket::VeryHigh);
//! assert_eq!(cells[&cell], vec!["R-1".to_string()]);
//! assert_eq!(cell.zone(), Zone::Red);
//! ```

#![warn(missing_docs)]

mod bucket;
mod grid;
mod render;

pub use bucket::{impact_bucket, probability_bucket, Bucket, BUCKET_UPPER_BOUNDS};
pub use grid::{group_by_cell, Cell, CellEntry, CellMap, RiskMatrix, Zone};
pub use render::{truncate_label, TextRenderer};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
