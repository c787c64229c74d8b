//! Cell grouping
//!
//! Provides [`group_by_cell`] and the [`RiskMatrix`] view built on top of it.

use crate::bucket::{impact_bucket, probability_bucket, Bucket};
use riskreg_model::{ProjectBudget, Risk};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grid coordinate: impact band (column) and probability band (row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column
    pub impact: Bucket,
    /// Row
    pub probability: Bucket,
}

impl Cell {
    /// Create cell
    #[inline]
    #[must_use]
    pub fn new(impact: Bucket, probability: Bucket) -> Self {
        Self {
            impact,
            probability,
        }
    }

    /// Cell a risk falls into
    #[must_use]
    pub fn of(risk: &Risk, budget: ProjectBudget) -> Self {
        Self::new(
            impact_bucket(risk.impact(), budget),
            probability_bucket(risk.probability()),
        )
    }

    /// Colour zone of this cell
    #[inline]
    #[must_use]
    pub fn zone(self) -> Zone {
        Zone::for_indices(self.probability.index(), self.impact.index())
    }

    /// Every cell, row-major from the lowest probability
    pub fn all() -> impl Iterator<Item = Self> {
        Bucket::ALL.into_iter().flat_map(|probability| {
            Bucket::ALL
                .into_iter()
                .map(move |impact| Self::new(impact, probability))
        })
    }
}

/// Presentational colour of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Row + column ≤ 2
    Green,
    /// Between the other two
    Yellow,
    /// Row + column ≥ 6
    Red,
}

impl Zone {
    /// Zone for raw grid indices
    #[must_use]
    pub fn for_indices(row: usize, col: usize) -> Self {
        match row + col {
            0..=2 => Self::Green,
            6.. => Self::Red,
            _ => Self::Yellow,
        }
    }

    /// Lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// Occupied cells mapped to display ids (`R-<id>`) in input order
pub type CellMap = BTreeMap<Cell, Vec<String>>;

/// Group risks by matrix cell
///
/// Each risk lands in exactly one cell; within a cell, ids keep the order in
/// which the risks were supplied. Cells without risks are absent.
pub fn group_by_cell<'a, I>(risks: I, budget: ProjectBudget) -> CellMap
where
    I: IntoIterator<Item = &'a Risk>,
{
    let mut cells = CellMap::new();
    for risk in risks {
        let cell = Cell::of(risk, budget);
        tracing::trace!(
            id = %risk.id(),
            impact = cell.impact.index(),
            probability = cell.probability.index(),
            "risk bucketed"
        );
        cells.entry(cell).or_default().push(risk.id().to_string());
    }
    cells
}

/// One occupied cell in serialisable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEntry {
    /// Impact band
    pub impact: Bucket,
    /// Probability band
    pub probability: Bucket,
    /// Colour zone
    pub zone: Zone,
    /// Display ids in the cell
    pub risks: Vec<String>,
}

/// Grouped matrix ready for presentation
#[derive(Debug, Clone, PartialEq)]
pub struct RiskMatrix {
    budget: ProjectBudget,
    cells: CellMap,
}

impl RiskMatrix {
    /// Classify `risks` against `budget`
    pub fn build<'a, I>(risks: I, budget: ProjectBudget) -> Self
    where
        I: IntoIterator<Item = &'a Risk>,
    {
        let cells = group_by_cell(risks, budget);
        tracing::debug!(occupied = cells.len(), "risk matrix built");
        Self { budget, cells }
    }

    /// Budget the matrix was built against
    #[inline]
    #[must_use]
    pub fn budget(&self) -> ProjectBudget {
        self.budget
    }

    /// Display ids in a cell, empty if unoccupied
    #[must_use]
    pub fn occupants(&self, cell: Cell) -> &[String] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Underlying cell mapping
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &CellMap {
        &self.cells
    }

    /// Number of occupied cells
    #[inline]
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells.len()
    }

    /// Number of placed risks
    #[must_use]
    pub fn risk_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Occupied cells as serialisable entries
    #[must_use]
    pub fn entries(&self) -> Vec<CellEntry> {
        self.cells
            .iter()
            .map(|(cell, risks)| CellEntry {
                impact: cell.impact,
                probability: cell.probability,
                zone: cell.zone(),
                risks: risks.clone(),
            })
            .collect()
    }
}
