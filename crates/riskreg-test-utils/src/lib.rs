//! Testing utilities for the risk register workspace
//!
//! Shared fixtures for registries and risk field sets.

#![allow(missing_docs)]

use riskreg_model::{NewRisk, ReportingLevel, RiskType};
use riskreg_registry::RiskRegistry;

pub fn new_risk(name: &str, probability: f64, impact: f64) -> NewRisk {
    NewRisk::new(name, format!("{name} description"), probability, impact)
}

pub fn registry_with_budget(budget: f64) -> RiskRegistry {
    let mut registry = RiskRegistry::new();
    registry.set_budget(budget).unwrap();
    registry
}

/// Budget 100 with one risk per reporting level and both types:
///
/// | id  | name       | p    | impact | level  | reporting | type     |
/// |-----|------------|------|--------|--------|-----------|----------|
/// | R-1 | Supplier   | 80   | 8      | High   | Project   | Project  |
/// | R-2 | Staffing   | 5    | 1      | Low    | Program   | Project  |
/// | R-3 | Market     | 40   | 60     | High   | SteerCo   | Business |
/// | R-4 | Licensing  | 0    | 0      | Low    | Project   | Business |
pub fn seeded_registry() -> RiskRegistry {
    let mut registry = registry_with_budget(100.0);
    registry.add_risk(new_risk("Supplier", 80.0, 8.0)).unwrap();
    registry
        .add_risk(new_risk("Staffing", 5.0, 1.0).with_reporting_level(ReportingLevel::Program))
        .unwrap();
    registry
        .add_risk(
            new_risk("Market", 40.0, 60.0)
                .with_reporting_level(ReportingLevel::SteerCo)
                .with_risk_type(RiskType::Business),
        )
        .unwrap();
    registry
        .add_risk(new_risk("Licensing", 0.0, 0.0).with_risk_type(RiskType::Business))
        .unwrap();
    registry
}
