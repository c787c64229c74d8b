//! Save/load tests against real files

use pretty_assertions::assert_eq;
use riskreg_model::{NewRisk, ReportingLevel, RiskId, RiskType, RiskUpdate};
use riskreg_registry::{RegistryError, RiskRegistry};

type FieldTuple = (String, String, f64, f64, ReportingLevel, RiskType);

fn tuples(registry: &RiskRegistry) -> Vec<(RiskId, FieldTuple)> {
    registry
        .iter()
        .map(|risk| {
            (
                risk.id(),
                (
                    risk.name().to_string(),
                    risk.description().to_string(),
                    risk.probability(),
                    risk.impact(),
                    risk.reporting_level(),
                    risk.risk_type(),
                ),
            )
        })
        .collect()
}

fn populated() -> RiskRegistry {
    let mut registry = RiskRegistry::new();
    registry.set_budget(120.0).unwrap();
    registry
        .add_risk(NewRisk::new("Supplier delay", "Vendor slips", 80.0, 8.0))
        .unwrap();
    registry
        .add_risk(
            NewRisk::new("Scope creep", "Änderungswünsche", 35.5, 14.25)
                .with_reporting_level(ReportingLevel::Program)
                .with_risk_type(RiskType::Business),
        )
        .unwrap();
    registry
        .add_risk(
            NewRisk::new("Regulation", "New audit rules", 5.0, 0.0)
                .with_reporting_level(ReportingLevel::SteerCo),
        )
        .unwrap();
    registry
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("risks.json");

    let registry = populated();
    registry.save(&path).unwrap();

    let loaded = RiskRegistry::load(&path).unwrap();
    assert_eq!(tuples(&loaded), tuples(&registry));
    assert_eq!(loaded.budget().unwrap(), registry.budget().unwrap());
    assert_eq!(loaded.next_id(), registry.next_id());
}

#[test]
fn test_round_trip_keeps_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("risks.json");

    let mut registry = populated();
    registry
        .update_risk(RiskId(2), RiskUpdate::new().impact(20.0))
        .unwrap();
    registry.save(&path).unwrap();

    let loaded = RiskRegistry::load(&path).unwrap();
    let before = registry.get_risk(RiskId(2)).unwrap();
    let after = loaded.get_risk(RiskId(2)).unwrap();
    assert_eq!(after.created_at(), before.created_at());
    assert_eq!(after.updated_at(), before.updated_at());
}

#[test]
fn test_saved_document_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("risks.json");
    populated().save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["project_budget"], serde_json::json!(120.0));
    let risks = value["risks"].as_array().unwrap();
    assert_eq!(risks.len(), 3);
    assert_eq!(risks[0]["id"], serde_json::json!(1));
    assert_eq!(risks[1]["reporting_level"], serde_json::json!("Program"));
    assert_eq!(risks[1]["risk_type"], serde_json::json!("Business"));
    assert_eq!(risks[2]["reporting_level"], serde_json::json!("SteerCo"));
    assert_eq!(risks[1]["description"], serde_json::json!("Änderungswünsche"));
}

#[test]
fn test_load_into_replaces_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.json");

    let mut other = RiskRegistry::new();
    other.set_budget(5.0).unwrap();
    other
        .add_risk(NewRisk::new("Only", "one", 10.0, 1.0))
        .unwrap();
    other.save(&path).unwrap();

    let mut registry = populated();
    registry.load_into(&path).unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.list_all()[0].name(), "Only");
    assert!((registry.budget().unwrap().value() - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_failed_load_keeps_current_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut registry = populated();
    let err = registry.load_into(&path).unwrap_err();

    assert!(matches!(err, RegistryError::Json { .. }));
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = RiskRegistry::load(dir.path().join("absent.json")).unwrap_err();
    assert!(err.is_missing_file());
}

#[test]
fn test_save_without_budget_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("risks.json");

    let registry = RiskRegistry::new();
    assert!(matches!(
        registry.save(&path),
        Err(RegistryError::BudgetNotSet)
    ));
    assert!(!path.exists());
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("risks.json");

    let mut registry = populated();
    registry.save(&path).unwrap();
    registry.delete_risk(RiskId(1)).unwrap();
    registry.save(&path).unwrap();

    let loaded = RiskRegistry::load(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.get_risk(RiskId(1)).is_none());
    assert_eq!(loaded.next_id(), RiskId(4));
}
