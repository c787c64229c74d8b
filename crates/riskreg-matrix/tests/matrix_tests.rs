//! Matrix classification against populated registries

use pretty_assertions::assert_eq;
use riskreg_matrix::{
    group_by_cell, impact_bucket, probability_bucket, Bucket, Cell, RiskMatrix, TextRenderer, Zone,
};
use riskreg_model::{RiskId, RiskLevel, RiskUpdate};
use riskreg_test_utils::{new_risk, registry_with_budget, seeded_registry};

#[test]
fn test_single_high_risk_scenario() {
    let mut registry = registry_with_budget(10.0);
    let id = registry.add_risk(new_risk("A", 80.0, 8.0)).unwrap().id();
    let risk = registry.get_risk(id).unwrap();

    assert_eq!(risk.risk_level(), RiskLevel::High);

    let budget = registry.budget().unwrap();
    assert_eq!(impact_bucket(risk.impact(), budget), Bucket::VeryHigh);
    assert_eq!(probability_bucket(risk.probability()), Bucket::VeryHigh);

    let cells = group_by_cell(registry.iter(), budget);
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[&Cell::new(Bucket::VeryHigh, Bucket::VeryHigh)], ["R-1"]);
}

#[test]
fn test_seeded_registry_cells() {
    let registry = seeded_registry();
    let matrix = RiskMatrix::build(registry.iter(), registry.budget().unwrap());

    assert_eq!(matrix.risk_count(), registry.len());
    assert_eq!(
        matrix.occupants(Cell::new(Bucket::VeryLow, Bucket::VeryLow)),
        ["R-2", "R-4"]
    );
    assert_eq!(
        matrix.occupants(Cell::new(Bucket::Low, Bucket::VeryHigh)),
        ["R-1"]
    );
    assert_eq!(
        matrix.occupants(Cell::new(Bucket::High, Bucket::Medium)),
        ["R-3"]
    );
}

#[test]
fn test_every_risk_in_exactly_one_cell() {
    let registry = seeded_registry();
    let cells = group_by_cell(registry.iter(), registry.budget().unwrap());

    let mut placed: Vec<&str> = cells.values().flatten().map(String::as_str).collect();
    placed.sort_unstable();
    assert_eq!(placed, ["R-1", "R-2", "R-3", "R-4"]);
}

#[test]
fn test_update_moves_risk_between_cells() {
    let mut registry = seeded_registry();
    registry
        .update_risk(RiskId(2), RiskUpdate::new().probability(90.0).impact(95.0))
        .unwrap();

    let matrix = RiskMatrix::build(registry.iter(), registry.budget().unwrap());
    let cell = Cell::new(Bucket::VeryHigh, Bucket::VeryHigh);
    assert_eq!(matrix.occupants(cell), ["R-2"]);
    assert_eq!(cell.zone(), Zone::Red);
    assert_eq!(
        matrix.occupants(Cell::new(Bucket::VeryLow, Bucket::VeryLow)),
        ["R-4"]
    );
}

#[test]
fn test_budget_change_reclassifies_impact() {
    let mut registry = seeded_registry();
    registry.set_budget(10.0).unwrap();

    // Impact 8 of 10 is 80 percent
    let matrix = RiskMatrix::build(registry.iter(), registry.budget().unwrap());
    assert_eq!(
        matrix.occupants(Cell::new(Bucket::VeryHigh, Bucket::VeryHigh)),
        ["R-1"]
    );
}

#[test]
fn test_entries_serialize() {
    let registry = seeded_registry();
    let matrix = RiskMatrix::build(registry.iter(), registry.budget().unwrap());

    let json = serde_json::to_value(matrix.entries()).unwrap();
    let first = &json[0];
    assert_eq!(first["impact"], "very_low");
    assert_eq!(first["probability"], "very_low");
    assert_eq!(first["zone"], "green");
    assert_eq!(first["risks"], serde_json::json!(["R-2", "R-4"]));
}

#[test]
fn test_rendered_text_mentions_every_risk() {
    let registry = seeded_registry();
    let matrix = RiskMatrix::build(registry.iter(), registry.budget().unwrap());
    let text = TextRenderer::new().render(&matrix);

    for id in ["R-1", "R-2", "R-3", "R-4"] {
        assert!(text.contains(id), "missing {id} in\n{text}");
    }
}
