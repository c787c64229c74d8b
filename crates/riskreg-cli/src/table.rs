//! Risk table and detail views

use clap::ValueEnum;
use riskreg_model::{ProjectBudget, Risk};
use std::cmp::Ordering;
use std::fmt::Write;

/// Column a risk table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    /// Numeric id
    Id,
    /// Name, case-insensitive
    Name,
    /// Description, case-insensitive
    Description,
    /// Probability
    Probability,
    /// Impact
    Impact,
    /// Probability-weighted impact
    ExpectedValue,
    /// Reporting level label
    ReportingLevel,
    /// Risk type label
    RiskType,
    /// Risk level label
    RiskLevel,
}

impl SortColumn {
    fn compare(self, a: &Risk, b: &Risk) -> Ordering {
        match self {
            Self::Id => a.id().cmp(&b.id()),
            Self::Name => cmp_text(a.name(), b.name()),
            Self::Description => cmp_text(a.description(), b.description()),
            Self::Probability => a.probability().total_cmp(&b.probability()),
            Self::Impact => a.impact().total_cmp(&b.impact()),
            Self::ExpectedValue => a.expected_value().total_cmp(&b.expected_value()),
            Self::ReportingLevel => {
                cmp_text(a.reporting_level().as_str(), b.reporting_level().as_str())
            }
            Self::RiskType => cmp_text(a.risk_type().as_str(), b.risk_type().as_str()),
            Self::RiskLevel => cmp_text(a.risk_level().as_str(), b.risk_level().as_str()),
        }
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort risks in place; ties keep their current order
pub fn sort_risks(risks: &mut [&Risk], column: SortColumn, descending: bool) {
    risks.sort_by(|a, b| {
        let ordering = column.compare(a, b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

const HEADERS: [&str; 9] = [
    "ID",
    "Name",
    "Description",
    "Probability",
    "Impact",
    "Expected value",
    "Reporting level",
    "Type",
    "Level",
];

fn row(risk: &Risk) -> [String; 9] {
    [
        risk.id().to_string(),
        risk.name().to_string(),
        risk.description().to_string(),
        format!("{:.1}", risk.probability()),
        format!("{:.2}", risk.impact()),
        format!("{:.2}", risk.expected_value()),
        risk.reporting_level().to_string(),
        risk.risk_type().to_string(),
        risk.risk_level().to_string(),
    ]
}

/// Render risks as an aligned text table
#[must_use]
pub fn render_table(risks: &[&Risk]) -> String {
    let rows: Vec<[String; 9]> = risks.iter().map(|risk| row(risk)).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(&mut out, &rule, &widths);
    for cells in &rows {
        write_line(&mut out, cells, &widths);
    }
    out
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Render the detail view of one risk
#[must_use]
pub fn render_details(risk: &Risk, budget: Option<ProjectBudget>, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", risk.id());
    let _ = writeln!(out, "Name: {}", risk.name());
    let _ = writeln!(out, "Description: {}", risk.description());
    match budget {
        Some(budget) => {
            let _ = writeln!(out, "Budget: {budget} {currency}");
        }
        None => {
            let _ = writeln!(out, "Budget: not set");
        }
    }
    let _ = writeln!(out, "Probability: {:.1}%", risk.probability());
    let _ = writeln!(out, "Impact: {:.2} {currency}", risk.impact());
    let usage = risk.budget_usage_percent(budget.map_or(0.0, ProjectBudget::value));
    let _ = writeln!(out, "Budget usage: {usage:.1}%");
    let _ = writeln!(out, "Expected value: {:.2} {currency}", risk.expected_value());
    let _ = writeln!(out, "Reporting level: {}", risk.reporting_level());
    let _ = writeln!(out, "Type: {}", risk.risk_type());
    let _ = writeln!(out, "Risk level: {}", risk.risk_level());
    let _ = writeln!(out, "Created: {}", risk.created_at().to_rfc3339());
    let _ = writeln!(out, "Updated: {}", risk.updated_at().to_rfc3339());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use riskreg_model::{NewRisk, ReportingLevel, RiskId, RiskType};

    fn risk(id: u64, name: &str, probability: f64, impact: f64) -> Risk {
        Risk::new(RiskId(id), NewRisk::new(name, "d", probability, impact)).unwrap()
    }

    fn ids(risks: &[&Risk]) -> Vec<u64> {
        risks.iter().map(|r| r.id().get()).collect()
    }

    #[test]
    fn sort_id_is_numeric() {
        let (a, b, c) = (risk(10, "a", 1.0, 1.0), risk(2, "b", 1.0, 1.0), risk(1, "c", 1.0, 1.0));
        let mut risks = vec![&a, &b, &c];
        sort_risks(&mut risks, SortColumn::Id, false);
        assert_eq!(ids(&risks), [1, 2, 10]);
    }

    #[test]
    fn sort_name_case_insensitive_and_descending() {
        let (a, b, c) = (risk(1, "beta", 1.0, 1.0), risk(2, "Alpha", 1.0, 1.0), risk(3, "gamma", 1.0, 1.0));
        let mut risks = vec![&a, &b, &c];
        sort_risks(&mut risks, SortColumn::Name, false);
        assert_eq!(ids(&risks), [2, 1, 3]);

        sort_risks(&mut risks, SortColumn::Name, true);
        assert_eq!(ids(&risks), [3, 1, 2]);
    }

    #[test]
    fn sort_expected_value_numeric() {
        let (a, b) = (risk(1, "a", 50.0, 2.0), risk(2, "b", 10.0, 30.0));
        let mut risks = vec![&b, &a];
        sort_risks(&mut risks, SortColumn::ExpectedValue, false);
        assert_eq!(ids(&risks), [1, 2]);
    }

    #[test]
    fn table_formats_numbers() {
        let r = Risk::new(
            RiskId(1),
            NewRisk::new("Supplier", "Vendor slips", 80.0, 8.0)
                .with_reporting_level(ReportingLevel::SteerCo)
                .with_risk_type(RiskType::Business),
        )
        .unwrap();
        let text = render_table(&[&r]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        let cells: Vec<&str> = lines[2]
            .split("  ")
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        assert_eq!(
            cells,
            ["R-1", "Supplier", "Vendor slips", "80.0", "8.00", "6.40", "SteerCo", "Business", "High"]
        );
    }

    #[test]
    fn details_with_and_without_budget() {
        let r = risk(4, "a", 80.0, 8.0);
        let budget = ProjectBudget::new(10.0).unwrap();

        let text = render_details(&r, Some(budget), "kEUR");
        assert!(text.contains("ID: R-4"));
        assert!(text.contains("Budget: 10.00 kEUR"));
        assert!(text.contains("Budget usage: 80.0%"));
        assert!(text.contains("Risk level: High"));

        let text = render_details(&r, None, "kEUR");
        assert!(text.contains("Budget: not set"));
        assert!(text.contains("Budget usage: 0.0%"));
    }
}
