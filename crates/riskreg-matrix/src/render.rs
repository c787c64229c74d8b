//! Plain-text matrix rendering
//!
//! Draws the grid with probability rows from very high down to very low and
//! impact columns from very low to very high. Each cell shows its zone marker
//! followed by the ids it holds. With colour enabled the padded cell is also
//! painted in its zone colour.

use crate::bucket::Bucket;
use crate::grid::{Cell, RiskMatrix, Zone};
use console::style;
use std::fmt::Write;

const LABEL_WIDTH: usize = 11;
const DEFAULT_CELL_WIDTH: usize = 20;

/// Shorten `text` to at most `max_chars`, ending in `...` when cut
#[must_use]
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Text renderer for a [`RiskMatrix`]
#[derive(Debug, Clone)]
pub struct TextRenderer {
    title: String,
    cell_width: usize,
    color: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    /// Renderer with default title and cell width
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Risk Matrix".to_string(),
            cell_width: DEFAULT_CELL_WIDTH,
            color: false,
        }
    }

    /// With title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// With cell width in characters (at least 8)
    #[must_use]
    pub fn with_cell_width(mut self, width: usize) -> Self {
        self.cell_width = width.max(8);
        self
    }

    /// Paint cells in their zone colour with ANSI escapes
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Render the grid
    #[must_use]
    pub fn render(&self, matrix: &RiskMatrix) -> String {
        let width = self.cell_width;
        let label_width = LABEL_WIDTH;
        let mut out = String::new();
        let rule = "-".repeat(label_width + (width + 3) * Bucket::ALL.len());

        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{rule}");

        let _ = write!(out, "{:<label_width$}", "");
        for impact in Bucket::ALL {
            let _ = write!(out, " | {:<width$}", impact.label());
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{rule}");

        for probability in Bucket::ALL.into_iter().rev() {
            let _ = write!(out, "{:<label_width$}", probability.label());
            for impact in Bucket::ALL {
                let cell = Cell::new(impact, probability);
                let text = cell_text(cell.zone(), matrix.occupants(cell));
                let padded = format!("{:<width$}", truncate_label(&text, width));
                if self.color {
                    let _ = write!(out, " | {}", paint(cell.zone(), padded));
                } else {
                    let _ = write!(out, " | {padded}");
                }
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "rows: probability, columns: impact (share of budget {}); [g]/[y]/[r] = green/yellow/red",
            matrix.budget()
        );
        out
    }
}

fn paint(zone: Zone, text: String) -> String {
    let styled = style(text).force_styling(true);
    match zone {
        Zone::Green => styled.green(),
        Zone::Yellow => styled.yellow(),
        Zone::Red => styled.red(),
    }
    .to_string()
}

fn cell_text(zone: Zone, occupants: &[String]) -> String {
    let marker = match zone {
        Zone::Green => "[g]",
        Zone::Yellow => "[y]",
        Zone::Red => "[r]",
    };
    if occupants.is_empty() {
        marker.to_string()
    } else {
        format!("{marker} {}", occupants.join(","))
    }
}
