//! Terminal tables for summaries, importance rankings and correlations

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{CorrelatedPair, ImportanceTable, ViewSummary};

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("      {}", line);
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Numeric statistics and label counts of the selected view
pub fn display_view_summary(summary: &ViewSummary) {
    println!(
        "      {} {}",
        style("Rows in view:").dim(),
        style(summary.rows).yellow().bold()
    );

    if !summary.numeric.is_empty() {
        let mut table = new_table(&["Field", "Mean", "Std", "Min", "Max"]);
        for s in &summary.numeric {
            table.add_row(vec![
                Cell::new(&s.field),
                Cell::new(fmt_opt(s.mean)).set_alignment(CellAlignment::Right),
                Cell::new(fmt_opt(s.std)).set_alignment(CellAlignment::Right),
                Cell::new(fmt_opt(s.min)).set_alignment(CellAlignment::Right),
                Cell::new(fmt_opt(s.max)).set_alignment(CellAlignment::Right),
            ]);
        }
        print_indented(&table);
    }

    for cat in &summary.categorical {
        let counts: Vec<String> = cat
            .counts
            .iter()
            .filter(|c| c.count > 0)
            .map(|c| format!("{}={}", c.label, c.count))
            .collect();
        println!(
            "      {} {}",
            style(format!("{}:", cat.field)).cyan(),
            if counts.is_empty() {
                "-".to_string()
            } else {
                counts.join(", ")
            }
        );
    }
}

/// Ranked features with a proportional bar
pub fn display_importance(table: &ImportanceTable) {
    let max = table
        .entries
        .first()
        .map(|e| e.importance)
        .unwrap_or(0.0);

    let mut out = new_table(&["#", "Feature", "Importance", ""]);
    for (i, entry) in table.entries.iter().enumerate() {
        let width = if max > 0.0 {
            (entry.importance / max * 20.0).round() as usize
        } else {
            0
        };
        let color = if i < 3 { Color::Green } else { Color::White };
        out.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.feature).fg(color),
            Cell::new(format!("{:.4}", entry.importance)).set_alignment(CellAlignment::Right),
            Cell::new("█".repeat(width)).fg(Color::Cyan),
        ]);
    }
    print_indented(&out);
}

/// Strongest correlated pairs, at most `limit` of them
pub fn display_correlated_pairs(pairs: &[CorrelatedPair], limit: usize) {
    let mut table = new_table(&["Feature 1", "Feature 2", "r"]);
    for pair in pairs.iter().take(limit) {
        let color = if pair.correlation >= 0.0 {
            Color::Green
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new(&pair.feature1),
            Cell::new(&pair.feature2),
            Cell::new(format!("{:+.3}", pair.correlation))
                .fg(color)
                .set_alignment(CellAlignment::Right),
        ]);
    }
    print_indented(&table);

    if pairs.len() > limit {
        println!(
            "      {}",
            style(format!("... and {} more", pairs.len() - limit)).dim()
        );
    }
}
