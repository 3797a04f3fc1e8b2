//! Run summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::utils::format_duration;

/// Counts and step timings collected over one analysis run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub fields_kept: usize,
    pub fields_dropped: usize,
    pub rows_selected: usize,
    pub features_ranked: usize,
    pub correlated_pairs: usize,
    steps: Vec<(String, Duration)>,
}

impl RunSummary {
    pub fn new(rows_loaded: usize) -> Self {
        Self {
            rows_loaded,
            ..Default::default()
        }
    }

    /// Record the elapsed time of a named step, in run order
    pub fn record_step(&mut self, name: &str, elapsed: Duration) {
        self.steps.push((name.to_string(), elapsed));
    }

    pub fn steps(&self) -> &[(String, Duration)] {
        &self.steps
    }

    pub fn total_time(&self) -> Duration {
        self.steps.iter().map(|(_, d)| *d).sum()
    }

    /// Share of loaded rows that passed the filters, in percent
    pub fn selected_pct(&self) -> f64 {
        if self.rows_loaded == 0 {
            0.0
        } else {
            self.rows_selected as f64 / self.rows_loaded as f64 * 100.0
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows Loaded"), Cell::new(self.rows_loaded)]);
        table.add_row(vec![
            Cell::new("🗑️  Fields Dropped"),
            Cell::new(self.fields_dropped).fg(if self.fields_dropped == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![Cell::new("🧾 Fields Kept"), Cell::new(self.fields_kept)]);
        table.add_row(vec![
            Cell::new("🔍 Rows Selected"),
            Cell::new(format!("{} ({:.1}%)", self.rows_selected, self.selected_pct()))
                .fg(Color::Cyan),
        ]);
        table.add_row(vec![
            Cell::new("🌲 Features Ranked"),
            Cell::new(self.features_ranked),
        ]);
        table.add_row(vec![
            Cell::new("🔗 Correlated Pairs"),
            Cell::new(self.correlated_pairs),
        ]);

        for (name, elapsed) in &self.steps {
            table.add_row(vec![
                Cell::new(format!("⏱  {}", name)),
                Cell::new(format_duration(*elapsed)).fg(Color::DarkGrey),
            ]);
        }

        table.add_row(vec![
            Cell::new("✅ Total Time"),
            Cell::new(format_duration(self.total_time()))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}
