//! Terminal styling utilities for the analysis run

use console::{style, Emoji};
use std::path::Path;
use std::time::Duration;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static FILTER: Emoji<'_, '_> = Emoji("🔍 ", "");
pub static SEED: Emoji<'_, '_> = Emoji("🌱 ", "");
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ██████╗ ██████╗  █████╗ ██████╗ ███████╗██╗     ███████╗███╗   ██╗███████╗
    ██╔════╝ ██╔══██╗██╔══██╗██╔══██╗██╔════╝██║     ██╔════╝████╗  ██║██╔════╝
    ██║  ███╗██████╔╝███████║██║  ██║█████╗  ██║     █████╗  ██╔██╗ ██║███████╗
    ██║   ██║██╔══██╗██╔══██║██║  ██║██╔══╝  ██║     ██╔══╝  ██║╚██╗██║╚════██║
    ╚██████╔╝██║  ██║██║  ██║██████╔╝███████╗███████╗███████╗██║ ╚████║███████║
     ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚═════╝ ╚══════╝╚══════╝╚══════╝╚═╝  ╚═══╝╚══════╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("What drives student performance, and what moves together").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Values shown on the configuration card
pub struct ConfigCard<'a> {
    pub input: &'a Path,
    pub target: &'a str,
    pub predicates: usize,
    pub trees: usize,
    pub seed: u64,
    pub correlation_threshold: f64,
}

/// Print configuration card
pub fn print_config(card: &ConfigCard<'_>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:  {:<39}│",
        FOLDER,
        truncate_path(card.input, 38)
    );
    println!(
        "    │  {} Target: {:<39}│",
        TARGET,
        truncate_string(card.target, 38)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Filters:               {:<24}│",
        FILTER,
        style(card.predicates).yellow()
    );
    println!(
        "    │  {} Trees / seed:          {:<24}│",
        SEED,
        style(format!("{} / {}", card.trees, card.seed)).yellow()
    );
    println!(
        "    │  {} Correlation threshold: {:<24}│",
        LINK,
        style(format!("{:.2}", card.correlation_threshold)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print how long a step took
pub fn print_step_time(elapsed: Duration) {
    println!(
        "      {}",
        style(format!("⏱  {}", format_duration(elapsed))).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Analysis complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

/// Human-readable duration: milliseconds below one second, seconds otherwise
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{:.2}s", secs)
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
