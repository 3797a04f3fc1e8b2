//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::pipeline::{ForestConfig, Predicate, PrepareOptions, STUDENT_TARGET_FIELD};

/// GradeLens - Rank what drives student grades and how fields move together
#[derive(Parser, Debug)]
#[command(name = "gradelens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Categorical target column whose drivers are ranked
    #[arg(short, long, default_value = STUDENT_TARGET_FIELD)]
    pub target: String,

    /// Columns to drop before any analysis (comma-separated).
    /// When neither this nor --categorical is given, the Students Grading
    /// preset is used.
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// Columns to treat as categorical and encode as integer codes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub categorical: Vec<String>,

    /// Standardize numeric columns to zero mean and unit variance
    #[arg(long, default_value = "false")]
    pub scale: bool,

    /// Keep rows whose categorical FIELD is one of the labels: FIELD=label1,label2.
    /// Repeat the flag to combine filters; all must hold.
    #[arg(long = "filter", value_name = "FIELD=LABELS", value_parser = parse_membership)]
    pub filters: Vec<Predicate>,

    /// Keep rows whose numeric FIELD lies in [low, high]: FIELD=low:high.
    /// Bounds compare against stored values (scaled when --scale is set).
    #[arg(long = "range", value_name = "FIELD=LOW:HIGH", value_parser = parse_range)]
    pub ranges: Vec<Predicate>,

    /// Number of trees in the importance forest
    #[arg(long, default_value = "100", value_parser = validate_trees)]
    pub trees: usize,

    /// Maximum depth of each tree (0 = unlimited)
    #[arg(long, default_value = "10")]
    pub max_depth: usize,

    /// Seed for the importance forest; equal seeds give equal rankings
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Absolute correlation above which a pair is reported
    #[arg(long, default_value = "0.30", value_parser = validate_correlation_threshold)]
    pub correlation_threshold: f64,

    /// Maximum number of correlated pairs printed
    #[arg(long, default_value = "10")]
    pub top_pairs: usize,

    /// Write the selected rows to this file (CSV or Parquet, by extension)
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Keep integer codes for categorical columns in the exported file
    #[arg(long, default_value = "false")]
    pub encoded_export: bool,

    /// JSON analysis report path.
    /// Defaults to the input directory with an '_analysis.json' suffix.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Report path, derived from the input when not given
    pub fn report_path(&self) -> PathBuf {
        self.report.clone().unwrap_or_else(|| {
            let parent = self.input.parent().unwrap_or_else(|| Path::new("."));
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            parent.join(format!("{}_analysis.json", stem))
        })
    }

    pub fn prepare_options(&self) -> PrepareOptions {
        if self.drop_columns.is_empty() && self.categorical.is_empty() {
            PrepareOptions::students_grading().with_scale(self.scale)
        } else {
            PrepareOptions::new(
                self.drop_columns.iter().cloned(),
                self.categorical.iter().cloned(),
                self.scale,
            )
        }
    }

    /// Membership filters first, then ranges, each in command-line order
    pub fn predicates(&self) -> Vec<Predicate> {
        self.filters
            .iter()
            .chain(self.ranges.iter())
            .cloned()
            .collect()
    }

    pub fn forest_config(&self) -> ForestConfig {
        ForestConfig {
            n_trees: self.trees,
            max_depth: (self.max_depth > 0).then_some(self.max_depth),
            seed: self.seed,
            ..Default::default()
        }
    }
}

fn split_assignment(s: &str) -> Result<(&str, &str), String> {
    let (field, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' is missing '=': expected FIELD=VALUE", s))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("'{}' has an empty field name", s));
    }
    Ok((field, rest))
}

/// Parser for --filter FIELD=label1,label2
///
/// Only the field name is trimmed; labels are matched exactly as written.
fn parse_membership(s: &str) -> Result<Predicate, String> {
    let (field, rest) = split_assignment(s)?;
    let labels: Vec<&str> = rest.split(',').filter(|l| !l.is_empty()).collect();
    if labels.is_empty() {
        return Err(format!("'{}' lists no labels", s));
    }
    Ok(Predicate::membership(field, labels))
}

/// Parser for --range FIELD=low:high
fn parse_range(s: &str) -> Result<Predicate, String> {
    let (field, rest) = split_assignment(s)?;
    let (low, high) = rest
        .split_once(':')
        .ok_or_else(|| format!("'{}' is missing ':': expected FIELD=LOW:HIGH", s))?;
    let low: f64 = low
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", low))?;
    let high: f64 = high
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", high))?;
    if low.is_nan() || high.is_nan() {
        return Err(format!("'{}' has a NaN bound", s));
    }
    Ok(Predicate::range(field, low, high))
}

/// Validator for trees parameter
fn validate_trees(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;
    if value == 0 {
        Err("trees must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for correlation_threshold parameter
fn validate_correlation_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "correlation_threshold must be between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
