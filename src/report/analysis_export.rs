//! JSON export of a complete analysis run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    CorrelatedPair, CorrelationMatrix, EncodingRegistry, ForestConfig, ImportanceTable, Predicate,
    Schema, ViewSummary,
};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct AnalysisMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    pub version: String,
    pub input_file: String,
    pub target_column: String,
    pub scaled: bool,
    pub filters: Vec<Predicate>,
    pub forest: ForestConfig,
    pub correlation_threshold: f64,
}

/// Complete analysis export
#[derive(Serialize)]
pub struct AnalysisExport<'a> {
    pub metadata: AnalysisMetadata,
    pub schema: &'a Schema,
    pub summary: &'a ViewSummary,
    /// Absent when the view could not support a ranking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<&'a ImportanceTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<&'a CorrelationMatrix>,
    pub correlated_pairs: Vec<CorrelatedPair>,
    pub encodings: &'a EncodingRegistry,
}

/// Inputs of the run recorded in the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub target_column: &'a str,
    pub scaled: bool,
    pub filters: &'a [Predicate],
    pub forest: &'a ForestConfig,
    pub correlation_threshold: f64,
}

/// Results of the run to export
pub struct AnalysisResults<'a> {
    pub schema: &'a Schema,
    pub summary: &'a ViewSummary,
    pub importance: Option<&'a ImportanceTable>,
    pub correlation: Option<&'a CorrelationMatrix>,
    pub encodings: &'a EncodingRegistry,
}

/// Build the export structure without writing it
pub fn build_analysis<'a>(
    results: &AnalysisResults<'a>,
    params: &ExportParams<'_>,
) -> AnalysisExport<'a> {
    let correlated_pairs = results
        .correlation
        .map(|m| m.strongest_pairs(params.correlation_threshold))
        .unwrap_or_default();

    AnalysisExport {
        metadata: AnalysisMetadata {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            target_column: params.target_column.to_string(),
            scaled: params.scaled,
            filters: params.filters.to_vec(),
            forest: params.forest.clone(),
            correlation_threshold: params.correlation_threshold,
        },
        schema: results.schema,
        summary: results.summary,
        importance: results.importance,
        correlation: results.correlation,
        correlated_pairs,
        encodings: results.encodings,
    }
}

/// Export analysis results to a JSON file
pub fn export_analysis(
    results: &AnalysisResults<'_>,
    output_path: &Path,
    params: &ExportParams<'_>,
) -> Result<()> {
    let export = build_analysis(results, params);

    let json =
        serde_json::to_string_pretty(&export).context("Failed to serialize analysis to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write analysis to {}", output_path.display()))?;

    Ok(())
}
