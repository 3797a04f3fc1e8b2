//! Export of views back to tabular files

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::dataset::View;
use super::encoding::{EncodingRegistry, MISSING_LABEL};
use super::error::PipelineResult;
use super::schema::FieldKind;

/// Materialize a view as a DataFrame.
///
/// With `decode` set, categorical codes are replaced by their original
/// labels and the missing-value label becomes a null cell again.
pub fn view_to_frame(
    view: &View<'_>,
    registry: &EncodingRegistry,
    decode: bool,
) -> PipelineResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(view.schema().len());

    for (field, kind) in view.schema().fields() {
        let column = match kind {
            FieldKind::Numeric => Column::new(field.into(), view.values(field)?),
            FieldKind::Categorical if decode => {
                let encoder = registry.encoder(field)?;
                let labels = view
                    .codes(field)?
                    .into_iter()
                    .map(|code| {
                        encoder
                            .decode(code)
                            .map(|label| (label != MISSING_LABEL).then(|| label.to_string()))
                    })
                    .collect::<PipelineResult<Vec<Option<String>>>>()?;
                Column::new(field.into(), labels)
            }
            FieldKind::Categorical => Column::new(field.into(), view.codes(field)?),
        };
        columns.push(column);
    }

    Ok(DataFrame::new(columns)?)
}

/// Write a view to CSV or Parquet based on the path extension
pub fn export_view(
    view: &View<'_>,
    registry: &EncodingRegistry,
    path: &Path,
    decode: bool,
) -> Result<()> {
    let mut df = view_to_frame(view, registry, decode)?;
    save_dataset(&mut df, path)
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
