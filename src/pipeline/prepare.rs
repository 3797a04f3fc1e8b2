//! Dataset preparation: column dropping, categorical encoding, scaling

use log::{debug, warn};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::encoding::{column_to_labels, EncodingRegistry, LabelEncoder, MISSING_LABEL};
use super::error::{PipelineError, PipelineResult};
use super::schema::{FieldKind, Schema};
use super::stats::is_constant;

/// Identifier and free-text columns of the students grading dataset
pub const STUDENT_IDENTIFIER_FIELDS: [&str; 4] = ["Student_ID", "First_Name", "Last_Name", "Email"];

/// Categorical columns of the students grading dataset
pub const STUDENT_CATEGORICAL_FIELDS: [&str; 7] = [
    "Gender",
    "Department",
    "Grade",
    "Extracurricular_Activities",
    "Internet_Access_at_Home",
    "Parent_Education_Level",
    "Family_Income_Level",
];

/// Outcome column of the students grading dataset
pub const STUDENT_TARGET_FIELD: &str = "Grade";

/// Options controlling how raw records become a [`Dataset`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrepareOptions {
    /// Columns removed before analysis (identifiers, names, free text)
    pub drop_fields: Vec<String>,
    /// Columns encoded to integer codes; every other kept column must be numeric
    pub categorical_fields: Vec<String>,
    /// Standardize numeric columns to zero mean and unit variance
    pub scale: bool,
}

impl PrepareOptions {
    pub fn new<D, C>(drop_fields: D, categorical_fields: C, scale: bool) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            drop_fields: drop_fields.into_iter().map(Into::into).collect(),
            categorical_fields: categorical_fields.into_iter().map(Into::into).collect(),
            scale,
        }
    }

    /// Layout of the students grading dataset
    pub fn students_grading() -> Self {
        Self::new(STUDENT_IDENTIFIER_FIELDS, STUDENT_CATEGORICAL_FIELDS, false)
    }

    pub fn with_scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    fn drops(&self, name: &str) -> bool {
        self.drop_fields.iter().any(|f| f == name)
    }

    fn is_categorical(&self, name: &str) -> bool {
        self.categorical_fields.iter().any(|f| f == name)
    }
}

/// Prepare raw records for analysis.
///
/// Drops `drop_fields`, fits one encoder per categorical field on the full
/// column, and optionally standardizes every numeric field. The returned
/// registry is the only way to translate codes back to labels.
pub fn prepare(
    raw: &DataFrame,
    options: &PrepareOptions,
) -> PipelineResult<(Dataset, EncodingRegistry)> {
    for field in &options.categorical_fields {
        if options.drops(field) {
            return Err(PipelineError::schema(format!(
                "Field '{}' is both dropped and declared categorical",
                field
            )));
        }
        if raw.column(field).is_err() {
            return Err(PipelineError::schema(format!(
                "Categorical field '{}' not found in input. Available columns: {:?}",
                field,
                raw.get_column_names()
            )));
        }
    }

    if options.scale && raw.height() == 0 {
        return Err(PipelineError::insufficient(
            "cannot standardize a dataset with 0 rows",
        ));
    }

    let mut schema = Schema::new();
    let mut registry = EncodingRegistry::default();
    let mut columns: Vec<Column> = Vec::with_capacity(raw.width());

    for col in raw.get_columns() {
        let name = col.name().to_string();

        if options.drops(&name) {
            debug!("Dropping field '{}'", name);
            continue;
        }

        if options.is_categorical(&name) {
            let (encoder, codes) = encode_column(&name, col)?;
            debug!("Encoded '{}' with {} label(s)", name, encoder.len());
            columns.push(Column::new(name.as_str().into(), codes));
            registry.insert(encoder);
            schema.push(name, FieldKind::Categorical)?;
        } else if col.dtype().is_primitive_numeric() {
            let mut values = numeric_values(&name, col, options.scale)?;
            if options.scale {
                standardize(&name, &mut values)?;
            }
            columns.push(Column::new(name.as_str().into(), values));
            schema.push(name, FieldKind::Numeric)?;
        } else {
            return Err(PipelineError::schema(format!(
                "Field '{}' has non-numeric type {} and is neither dropped nor declared categorical",
                name,
                col.dtype()
            )));
        }
    }

    if schema.is_empty() {
        return Err(PipelineError::schema("No fields remain after dropping"));
    }

    let frame = DataFrame::new(columns)?;
    debug!(
        "Prepared dataset: {} rows, {} numeric, {} categorical",
        frame.height(),
        schema.numeric_fields().len(),
        schema.categorical_fields().len()
    );

    Ok((Dataset::new(frame, schema), registry))
}

/// Fit an encoder on a raw column and replace its values with codes
fn encode_column(name: &str, col: &Column) -> PipelineResult<(LabelEncoder, Vec<u32>)> {
    let raw = column_to_labels(col)?;
    if raw.iter().flatten().any(|label| label == MISSING_LABEL) {
        return Err(PipelineError::schema(format!(
            "Categorical field '{}' contains the reserved label '{}'",
            name, MISSING_LABEL
        )));
    }

    let labels: Vec<String> = raw
        .into_iter()
        .map(|v| v.unwrap_or_else(|| MISSING_LABEL.to_string()))
        .collect();

    let encoder = LabelEncoder::fit(name, &labels);
    let codes = labels
        .iter()
        .map(|label| encoder.encode(label))
        .collect::<PipelineResult<Vec<u32>>>()?;

    Ok((encoder, codes))
}

/// Read a numeric column as f64, imputing missing cells with the column mean
fn numeric_values(name: &str, col: &Column, scale: bool) -> PipelineResult<Vec<f64>> {
    let cast = col.cast(&DataType::Float64)?;
    let raw: Vec<Option<f64>> = cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();

    let present: Vec<f64> = raw.iter().flatten().copied().collect();
    let missing = raw.len() - present.len();

    if missing == 0 {
        return Ok(present);
    }

    if present.is_empty() {
        return Err(if scale {
            PipelineError::DegenerateColumn {
                field: name.to_string(),
            }
        } else {
            PipelineError::schema(format!(
                "Numeric field '{}' has no values to impute from",
                name
            ))
        });
    }

    let mean = present.iter().sum::<f64>() / present.len() as f64;
    warn!(
        "Imputed {} missing value(s) in '{}' with column mean {:.4}",
        missing, name, mean
    );

    Ok(raw.into_iter().map(|v| v.unwrap_or(mean)).collect())
}

/// Standardize in place using the population standard deviation
fn standardize(name: &str, values: &mut [f64]) -> PipelineResult<()> {
    if is_constant(values) {
        return Err(PipelineError::DegenerateColumn {
            field: name.to_string(),
        });
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    if std.is_nan() || std <= 0.0 {
        return Err(PipelineError::DegenerateColumn {
            field: name.to_string(),
        });
    }

    for v in values.iter_mut() {
        *v = (*v - mean) / std;
    }

    Ok(())
}
