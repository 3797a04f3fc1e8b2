//! Prepared datasets and read-only filtered views

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};
use super::schema::{FieldKind, Schema};

/// Encoded, optionally standardized dataset.
///
/// Numeric fields are stored as Float64 and categorical fields as UInt32
/// codes. Immutable once built by [`prepare`](super::prepare).
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    schema: Schema,
}

impl Dataset {
    pub(crate) fn new(frame: DataFrame, schema: Schema) -> Self {
        Self { frame, schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Whole column as f64 (categorical codes are widened)
    pub fn values(&self, field: &str) -> PipelineResult<Vec<f64>> {
        self.schema.require(field)?;
        let col = self.frame.column(field)?.cast(&DataType::Float64)?;
        let values = col
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(values)
    }

    /// Whole column of categorical codes
    pub fn codes(&self, field: &str) -> PipelineResult<Vec<u32>> {
        if self.schema.require(field)? != FieldKind::Categorical {
            return Err(PipelineError::schema(format!(
                "Field '{}' is numeric, not categorical",
                field
            )));
        }
        let col = self.frame.column(field)?.cast(&DataType::UInt32)?;
        let codes = col.u32()?.into_no_null_iter().collect();
        Ok(codes)
    }

    /// View over every row
    pub fn view(&self) -> View<'_> {
        View::new(self, (0..self.height()).collect())
    }
}

/// Read-only selection of dataset rows.
///
/// Holds row indices into the shared dataset; creating or dropping a view
/// never touches the underlying data.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> View<'a> {
    pub(crate) fn new(dataset: &'a Dataset, rows: Vec<usize>) -> Self {
        Self { dataset, rows }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn schema(&self) -> &'a Schema {
        self.dataset.schema()
    }

    /// Indices of the selected rows in dataset order
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn values(&self, field: &str) -> PipelineResult<Vec<f64>> {
        let all = self.dataset.values(field)?;
        Ok(self.rows.iter().map(|&r| all[r]).collect())
    }

    pub fn codes(&self, field: &str) -> PipelineResult<Vec<u32>> {
        let all = self.dataset.codes(field)?;
        Ok(self.rows.iter().map(|&r| all[r]).collect())
    }
}
