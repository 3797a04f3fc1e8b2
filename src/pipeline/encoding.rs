//! Encoding registry: bijective label <-> code mapping per categorical field
//!
//! Codes are assigned in sorted label order, so the same label set always
//! produces the same codes. The registry is fitted once on the full,
//! unfiltered dataset during preparation and is read-only afterwards;
//! re-fitting on a filtered subset would silently renumber labels.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use polars::prelude::*;
use serde::Serialize;

use super::error::{PipelineError, PipelineResult};

/// Label used for null cells in categorical columns
pub const MISSING_LABEL: &str = "<missing>";

/// Label <-> code bijection for a single categorical field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelEncoder {
    field: String,
    /// Labels indexed by code
    labels: Vec<String>,
    #[serde(skip)]
    codes: HashMap<String, u32>,
}

impl LabelEncoder {
    /// Fit an encoder on every label observed for a field.
    ///
    /// Duplicates are collapsed and codes follow sorted label order.
    pub fn fit<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        let labels: Vec<String> = unique.into_iter().collect();
        let codes = labels
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code as u32))
            .collect();

        Self {
            field: field.into(),
            labels,
            codes,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Number of distinct labels (`k`); valid codes are `[0, k)`
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in code order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn encode(&self, label: &str) -> PipelineResult<u32> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| PipelineError::UnknownLabel {
                field: self.field.clone(),
                label: label.to_string(),
            })
    }

    pub fn decode(&self, code: u32) -> PipelineResult<&str> {
        self.labels
            .get(code as usize)
            .map(|s| s.as_str())
            .ok_or_else(|| PipelineError::UnknownCode {
                field: self.field.clone(),
                code,
            })
    }
}

/// Frozen set of encoders, one per categorical field
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EncodingRegistry {
    encoders: BTreeMap<String, LabelEncoder>,
}

impl EncodingRegistry {
    /// Only preparation registers encoders; the registry is frozen afterwards.
    pub(crate) fn insert(&mut self, encoder: LabelEncoder) {
        self.encoders.insert(encoder.field.clone(), encoder);
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(|k| k.as_str())
    }

    pub fn get(&self, field: &str) -> Option<&LabelEncoder> {
        self.encoders.get(field)
    }

    /// Encoder for a field, failing with a schema error if the field is not categorical
    pub fn encoder(&self, field: &str) -> PipelineResult<&LabelEncoder> {
        self.encoders.get(field).ok_or_else(|| {
            PipelineError::schema(format!("Field '{}' has no categorical encoding", field))
        })
    }

    pub fn encode(&self, field: &str, label: &str) -> PipelineResult<u32> {
        self.encoder(field)?.encode(label)
    }

    pub fn decode(&self, field: &str, code: u32) -> PipelineResult<&str> {
        self.encoder(field)?.decode(code)
    }
}

/// Read a column of any dtype as optional labels
pub(crate) fn column_to_labels(col: &Column) -> PipelineResult<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}
