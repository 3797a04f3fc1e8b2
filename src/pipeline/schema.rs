//! Explicit field schema for prepared datasets

use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};

/// Kind of an analysed field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Continuous or ordinal values stored as Float64
    Numeric,
    /// Finite label set stored as integer codes
    Categorical,
}

/// Ordered mapping from field name to kind.
///
/// Column order is the order of the prepared dataset, which is also the
/// tie-breaking order used when ranking feature importance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<(String, FieldKind)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, rejecting duplicates
    pub fn push(&mut self, name: impl Into<String>, kind: FieldKind) -> PipelineResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(PipelineError::schema(format!(
                "Field '{}' declared more than once",
                name
            )));
        }
        self.fields.push((name, kind));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    pub fn kind(&self, name: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, kind)| *kind)
    }

    /// Look up a field's kind, failing with a schema error if it is absent
    pub fn require(&self, name: &str) -> PipelineResult<FieldKind> {
        self.kind(name).ok_or_else(|| {
            PipelineError::schema(format!(
                "Field '{}' not found. Available fields: {:?}",
                name,
                self.names()
            ))
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(n, k)| (n.as_str(), *k))
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn numeric_fields(&self) -> Vec<&str> {
        self.names_of_kind(FieldKind::Numeric)
    }

    pub fn categorical_fields(&self) -> Vec<&str> {
        self.names_of_kind(FieldKind::Categorical)
    }

    fn names_of_kind(&self, kind: FieldKind) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(n, _)| n.as_str())
            .collect()
    }
}
