//! Descriptive statistics over views

use serde::Serialize;

use super::dataset::View;
use super::encoding::EncodingRegistry;
use super::error::PipelineResult;
use super::schema::FieldKind;

/// True when every value equals the first one (including empty input)
pub(crate) fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

/// Summary of a numeric field. Statistics are `None` on an empty view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub field: String,
    pub mean: Option<f64>,
    /// Population standard deviation
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    fn from_values(field: &str, values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                field: field.to_string(),
                mean: None,
                std: None,
                min: None,
                max: None,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            field: field.to_string(),
            mean: Some(mean),
            std: Some(variance.sqrt()),
            min: Some(min),
            max: Some(max),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Per-label counts of a categorical field, in code order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub field: String,
    /// Every registered label, including those absent from the view
    pub counts: Vec<LabelCount>,
}

impl CategoricalSummary {
    /// Number of labels present in the view
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|c| c.count > 0).count()
    }

    pub fn count(&self, label: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.count)
    }
}

/// Row count and per-field summaries of a view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSummary {
    pub rows: usize,
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<CategoricalSummary>,
}

impl ViewSummary {
    pub fn numeric(&self, field: &str) -> Option<&NumericSummary> {
        self.numeric.iter().find(|s| s.field == field)
    }

    pub fn categorical(&self, field: &str) -> Option<&CategoricalSummary> {
        self.categorical.iter().find(|s| s.field == field)
    }

    /// Mean of a numeric field, if present and the view is non-empty
    pub fn mean(&self, field: &str) -> Option<f64> {
        self.numeric(field).and_then(|s| s.mean)
    }
}

/// Summarize a view for presentation
pub fn describe(view: &View<'_>, registry: &EncodingRegistry) -> PipelineResult<ViewSummary> {
    let mut numeric = Vec::new();
    let mut categorical = Vec::new();

    for (field, kind) in view.schema().fields() {
        match kind {
            FieldKind::Numeric => {
                let values = view.values(field)?;
                numeric.push(NumericSummary::from_values(field, &values));
            }
            FieldKind::Categorical => {
                let encoder = registry.encoder(field)?;
                let mut tally = vec![0usize; encoder.len()];
                for code in view.codes(field)? {
                    // Stored codes come from this encoder, so they index in range
                    if let Some(slot) = tally.get_mut(code as usize) {
                        *slot += 1;
                    }
                }
                let counts = encoder
                    .labels()
                    .iter()
                    .zip(tally)
                    .map(|(label, count)| LabelCount {
                        label: label.clone(),
                        count,
                    })
                    .collect();
                categorical.push(CategoricalSummary {
                    field: field.to_string(),
                    counts,
                });
            }
        }
    }

    Ok(ViewSummary {
        rows: view.len(),
        numeric,
        categorical,
    })
}
