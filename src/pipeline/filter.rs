//! Filter engine: predicate evaluation producing read-only views

use std::collections::HashSet;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::dataset::{Dataset, View};
use super::encoding::EncodingRegistry;
use super::error::{PipelineError, PipelineResult};
use super::schema::FieldKind;

/// Row predicate over a prepared dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Categorical field whose decoded label is one of `labels`
    Membership { field: String, labels: Vec<String> },
    /// Numeric field within `[low, high]`, inclusive at both ends
    Range { field: String, low: f64, high: f64 },
}

impl Predicate {
    pub fn membership<I, S>(field: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::Membership {
            field: field.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(field: impl Into<String>, low: f64, high: f64) -> Self {
        Predicate::Range {
            field: field.into(),
            low,
            high,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Predicate::Membership { field, .. } | Predicate::Range { field, .. } => field,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Membership { field, labels } => {
                write!(f, "{} in {{{}}}", field, labels.join(", "))
            }
            Predicate::Range { field, low, high } => {
                write!(f, "{} <= {} <= {}", low, field, high)
            }
        }
    }
}

/// A predicate resolved against stored columns
enum RowTest {
    Codes { codes: Vec<u32>, accepted: HashSet<u32> },
    Range { values: Vec<f64>, low: f64, high: f64 },
}

impl RowTest {
    fn accepts(&self, row: usize) -> bool {
        match self {
            RowTest::Codes { codes, accepted } => accepted.contains(&codes[row]),
            RowTest::Range { values, low, high } => {
                let v = values[row];
                *low <= v && v <= *high
            }
        }
    }
}

fn resolve(
    dataset: &Dataset,
    registry: &EncodingRegistry,
    predicate: &Predicate,
) -> PipelineResult<RowTest> {
    let kind = dataset.schema().require(predicate.field())?;

    match predicate {
        Predicate::Membership { field, labels } => {
            if kind != FieldKind::Categorical {
                return Err(PipelineError::schema(format!(
                    "Membership filter requires a categorical field, but '{}' is numeric",
                    field
                )));
            }
            // Labels are translated through the registry; the dataset stores codes
            let accepted = labels
                .iter()
                .map(|label| registry.encode(field, label))
                .collect::<PipelineResult<HashSet<u32>>>()?;
            Ok(RowTest::Codes {
                codes: dataset.codes(field)?,
                accepted,
            })
        }
        Predicate::Range { field, low, high } => {
            if kind != FieldKind::Numeric {
                return Err(PipelineError::schema(format!(
                    "Range filter requires a numeric field, but '{}' is categorical",
                    field
                )));
            }
            Ok(RowTest::Range {
                values: dataset.values(field)?,
                low: *low,
                high: *high,
            })
        }
    }
}

/// Select the rows satisfying every predicate (logical AND).
///
/// An empty predicate list selects all rows; a selection with zero rows is
/// a valid view.
pub fn filter<'a>(
    dataset: &'a Dataset,
    registry: &EncodingRegistry,
    predicates: &[Predicate],
) -> PipelineResult<View<'a>> {
    let tests = predicates
        .iter()
        .map(|p| resolve(dataset, registry, p))
        .collect::<PipelineResult<Vec<RowTest>>>()?;

    let rows: Vec<usize> = (0..dataset.height())
        .filter(|&row| tests.iter().all(|t| t.accepts(row)))
        .collect();

    debug!(
        "Filter with {} predicate(s) kept {}/{} rows",
        predicates.len(),
        rows.len(),
        dataset.height()
    );

    Ok(View::new(dataset, rows))
}
