//! Feature importance ranking via a seeded random forest

use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use super::dataset::View;
use super::error::{PipelineError, PipelineResult};
use super::forest::{ForestConfig, RandomForest, TrainingSet};
use super::schema::FieldKind;

/// A feature and its importance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Features ranked by importance, highest first.
///
/// Scores are normalized mean decrease in Gini impurity and sum to 1 unless
/// no tree found a useful split, in which case every score is 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceTable {
    pub target: String,
    /// Rows the forest was fitted on
    pub rows: usize,
    /// Distinct target classes present in those rows
    pub classes: usize,
    pub seed: u64,
    pub entries: Vec<FeatureImportance>,
}

impl ImportanceTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.feature == feature)
            .map(|e| e.importance)
    }

    /// The `n` most important features
    pub fn top(&self, n: usize) -> &[FeatureImportance] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn features(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.feature.as_str()).collect()
    }
}

/// Rank every non-target field of a view by how well it predicts `target_field`.
///
/// Runs on whatever view it is given; callers choose between the full
/// dataset and a filtered selection. Equal scores keep dataset column order.
pub fn rank(
    view: &View<'_>,
    target_field: &str,
    config: &ForestConfig,
) -> PipelineResult<ImportanceTable> {
    let schema = view.schema();
    if schema.require(target_field)? != FieldKind::Categorical {
        return Err(PipelineError::schema(format!(
            "Target field '{}' must be categorical",
            target_field
        )));
    }

    let feature_names: Vec<String> = schema
        .names()
        .into_iter()
        .filter(|name| *name != target_field)
        .map(str::to_string)
        .collect();
    if feature_names.is_empty() {
        return Err(PipelineError::insufficient(format!(
            "no feature columns besides target '{}'",
            target_field
        )));
    }

    if view.is_empty() {
        return Err(PipelineError::insufficient(
            "view has 0 rows; cannot rank feature importance",
        ));
    }

    let codes = view.codes(target_field)?;
    let classes: BTreeSet<u32> = codes.iter().copied().collect();
    if classes.len() < 2 {
        return Err(PipelineError::insufficient(format!(
            "found {} distinct value(s) of target '{}'; at least 2 are required",
            classes.len(),
            target_field
        )));
    }

    // Dense labels over the classes present in this view
    let dense: Vec<u32> = classes.iter().copied().collect();
    let labels: Vec<usize> = codes
        .iter()
        .map(|code| dense.binary_search(code).unwrap_or_default())
        .collect();

    let columns = feature_names
        .iter()
        .map(|name| view.values(name))
        .collect::<PipelineResult<Vec<Vec<f64>>>>()?;

    let data = TrainingSet::new(feature_names, columns, labels);
    let mut forest = RandomForest::new(config.clone());
    forest.fit(&data);

    let mut entries: Vec<FeatureImportance> = data
        .feature_names()
        .iter()
        .zip(forest.feature_importances())
        .map(|(feature, &importance)| FeatureImportance {
            feature: feature.clone(),
            importance,
        })
        .collect();

    // Stable sort keeps column order among ties
    entries.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    debug!(
        "Ranked {} feature(s) for '{}' on {} rows, {} classes, {} trees",
        entries.len(),
        target_field,
        view.len(),
        dense.len(),
        forest.n_trees()
    );

    Ok(ImportanceTable {
        target: target_field.to_string(),
        rows: view.len(),
        classes: dense.len(),
        seed: config.seed,
        entries,
    })
}
