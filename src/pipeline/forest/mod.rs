//! Random forest classifier used for impurity-based feature importance
//!
//! Trees are grown in parallel, each from its own seeded RNG, and collected
//! in tree order so the fitted forest depends only on the configured seed.

mod tree;

pub use tree::{ClassificationTree, TreeConfig};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Column-major feature matrix with dense class labels `0..n_classes`
#[derive(Debug, Clone)]
pub struct TrainingSet {
    feature_names: Vec<String>,
    columns: Vec<Vec<f64>>,
    labels: Vec<usize>,
    n_classes: usize,
}

impl TrainingSet {
    /// Every column must have one value per label.
    pub fn new(feature_names: Vec<String>, columns: Vec<Vec<f64>>, labels: Vec<usize>) -> Self {
        debug_assert_eq!(feature_names.len(), columns.len());
        debug_assert!(columns.iter().all(|c| c.len() == labels.len()));
        let n_classes = labels.iter().max().map(|&m| m + 1).unwrap_or(0);
        Self {
            feature_names,
            columns,
            labels,
            n_classes,
        }
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Feature values of one sample
    pub fn row(&self, index: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c[index]).collect()
    }
}

/// Random Forest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree (None = unlimited)
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Features considered per split (sqrt of total if None)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Random seed; identical seeds give identical forests
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: Some(10),
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Random Forest model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<ClassificationTree>,
    feature_importances: Vec<f64>,
    n_classes: usize,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            feature_importances: Vec::new(),
            n_classes: 0,
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Train the forest. An empty training set leaves the forest without trees.
    pub fn fit(&mut self, data: &TrainingSet) {
        let n_samples = data.n_samples();
        let n_features = data.n_features();
        self.n_classes = data.n_classes();
        self.feature_importances = vec![0.0; n_features];
        self.trees.clear();

        if n_samples == 0 || n_features == 0 {
            return;
        }

        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize)
            .clamp(1, n_features);

        let config = &self.config;
        self.trees = (0..config.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(i as u64));

                let sample: Vec<usize> = if config.bootstrap {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };

                let mut tree = ClassificationTree::new(TreeConfig {
                    max_depth: config.max_depth,
                    min_samples_split: config.min_samples_split,
                    min_samples_leaf: config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: rng.gen(),
                });
                tree.fit(data, &sample);
                tree
            })
            .collect();

        // Mean over trees that split at least once, then renormalized
        let split_trees: Vec<&ClassificationTree> =
            self.trees.iter().filter(|t| t.has_splits()).collect();
        if split_trees.is_empty() {
            return;
        }
        for tree in &split_trees {
            for (acc, &imp) in self
                .feature_importances
                .iter_mut()
                .zip(tree.feature_importances())
            {
                *acc += imp;
            }
        }
        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= sum;
            }
        }
    }

    /// Normalized mean decrease in impurity per feature, in training column order
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Majority vote across trees; ties go to the lowest class
    pub fn predict_one(&self, row: &[f64]) -> usize {
        let mut votes = vec![0usize; self.n_classes.max(1)];
        for tree in &self.trees {
            let class = tree.predict_one(row);
            if let Some(slot) = votes.get_mut(class) {
                *slot += 1;
            }
        }
        let mut best = 0;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[best] {
                best = class;
            }
        }
        best
    }

    pub fn predict(&self, data: &TrainingSet) -> Vec<usize> {
        (0..data.n_samples())
            .into_par_iter()
            .map(|i| self.predict_one(&data.row(i)))
            .collect()
    }

    /// Fraction of samples whose predicted class matches the label
    pub fn accuracy(&self, data: &TrainingSet) -> f64 {
        if data.n_samples() == 0 {
            return 0.0;
        }
        let correct = self
            .predict(data)
            .iter()
            .zip(data.labels())
            .filter(|(pred, label)| pred == label)
            .count();
        correct as f64 / data.n_samples() as f64
    }
}
