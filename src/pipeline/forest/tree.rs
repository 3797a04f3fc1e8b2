//! Multiclass classification tree with Gini impurity

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::TrainingSet;

/// Smallest impurity decrease accepted as a split
const MIN_DECREASE: f64 = 1e-12;

/// Decision tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of tree (None = grow until pure)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf node
    pub min_samples_leaf: usize,
    /// Maximum features to consider for split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for feature subsampling
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(10),
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        class_counts: Vec<usize>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    decrease: f64,
}

/// Gini impurity of a class histogram
fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

fn majority(counts: &[usize]) -> usize {
    // First maximum wins so ties go to the lowest class
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

/// Classification tree recording impurity-decrease importances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationTree {
    config: TreeConfig,
    root: Option<TreeNode>,
    n_classes: usize,
    feature_importances: Vec<f64>,
}

impl ClassificationTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            n_classes: 0,
            feature_importances: Vec::new(),
        }
    }

    /// Fit on the given sample of row indices (repeats allowed, as in bootstrap samples)
    pub fn fit(&mut self, data: &TrainingSet, sample: &[usize]) {
        self.n_classes = data.n_classes();
        self.feature_importances = vec![0.0; data.n_features()];

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.root = Some(self.build(data, sample.to_vec(), 0, &mut rng));

        let total: f64 = self.feature_importances.iter().sum();
        if total > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= total;
            }
        }
    }

    fn class_counts(&self, data: &TrainingSet, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[data.labels()[i]] += 1;
        }
        counts
    }

    fn build(
        &mut self,
        data: &TrainingSet,
        indices: Vec<usize>,
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let n = indices.len();
        let counts = self.class_counts(data, &indices);
        let impurity = gini(&counts, n);

        let depth_reached = self.config.max_depth.is_some_and(|max| depth >= max);
        if depth_reached || n < self.config.min_samples_split || impurity < MIN_DECREASE {
            return TreeNode::Leaf {
                class_counts: counts,
            };
        }

        let Some(split) = self.find_best_split(data, &indices, &counts, impurity, rng) else {
            return TreeNode::Leaf {
                class_counts: counts,
            };
        };

        self.feature_importances[split.feature] += split.decrease;

        let column = &data.columns()[split.feature];
        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| column[i] <= split.threshold);

        let left = self.build(data, left_idx, depth + 1, rng);
        let right = self.build(data, right_idx, depth + 1, rng);

        TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Scan sorted values of a random feature subset for the largest
    /// weighted impurity decrease.
    fn find_best_split(
        &self,
        data: &TrainingSet,
        indices: &[usize],
        parent_counts: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<BestSplit> {
        let n_features = data.n_features();
        let max_features = self
            .config
            .max_features
            .unwrap_or(n_features)
            .clamp(1, n_features.max(1));

        let mut candidates: Vec<usize> = (0..n_features).collect();
        candidates.shuffle(rng);
        candidates.truncate(max_features);

        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf.max(1);
        let parent_weighted = n as f64 * parent_impurity;
        let mut best: Option<BestSplit> = None;

        for feature in candidates {
            let column = &data.columns()[feature];
            let mut points: Vec<(f64, usize)> = indices
                .iter()
                .map(|&i| (column[i], data.labels()[i]))
                .collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = vec![0usize; self.n_classes];
            let mut right = parent_counts.to_vec();

            for pos in 0..n.saturating_sub(1) {
                let (value, label) = points[pos];
                left[label] += 1;
                right[label] -= 1;

                let next = points[pos + 1].0;
                if next <= value {
                    continue;
                }

                let n_left = pos + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let child_weighted =
                    n_left as f64 * gini(&left, n_left) + n_right as f64 * gini(&right, n_right);
                let decrease = parent_weighted - child_weighted;

                let improves = match &best {
                    Some(b) => decrease > b.decrease,
                    None => decrease > MIN_DECREASE,
                };
                if improves {
                    best = Some(BestSplit {
                        feature,
                        threshold: value + (next - value) / 2.0,
                        decrease,
                    });
                }
            }
        }

        best
    }

    /// Predicted class for one row of feature values
    pub fn predict_one(&self, row: &[f64]) -> usize {
        let mut node = match &self.root {
            Some(node) => node,
            None => return 0,
        };
        loop {
            match node {
                TreeNode::Leaf { class_counts } => return majority(class_counts),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }

    /// Normalized impurity-decrease importances (all zero if the tree never split)
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    pub fn has_splits(&self) -> bool {
        matches!(self.root, Some(TreeNode::Split { .. }))
    }

    pub fn depth(&self) -> usize {
        fn node_depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => 1 + node_depth(left).max(node_depth(right)),
            }
        }
        self.root.as_ref().map(node_depth).unwrap_or(0)
    }
}
