//! CART regression tree.
//!
//! Splits minimise the weighted sum of squared errors of the children
//! (variance reduction). Every candidate threshold of every feature is
//! considered; the first best split found wins, so fitting is fully
//! deterministic for a given sample list.
//!
//! The tree also accumulates, per feature, the total impurity decrease of the
//! splits made on it:
//! ```text
//! n_node * impurity - n_left * impurity_left - n_right * impurity_right
//! ```
//! which is the basis of [`RegressionTree::feature_importances`].

use crate::error::PipelineError;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Gains at or below this are treated as "no improvement".
const MIN_GAIN: f64 = 1e-12;

/// Growth limits of a single tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth; `None` grows until leaves are pure or too small.
    pub max_depth: Option<usize>,
    /// Minimum number of samples a node needs to be split.
    pub min_samples_split: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

#[derive(Clone, Debug)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

struct Candidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

struct Pending {
    node: usize,
    samples: Vec<usize>,
    depth: usize,
}

/// A fitted regression tree.
#[derive(Clone, Debug)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    /// Raw impurity decrease per feature.
    impurity_decrease: Vec<f64>,
    depth: usize,
}

impl RegressionTree {
    /// Fit a tree on the rows of `x` listed in `samples`.
    ///
    /// `samples` may contain repeated indices (bootstrap draws); each
    /// occurrence counts as one sample.
    ///
    /// # Errors
    /// Returns [`PipelineError::EmptyData`] for an empty sample list and
    /// [`PipelineError::Training`] when `x` and `y` disagree on the row count
    /// or a sample index is out of range.
    pub fn fit(
        x: &Array2<f64>,
        y: &Array1<f64>,
        samples: &[usize],
        config: &TreeConfig,
    ) -> Result<Self, PipelineError> {
        if samples.is_empty() {
            return Err(PipelineError::EmptyData(
                "Cannot fit a regression tree without samples".to_string(),
            ));
        }
        if x.nrows() != y.len() {
            return Err(PipelineError::training(format!(
                "feature matrix has {} rows but target has {} values",
                x.nrows(),
                y.len()
            )));
        }
        if let Some(&bad) = samples.iter().find(|&&i| i >= y.len()) {
            return Err(PipelineError::training(format!(
                "sample index {} out of range for {} rows",
                bad,
                y.len()
            )));
        }

        let mut nodes = vec![Node::Leaf { value: 0.0 }];
        let mut impurity_decrease = vec![0.0; x.ncols()];
        let mut max_depth = 0;
        let mut stack = vec![Pending {
            node: 0,
            samples: samples.to_vec(),
            depth: 0,
        }];

        while let Some(Pending {
            node,
            samples,
            depth,
        }) = stack.pop()
        {
            max_depth = max_depth.max(depth);

            let can_split = samples.len() >= config.min_samples_split
                && config.max_depth.map_or(true, |limit| depth < limit);
            let split = if can_split {
                best_split(x, y, &samples)
            } else {
                None
            };

            let Some(split) = split else {
                nodes[node] = Node::Leaf {
                    value: mean(y, &samples),
                };
                continue;
            };

            impurity_decrease[split.feature] += split.gain;

            let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
                .into_iter()
                .partition(|&i| x[[i, split.feature]] <= split.threshold);

            let left = nodes.len();
            nodes.push(Node::Leaf { value: 0.0 });
            let right = nodes.len();
            nodes.push(Node::Leaf { value: 0.0 });

            nodes[node] = Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left,
                right,
            };

            stack.push(Pending {
                node: right,
                samples: right_samples,
                depth: depth + 1,
            });
            stack.push(Pending {
                node: left,
                samples: left_samples,
                depth: depth + 1,
            });
        }

        Ok(Self {
            nodes,
            impurity_decrease,
            depth: max_depth,
        })
    }

    /// Predict a single row.
    pub fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Impurity decrease per feature, normalized to sum to 1.
    ///
    /// All zeros when the tree never split.
    pub fn feature_importances(&self) -> Vec<f64> {
        normalize(&self.impurity_decrease)
    }

    pub fn n_features(&self) -> usize {
        self.impurity_decrease.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Scale non-negative scores to sum to 1; all-zero input stays all zeros.
pub(crate) fn normalize(scores: &[f64]) -> Vec<f64> {
    let total: f64 = scores.iter().sum();
    if total > 0.0 {
        scores.iter().map(|s| s / total).collect()
    } else {
        vec![0.0; scores.len()]
    }
}

fn mean(y: &Array1<f64>, samples: &[usize]) -> f64 {
    samples.iter().map(|&i| y[i]).sum::<f64>() / samples.len() as f64
}

fn best_split(x: &Array2<f64>, y: &Array1<f64>, samples: &[usize]) -> Option<Candidate> {
    let first = y[samples[0]];
    if samples.iter().all(|&i| y[i] == first) {
        return None;
    }

    let n = samples.len() as f64;
    let total_sum: f64 = samples.iter().map(|&i| y[i]).sum();
    let total_sq: f64 = samples.iter().map(|&i| y[i] * y[i]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n;

    let mut best: Option<Candidate> = None;
    let mut order = samples.to_vec();

    for feature in 0..x.ncols() {
        order.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 0..order.len() - 1 {
            let yi = y[order[k]];
            left_sum += yi;
            left_sq += yi * yi;

            let current = x[[order[k], feature]];
            let next = x[[order[k + 1], feature]];
            if current == next {
                continue;
            }

            let n_left = (k + 1) as f64;
            let n_right = n - n_left;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse_left = left_sq - left_sum * left_sum / n_left;
            let sse_right = right_sq - right_sum * right_sum / n_right;
            let gain = parent_sse - sse_left - sse_right;

            if gain > best.as_ref().map_or(MIN_GAIN, |b| b.gain) {
                let mut threshold = (current + next) / 2.0;
                // Adjacent floats: the midpoint can round up to `next`.
                if threshold >= next {
                    threshold = current;
                }
                best = Some(Candidate {
                    feature,
                    threshold,
                    gain,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn all_rows(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_tree_learns_step_function() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![1.0, 1.0, 5.0, 5.0];
        let tree = RegressionTree::fit(&x, &y, &all_rows(4), &TreeConfig::default()).unwrap();

        assert!((tree.predict_row(array![1.5].view()) - 1.0).abs() < 1e-12);
        assert!((tree.predict_row(array![3.5].view()) - 5.0).abs() < 1e-12);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_tree_max_depth_zero_is_mean_leaf() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![1.0, 2.0, 3.0, 6.0];
        let config = TreeConfig {
            max_depth: Some(0),
            ..TreeConfig::default()
        };
        let tree = RegressionTree::fit(&x, &y, &all_rows(4), &config).unwrap();

        assert_eq!(tree.n_leaves(), 1);
        assert!((tree.predict_row(array![10.0].view()) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_tree_min_samples_split() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![1.0, 2.0, 3.0];
        let config = TreeConfig {
            min_samples_split: 4,
            ..TreeConfig::default()
        };
        let tree = RegressionTree::fit(&x, &y, &all_rows(3), &config).unwrap();
        assert_eq!(tree.n_leaves(), 1);
    }

    #[test]
    fn test_tree_importance_on_informative_feature() {
        // Feature 0 is constant, feature 1 drives the target.
        let x = array![[7.0, 1.0], [7.0, 2.0], [7.0, 3.0], [7.0, 4.0]];
        let y = array![10.0, 10.0, 20.0, 20.0];
        let tree = RegressionTree::fit(&x, &y, &all_rows(4), &TreeConfig::default()).unwrap();

        let importances = tree.feature_importances();
        assert_eq!(importances.len(), 2);
        assert!(importances[0].abs() < 1e-12);
        assert!((importances[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tree_constant_target_never_splits() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![4.0, 4.0, 4.0];
        let tree = RegressionTree::fit(&x, &y, &all_rows(3), &TreeConfig::default()).unwrap();

        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(tree.feature_importances(), vec![0.0]);
    }

    #[test]
    fn test_tree_handles_repeated_samples() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![1.0, 2.0, 9.0];
        let tree = RegressionTree::fit(&x, &y, &[0, 0, 2, 2], &TreeConfig::default()).unwrap();

        assert!((tree.predict_row(array![1.0].view()) - 1.0).abs() < 1e-12);
        assert!((tree.predict_row(array![3.0].view()) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_tree_fit_errors() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0];
        assert!(RegressionTree::fit(&x, &y, &[], &TreeConfig::default()).is_err());
        assert!(RegressionTree::fit(&x, &y, &[5], &TreeConfig::default()).is_err());

        let short_y = array![1.0];
        assert!(RegressionTree::fit(&x, &short_y, &[0], &TreeConfig::default()).is_err());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(&[1.0, 3.0]), vec![0.25, 0.75]);
        assert_eq!(normalize(&[0.0, 0.0]), vec![0.0, 0.0]);
    }
}
