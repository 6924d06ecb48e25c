//! Deterministic train/evaluation partition.

use crate::error::PipelineError;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Row indices of the training and evaluation subsets.
///
/// Both lists are in shuffled order; the evaluation order is the order in
/// which predictions are reported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainEvalSplit {
    pub train: Vec<usize>,
    pub eval: Vec<usize>,
}

impl TrainEvalSplit {
    /// Shuffle `0..n_rows` with a seeded `ChaCha8Rng` and hold out the first
    /// `ceil(n_rows * test_fraction)` indices for evaluation.
    ///
    /// # Errors
    /// - [`PipelineError::InvalidParameter`] unless `0 < test_fraction < 1`.
    /// - [`PipelineError::Training`] when fewer than 2 training rows or no
    ///   evaluation row would remain.
    pub fn new(n_rows: usize, test_fraction: f64, seed: u64) -> Result<Self, PipelineError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(PipelineError::InvalidParameter(format!(
                "test_fraction must be in (0, 1), got {}",
                test_fraction
            )));
        }

        // Guards against 15 * 0.2 == 3.0000000000000004.
        let n_eval = ((n_rows as f64 * test_fraction) - 1e-9).ceil().max(0.0) as usize;
        let n_train = n_rows.saturating_sub(n_eval);

        if n_eval == 0 || n_train < 2 {
            return Err(PipelineError::training(format!(
                "need at least 2 training rows and 1 evaluation row, got {} records ({} train / {} eval)",
                n_rows, n_train, n_eval
            )));
        }

        let mut indices: Vec<usize> = (0..n_rows).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let train = indices.split_off(n_eval);
        Ok(Self {
            train,
            eval: indices,
        })
    }

    pub fn train_size(&self) -> usize {
        self.train.len()
    }

    pub fn eval_size(&self) -> usize {
        self.eval.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_sizes() {
        let split = TrainEvalSplit::new(20, 0.2, 42).unwrap();
        assert_eq!(split.eval_size(), 4);
        assert_eq!(split.train_size(), 16);

        let split = TrainEvalSplit::new(15, 0.2, 42).unwrap();
        assert_eq!(split.eval_size(), 3);

        let split = TrainEvalSplit::new(11, 0.2, 42).unwrap();
        assert_eq!(split.eval_size(), 3);
    }

    #[test]
    fn test_split_is_a_partition() {
        let split = TrainEvalSplit::new(37, 0.2, 42).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.eval).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..37).collect::<Vec<_>>());

        let train: HashSet<_> = split.train.iter().collect();
        assert!(split.eval.iter().all(|i| !train.contains(i)));
    }

    #[test]
    fn test_split_is_deterministic() {
        let a = TrainEvalSplit::new(50, 0.2, 42).unwrap();
        let b = TrainEvalSplit::new(50, 0.2, 42).unwrap();
        assert_eq!(a, b);

        let c = TrainEvalSplit::new(50, 0.2, 43).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_split_too_few_rows() {
        for n in [0, 1, 2] {
            let result = TrainEvalSplit::new(n, 0.2, 42);
            assert!(matches!(result, Err(PipelineError::Training(_))), "n = {}", n);
        }
        assert!(TrainEvalSplit::new(3, 0.2, 42).is_ok());
    }

    #[test]
    fn test_split_invalid_fraction() {
        assert!(matches!(
            TrainEvalSplit::new(10, 0.0, 42),
            Err(PipelineError::InvalidParameter(_))
        ));
        assert!(TrainEvalSplit::new(10, 1.0, 42).is_err());
        assert!(TrainEvalSplit::new(10, f64::NAN, 42).is_err());
    }
}
