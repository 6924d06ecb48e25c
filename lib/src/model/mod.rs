//! Regression models with compile-time training state.
//!
//! Models carry their state in a type parameter: `Model<Unfitted>` can only be
//! configured and fitted, `Model<Fitted>` can only predict and report what it
//! learned. See [`Unfitted`] and [`Fitted`].

pub mod forest;
pub mod state;
pub mod tree;

pub use forest::{ForestConfig, RandomForestRegressor};
pub use state::{Fitted, Unfitted};
pub use tree::{RegressionTree, TreeConfig};

/// Prediction interface of a trained model.
pub trait InferenceModel {
    type InputSingle: ?Sized;
    type OutputSingle;
    type InputBatch: ?Sized;
    type OutputBatch;

    fn predict(&self, input: &Self::InputSingle) -> Self::OutputSingle;
    fn predict_batch(&self, input: &Self::InputBatch) -> Self::OutputBatch;
}

/// Per-feature importance scores of a trained model.
///
/// Scores are aligned with the model's input columns. Model families without
/// a native notion of importance return `None`.
pub trait FeatureImportances {
    fn feature_importances(&self) -> Option<Vec<f64>>;
}
