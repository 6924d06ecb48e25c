/// A marker type indicating that a model is **not yet trained**.
///
/// Used as the state parameter of e.g. `RandomForestRegressor<Unfitted>`:
/// - Only configuration and `fit` are available.
/// - Prediction and importances are **not available** until the model is
///   converted to `Fitted`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unfitted;

/// A marker type indicating that a model has been **fully trained**.
///
/// A `Fitted` model implements [`InferenceModel`](super::InferenceModel) and
/// carries only what prediction needs: no bootstrap state or RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fitted;
