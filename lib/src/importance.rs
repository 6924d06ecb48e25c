//! Feature-importance ranking.

use crate::error::PipelineError;
use crate::model::FeatureImportances;
use serde::{Deserialize, Serialize};

/// Importance score of one named feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Pair the model's importance scores with `feature_names` and sort them
/// descending.
///
/// The sort is stable, so equal scores keep their original feature order.
/// A model without native importances yields an empty list.
///
/// # Errors
/// Returns [`PipelineError::Training`] when the model reports a different
/// number of scores than there are feature names.
pub fn rank_importances<M>(
    model: &M,
    feature_names: &[String],
) -> Result<Vec<FeatureImportance>, PipelineError>
where
    M: FeatureImportances + ?Sized,
{
    let Some(scores) = model.feature_importances() else {
        return Ok(Vec::new());
    };

    if scores.len() != feature_names.len() {
        return Err(PipelineError::training(format!(
            "model reports {} importances for {} features",
            scores.len(),
            feature_names.len()
        )));
    }

    let mut ranked: Vec<FeatureImportance> = feature_names
        .iter()
        .zip(scores)
        .map(|(feature, importance)| FeatureImportance {
            feature: feature.clone(),
            importance,
        })
        .collect();

    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    Ok(ranked)
}
