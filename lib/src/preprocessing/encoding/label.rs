//! Label encoding for string categories.
//!
//! Maps category labels to integer indices (0, 1, 2, ...) in lexicographic
//! order of the labels observed during fit.

use crate::error::PipelineError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Label encoder for a single categorical column.
///
/// The mapping is deterministic for a given set of labels (sorted order), so
/// encoding the same batch twice yields the same codes. It is not meant to be
/// stable across batches with different label sets.
///
/// # Example
/// ```ignore
/// use autoprice::preprocessing::{LabelEncoder, Transformer, FittedTransformer};
///
/// let labels = vec!["Petrol".to_string(), "Diesel".to_string(), "Petrol".to_string()];
/// let fitted = LabelEncoder::new().fit(&labels)?;
///
/// // Classes: ["Diesel", "Petrol"] -> codes [1, 0, 1]
/// let encoded = fitted.transform(&labels)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct LabelEncoder;

impl LabelEncoder {
    /// Create a new LabelEncoder.
    pub fn new() -> Self {
        Self
    }
}

/// Serializable parameters for a fitted LabelEncoder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabelEncoderParams {
    /// Unique classes in sorted order.
    pub classes: Vec<String>,
}

impl Transformer for LabelEncoder {
    type Input = [String];
    type Output = Array1<f64>;
    type Params = LabelEncoderParams;
    type Fitted = FittedLabelEncoder;

    fn fit(&self, labels: &[String]) -> Result<FittedLabelEncoder, PipelineError> {
        if labels.is_empty() {
            return Err(PipelineError::EmptyData(
                "Cannot fit LabelEncoder on empty data".to_string(),
            ));
        }

        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        FittedLabelEncoder::from_params(LabelEncoderParams { classes })
    }
}

/// Fitted LabelEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedLabelEncoder {
    /// Unique classes in sorted order.
    classes: Vec<String>,
    /// Mapping from class label to index.
    class_to_idx: HashMap<String, usize>,
}

impl FittedLabelEncoder {
    /// Get the unique classes.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Get the number of classes.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

}

impl FittedTransformer for FittedLabelEncoder {
    type Input = [String];
    type Output = Array1<f64>;
    type Params = LabelEncoderParams;

    fn transform(&self, labels: &[String]) -> Result<Array1<f64>, PipelineError> {
        labels
            .iter()
            .map(|label| {
                self.class_to_idx
                    .get(label)
                    .map(|&idx| idx as f64)
                    .ok_or_else(|| {
                        PipelineError::InvalidParameter(format!("Unknown label: {:?}", label))
                    })
            })
            .collect::<Result<Vec<f64>, _>>()
            .map(Array1::from)
    }

    fn extract_params(&self) -> LabelEncoderParams {
        LabelEncoderParams {
            classes: self.classes.clone(),
        }
    }

    fn from_params(params: LabelEncoderParams) -> Result<Self, PipelineError> {
        let class_to_idx: HashMap<String, usize> = params
            .classes
            .iter()
            .enumerate()
            .map(|(idx, class)| (class.clone(), idx))
            .collect();

        if class_to_idx.len() != params.classes.len() {
            return Err(PipelineError::InvalidParameter(
                "LabelEncoder classes must be unique".to_string(),
            ));
        }

        Ok(FittedLabelEncoder {
            classes: params.classes,
            class_to_idx,
        })
    }

    // One categorical column in, one code column out.
    fn n_features_in(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_label_encoder_sorted_codes() {
        let data = labels(&["Petrol", "Diesel", "CNG", "Diesel"]);
        let fitted = LabelEncoder::new().fit(&data).unwrap();

        assert_eq!(fitted.n_classes(), 3);
        assert_eq!(fitted.classes(), &labels(&["CNG", "Diesel", "Petrol"])[..]);

        let encoded = fitted.transform(&data).unwrap();
        assert_eq!(encoded.to_vec(), vec![2.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_label_encoder_is_deterministic() {
        let data = labels(&["Pune", "Delhi", "Kochi", "Pune"]);
        let a = LabelEncoder::new().fit_transform(&data).unwrap();
        let b = LabelEncoder::new().fit_transform(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_label_encoder_codes_index_classes() {
        let data = labels(&["Manual", "Automatic", "Manual", "Automatic"]);
        let fitted = LabelEncoder::new().fit(&data).unwrap();
        let encoded = fitted.transform(&data).unwrap();

        for (code, label) in encoded.iter().zip(&data) {
            assert_eq!(code.fract(), 0.0);
            assert_eq!(&fitted.classes()[*code as usize], label);
        }
    }

    #[test]
    fn test_label_encoder_unknown_error() {
        let fitted = LabelEncoder::new().fit(&labels(&["First", "Second"])).unwrap();
        let result = fitted.transform(&labels(&["Third"]));
        assert!(matches!(result, Err(PipelineError::InvalidParameter(_))));
    }

    #[test]
    fn test_label_encoder_params_round_trip() {
        let data = labels(&["BMW", "Audi", "Tata"]);
        let fitted = LabelEncoder::new().fit(&data).unwrap();
        let restored = FittedLabelEncoder::from_params(fitted.extract_params()).unwrap();
        assert_eq!(
            fitted.transform(&data).unwrap(),
            restored.transform(&data).unwrap()
        );
    }

    #[test]
    fn test_label_encoder_empty_data() {
        assert!(LabelEncoder::new().fit(&[]).is_err());
    }
}
