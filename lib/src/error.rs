//! Error types for the analysis pipeline.

use std::fmt;

/// Error type for every fallible pipeline operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Malformed or missing required input (no records, no target column, bad target value).
    Data(String),
    /// Insufficient or degenerate data for fitting a model.
    Training(String),
    /// Invalid configuration or hyperparameter value.
    InvalidParameter(String),
    /// Empty data provided where non-empty was required.
    EmptyData(String),
    /// Feature dimension mismatch between fit and transform.
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
    /// CSV input could not be read.
    Csv(String),
    /// A chart could not be drawn.
    Chart(String),
}

impl PipelineError {
    /// Shorthand for a [`PipelineError::Data`] error.
    pub fn data(msg: impl Into<String>) -> Self {
        PipelineError::Data(msg.into())
    }

    /// Shorthand for a [`PipelineError::Training`] error.
    pub fn training(msg: impl Into<String>) -> Self {
        PipelineError::Training(msg.into())
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Data(msg) => write!(f, "Data error: {}", msg),
            PipelineError::Training(msg) => write!(f, "Training error: {}", msg),
            PipelineError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            PipelineError::EmptyData(msg) => write!(f, "Empty data: {}", msg),
            PipelineError::FeatureMismatch {
                expected_features,
                got_features,
            } => {
                write!(
                    f,
                    "Feature mismatch: expected {} features, got {}",
                    expected_features, got_features
                )
            }
            PipelineError::Csv(msg) => write!(f, "CSV error: {}", msg),
            PipelineError::Chart(msg) => write!(f, "Chart error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Csv(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_data() {
        let err = PipelineError::data("no records");
        assert_eq!(err.to_string(), "Data error: no records");
    }

    #[test]
    fn test_error_display_training() {
        let err = PipelineError::training("target has zero variance");
        assert!(err.to_string().starts_with("Training error"));
    }

    #[test]
    fn test_error_display_feature_mismatch() {
        let err = PipelineError::FeatureMismatch {
            expected_features: 5,
            got_features: 3,
        };
        assert!(err.to_string().contains("expected 5 features, got 3"));
    }

    #[test]
    fn test_error_from_csv_error() {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader("a,b\n1,2,3\n".as_bytes());
        let result: Result<Vec<csv::StringRecord>, csv::Error> = rdr.records().collect();
        let err: PipelineError = result.unwrap_err().into();
        assert!(matches!(err, PipelineError::Csv(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PipelineError::InvalidParameter("test".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_chart_error_display() {
        let err = PipelineError::Chart("backend closed".to_string());
        assert_eq!(err.to_string(), "Chart error: backend closed");
    }
}
