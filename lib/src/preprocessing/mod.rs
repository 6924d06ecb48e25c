//! Data preprocessing transformers.
//!
//! Transformers follow a fit/transform split: an unfitted [`Transformer`]
//! carries only hyperparameters, and `fit` produces a [`FittedTransformer`]
//! holding the learned statistics. Every analysis run fits its own
//! transformers; nothing is persisted.
//!
//! # Core Traits
//!
//! - [`Transformer`]: Unfitted transformer with hyperparameters
//! - [`FittedTransformer`]: Fitted transformer ready for inference
//!
//! # Available Transformers
//!
//! - [`SimpleImputer`]: Fill missing (NaN) values with the column median
//! - [`LabelEncoder`]: Map category strings to integer codes
//! - [`StandardScaler`]: Z-score normalization
//!
//! The [`VehiclePreprocessor`] composes them into the cleaning step for raw
//! vehicle records.
//!
//! # Example
//!
//! ```ignore
//! use autoprice::preprocessing::{VehiclePreprocessor, StandardScaler, Transformer, FittedTransformer};
//!
//! let prepared = VehiclePreprocessor::new(2024).prepare(&records)?;
//! let scaler = StandardScaler::new().fit(&prepared.features)?;
//! let scaled = scaler.transform(&prepared.features)?;
//! ```

pub mod encoding;
pub mod imputation;
pub mod scaling;
pub mod traits;
pub mod vehicle;

// Re-export main types
pub use encoding::{FittedLabelEncoder, LabelEncoder, LabelEncoderParams};
pub use imputation::{FittedSimpleImputer, SimpleImputer, SimpleImputerParams};
pub use scaling::{FittedStandardScaler, StandardScaler, StandardScalerParams};
pub use traits::{FittedTransformer, Transformer};
pub use vehicle::{current_year, PreparedData, VehiclePreprocessor};
