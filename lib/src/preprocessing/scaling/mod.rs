//! Scaling transformers for feature normalization.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`StandardScaler`] | Z-score normalization (mean=0, std=1), population std |
//!
//! # Example
//!
//! ```ignore
//! use autoprice::preprocessing::scaling::StandardScaler;
//! use autoprice::preprocessing::Transformer;
//!
//! let fitted = StandardScaler::new().fit(&x_train)?;
//! let scaled = fitted.transform(&x_eval)?;
//! ```

pub mod standard;

pub use standard::{FittedStandardScaler, StandardScaler, StandardScalerParams};
