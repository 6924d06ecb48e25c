//! Imputation transformers for handling missing values.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`SimpleImputer`] | Fill NaN cells with the column median |

pub mod simple;

pub use simple::{median, FittedSimpleImputer, SimpleImputer, SimpleImputerParams};
