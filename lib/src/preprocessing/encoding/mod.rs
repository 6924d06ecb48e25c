//! Categorical feature encoding.
//!
//! ## LabelEncoder
//! Maps string categories of one column to integer codes (0, 1, 2, ...) in
//! sorted label order.
//!
//! ```ignore
//! // Input:  ["Petrol", "Diesel", "Petrol"]
//! // Output: [1, 0, 1]
//! ```
//!
//! Missing categories are expected to be replaced by a placeholder label
//! before encoding; the encoder itself only sees strings.

mod label;

pub use label::{FittedLabelEncoder, LabelEncoder, LabelEncoderParams};
