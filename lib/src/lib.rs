//! # autoprice
//!
//! Price analytics for vehicle listings: clean raw records, fit a random
//! forest price model, evaluate it on a held-out split and report metrics,
//! feature importances and sample predictions.
//!
//! ## Core Design Principles
//!
//! - **Request-scoped state**: every encoder, imputer, scaler and model is
//!   built inside one [`pipeline::analyze`] call and dropped at its end.
//! - **Stateful Type Safety**: models carry their training state in the type
//!   system (`Unfitted` vs `Fitted`), so an untrained model cannot predict.
//! - **Fit/transform separation**: transformers learn statistics on training
//!   data only and apply them to any data.
//! - **Reproducibility**: the split and the bootstrap sampling are seeded.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autoprice::config::PipelineConfig;
//! use autoprice::dataset::SyntheticGenerator;
//! use autoprice::pipeline::analyze;
//! use autoprice::report::SvgChartRenderer;
//!
//! let records = SyntheticGenerator::new(42, 2024).generate(200);
//! let config = PipelineConfig::default().with_reference_year(2024);
//! let report = analyze(&records, &config, Some(&SvgChartRenderer::new())).unwrap();
//!
//! println!("R² = {:.3}", report.metrics.r2_score);
//! for item in &report.feature_importance {
//!     println!("{:>18} {:.3}", item.feature, item.importance);
//! }
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: raw records, CSV loading, synthetic sample data
//! - `preprocessing`: imputation, encoding, scaling and the vehicle preprocessor
//! - `model`: regression tree and random forest with compile-time state
//! - `trainer`: deterministic split, standardization, fitting, evaluation
//! - `metrics`: R², RMSE, MAE, MAPE
//! - `importance`: ranked feature importances
//! - `report`: summary, sample predictions, charts
//! - `pipeline`: the end-to-end analysis

/// Run configuration.
pub mod config;

/// Raw records, CSV ingestion and synthetic sample data.
pub mod dataset;

/// Error type shared by every stage.
pub mod error;

/// Ranked feature importances.
pub mod importance;

/// Regression metrics.
pub mod metrics;

/// Regression models with compile-time state safety.
pub mod model;

/// End-to-end analysis.
pub mod pipeline;

/// Data preprocessing transformers.
pub mod preprocessing;

/// Report assembly and chart rendering.
pub mod report;

/// Training and evaluation orchestration.
pub mod trainer;

pub use config::PipelineConfig;
pub use dataset::Record;
pub use error::PipelineError;
pub use pipeline::analyze;
pub use report::{AnalysisReport, ChartRenderer, SvgChartRenderer};
