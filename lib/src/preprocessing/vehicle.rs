//! Vehicle-listing feature preprocessor.
//!
//! Turns a batch of raw [`Record`]s into a numeric feature matrix, the raw
//! price target and the ordered feature-name list the model is trained on.
//!
//! Steps, in order:
//! 1. Numeric columns are coerced and their missing cells filled with the
//!    batch median ([`SimpleImputer`]).
//! 2. `Age` is derived as `reference_year - Year`.
//! 3. `Brand` is the first whitespace-delimited token of `Name`.
//! 4. Categorical columns are label-encoded, one fresh [`LabelEncoder`] per
//!    column, with missing values mapped to `"Unknown"`.
//! 5. Columns are laid out in [`columns::FEATURE_ORDER`], keeping only those
//!    present in the batch.

use crate::dataset::{column_present, columns, numeric_value, text_value, Record};
use crate::error::PipelineError;
use crate::preprocessing::encoding::{FittedLabelEncoder, LabelEncoder};
use crate::preprocessing::imputation::{FittedSimpleImputer, SimpleImputer};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use chrono::Datelike;
use ndarray::{Array1, Array2};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Category used for missing categorical values and unnamed vehicles.
pub const UNKNOWN: &str = "Unknown";

/// Output of [`VehiclePreprocessor::prepare`].
#[derive(Clone, Debug)]
pub struct PreparedData {
    /// One row per input record, columns in `feature_names` order.
    pub features: Array2<f64>,
    /// Raw `Price` values, unscaled.
    pub target: Array1<f64>,
    pub feature_names: Vec<String>,
    /// Canonical features that could not be built from this batch.
    pub dropped_features: Vec<String>,
    /// Display name of every record (`"Unknown"` when absent).
    pub names: Vec<String>,
    /// Median imputer fitted on the retained numeric columns, if any.
    pub imputer: Option<FittedSimpleImputer>,
    /// Encoder fitted for each categorical feature, in feature order.
    /// Categorical columns are the tail of the canonical order, so encoders
    /// are pushed in the same order the features are laid out.
    pub encoders: Vec<(String, FittedLabelEncoder)>,
}

impl PreparedData {
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}

/// Cleans raw vehicle records into model-ready features.
#[derive(Clone, Debug)]
pub struct VehiclePreprocessor {
    reference_year: i32,
}

impl Default for VehiclePreprocessor {
    fn default() -> Self {
        Self::new(current_year())
    }
}

/// The current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

impl VehiclePreprocessor {
    /// Create a preprocessor deriving `Age` relative to `reference_year`.
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Preprocess one batch of records.
    ///
    /// # Errors
    /// Returns [`PipelineError::Data`] when the batch is empty, has no `Price`
    /// column, has a row with a missing or non-numeric price, or yields no
    /// feature column at all.
    pub fn prepare(&self, records: &[Record]) -> Result<PreparedData, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::data("no records provided"));
        }
        if !column_present(records, columns::PRICE) {
            return Err(PipelineError::data(format!(
                "no record carries a {} column",
                columns::PRICE
            )));
        }

        let target = extract_target(records)?;
        let mut built: HashMap<&'static str, Vec<f64>> = HashMap::new();

        let imputer = self.build_numeric(records, &mut built)?;

        if let Some(years) = built.get(columns::YEAR) {
            let ages = years
                .iter()
                .map(|&year| self.reference_year as f64 - year)
                .collect();
            built.insert(columns::AGE, ages);
        }

        let encoders = build_categorical(records, &mut built)?;

        let mut feature_names = Vec::new();
        let mut dropped_features = Vec::new();
        let mut ordered = Vec::new();
        for name in columns::FEATURE_ORDER {
            match built.remove(name) {
                Some(values) => {
                    feature_names.push(name.to_string());
                    ordered.push(values);
                }
                None => dropped_features.push(name.to_string()),
            }
        }

        if feature_names.is_empty() {
            return Err(PipelineError::data("no feature columns present in input"));
        }

        let n = records.len();
        let features = Array2::from_shape_fn((n, ordered.len()), |(i, j)| ordered[j][i]);

        let names = records
            .iter()
            .map(|r| text_value(r.get(columns::NAME)).unwrap_or_else(|| UNKNOWN.to_string()))
            .collect();

        debug!(
            rows = n,
            features = feature_names.len(),
            dropped = ?dropped_features,
            "preprocessed records"
        );

        Ok(PreparedData {
            features,
            target,
            feature_names,
            dropped_features,
            names,
            imputer,
            encoders,
        })
    }

    /// Coerce, filter and median-impute the numeric columns present in the batch.
    fn build_numeric(
        &self,
        records: &[Record],
        built: &mut HashMap<&'static str, Vec<f64>>,
    ) -> Result<Option<FittedSimpleImputer>, PipelineError> {
        let mut kept: Vec<(&'static str, Vec<f64>)> = Vec::new();

        for column in columns::NUMERIC {
            if !column_present(records, column) {
                continue;
            }
            let values: Vec<f64> = records
                .iter()
                .map(|r| numeric_value(r.get(column)).unwrap_or(f64::NAN))
                .collect();

            if values.iter().all(|v| v.is_nan()) {
                warn!(column, "numeric column has no usable values; dropping it");
                continue;
            }
            kept.push((column, values));
        }

        if kept.is_empty() {
            return Ok(None);
        }

        let raw = Array2::from_shape_fn((records.len(), kept.len()), |(i, j)| kept[j].1[i]);
        let imputer = SimpleImputer::new().fit(&raw)?;
        let imputed = imputer.transform(&raw)?;

        for (j, (column, _)) in kept.iter().enumerate() {
            built.insert(*column, imputed.column(j).to_vec());
        }
        Ok(Some(imputer))
    }
}

fn extract_target(records: &[Record]) -> Result<Array1<f64>, PipelineError> {
    records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            numeric_value(record.get(columns::PRICE)).ok_or_else(|| {
                PipelineError::data(format!(
                    "record {} has a missing or non-numeric {}",
                    row,
                    columns::PRICE
                ))
            })
        })
        .collect::<Result<Vec<f64>, _>>()
        .map(Array1::from)
}

/// First whitespace-delimited token of the vehicle name.
pub fn brand_of(name: Option<&str>) -> String {
    name.and_then(|n| n.split_whitespace().next())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn build_categorical(
    records: &[Record],
    built: &mut HashMap<&'static str, Vec<f64>>,
) -> Result<Vec<(String, FittedLabelEncoder)>, PipelineError> {
    let mut encoders = Vec::new();

    for column in columns::CATEGORICAL {
        let labels: Vec<String> = if column == columns::BRAND {
            if !column_present(records, columns::NAME) {
                continue;
            }
            records
                .iter()
                .map(|r| brand_of(text_value(r.get(columns::NAME)).as_deref()))
                .collect()
        } else {
            if !column_present(records, column) {
                continue;
            }
            records
                .iter()
                .map(|r| text_value(r.get(column)).unwrap_or_else(|| UNKNOWN.to_string()))
                .collect()
        };

        let encoder = LabelEncoder::new().fit(&labels)?;
        let codes = encoder.transform(&labels)?;
        debug!(column, classes = encoder.n_classes(), "encoded categorical column");

        built.insert(column, codes.to_vec());
        encoders.push((column.to_string(), encoder));
    }

    Ok(encoders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    fn full_records() -> Vec<Record> {
        vec![
            record(json!({
                "Name": "Maruti Swift VDI", "Location": "Pune", "Year": 2015,
                "Kilometers_Driven": 41000, "Fuel_Type": "Diesel", "Transmission": "Manual",
                "Owner_Type": "First", "Mileage": 19.67, "Engine": 1582, "Power": 126.2,
                "Seats": 5, "Price": 12.5
            })),
            record(json!({
                "Name": "Honda Jazz V", "Location": "Chennai", "Year": "2011",
                "Kilometers_Driven": 46000, "Fuel_Type": "Petrol", "Transmission": "Manual",
                "Owner_Type": "First", "Mileage": "n/a", "Engine": 1199, "Power": 88.7,
                "Seats": 5, "Price": "4.5"
            })),
            record(json!({
                "Name": "Audi A4 2.0 TDI", "Location": "Coimbatore", "Year": 2013,
                "Kilometers_Driven": 40670, "Fuel_Type": "Diesel", "Transmission": "Automatic",
                "Owner_Type": "Second", "Mileage": 15.2, "Engine": 1968, "Power": 140.8,
                "Seats": null, "Price": 17.74
            })),
        ]
    }

    fn column(data: &PreparedData, name: &str) -> Vec<f64> {
        let j = data.feature_names.iter().position(|f| f == name).unwrap();
        data.features.column(j).to_vec()
    }

    #[test]
    fn test_prepare_full_schema() {
        let records = full_records();
        let data = VehiclePreprocessor::new(2024).prepare(&records).unwrap();

        assert_eq!(data.n_rows(), 3);
        assert_eq!(data.feature_names, columns::FEATURE_ORDER.map(String::from).to_vec());
        assert!(data.dropped_features.is_empty());
        assert_eq!(data.target.to_vec(), vec![12.5, 4.5, 17.74]);
        assert_eq!(data.names[1], "Honda Jazz V");
    }

    #[test]
    fn test_missing_numeric_imputed_with_median() {
        let data = VehiclePreprocessor::new(2024).prepare(&full_records()).unwrap();

        // Mileage: median of [19.67, 15.2]
        let mileage = column(&data, columns::MILEAGE);
        assert!((mileage[1] - (19.67 + 15.2) / 2.0).abs() < 1e-12);

        let seats = column(&data, columns::SEATS);
        assert!((seats[2] - 5.0).abs() < 1e-12);
        assert!(data.features.iter().all(|v| v.is_finite()));

        let medians = data.imputer.as_ref().unwrap().extract_params().medians;
        assert_eq!(medians.len(), columns::NUMERIC.len());
    }

    #[test]
    fn test_age_and_brand_derivation() {
        let data = VehiclePreprocessor::new(2024).prepare(&full_records()).unwrap();

        assert_eq!(column(&data, columns::AGE), vec![9.0, 13.0, 11.0]);

        // Brands sorted: Audi=0, Honda=1, Maruti=2
        assert_eq!(column(&data, columns::BRAND), vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_negative_age_passes_through() {
        let records = vec![
            record(json!({"Year": 2030, "Price": 3.0})),
            record(json!({"Year": 2020, "Price": 4.0})),
        ];
        let data = VehiclePreprocessor::new(2024).prepare(&records).unwrap();
        assert_eq!(column(&data, columns::AGE), vec![-6.0, 4.0]);
    }

    #[test]
    fn test_categorical_codes_are_lexicographic() {
        let data = VehiclePreprocessor::new(2024).prepare(&full_records()).unwrap();

        // Chennai=0, Coimbatore=1, Pune=2
        assert_eq!(column(&data, columns::LOCATION), vec![2.0, 0.0, 1.0]);
        // Automatic=0, Manual=1
        assert_eq!(column(&data, columns::TRANSMISSION), vec![1.0, 1.0, 0.0]);

        let (name, encoder) = &data.encoders[0];
        assert_eq!(name, columns::FUEL_TYPE);
        assert_eq!(encoder.classes(), &["Diesel".to_string(), "Petrol".to_string()]);
    }

    #[test]
    fn test_missing_category_and_name_become_unknown() {
        let records = vec![
            record(json!({"Name": "  ", "Fuel_Type": "Petrol", "Price": 3.0})),
            record(json!({"Name": "Tata Nexon XZ", "Price": 4.0})),
        ];
        let data = VehiclePreprocessor::new(2024).prepare(&records).unwrap();

        let fuel = &data.encoders[0].1;
        assert_eq!(fuel.classes(), &["Petrol".to_string(), UNKNOWN.to_string()]);

        let brand = &data.encoders[1].1;
        assert_eq!(brand.classes(), &["Tata".to_string(), UNKNOWN.to_string()]);
        assert_eq!(data.names[0], UNKNOWN);
    }

    #[test]
    fn test_absent_columns_are_dropped() {
        let records = vec![
            record(json!({"Kilometers_Driven": 1000, "Fuel_Type": "CNG", "Price": 3.0})),
            record(json!({"Kilometers_Driven": 2000, "Fuel_Type": "Petrol", "Price": 4.0})),
        ];
        let data = VehiclePreprocessor::new(2024).prepare(&records).unwrap();

        assert_eq!(data.feature_names, vec!["Kilometers_Driven", "Fuel_Type"]);
        assert_eq!(data.features.dim(), (2, 2));
        assert!(data.dropped_features.contains(&columns::YEAR.to_string()));
        assert!(data.dropped_features.contains(&columns::AGE.to_string()));
        assert!(data.dropped_features.contains(&columns::BRAND.to_string()));
        assert_eq!(data.dropped_features.len(), 10);
    }

    #[test]
    fn test_all_missing_numeric_column_is_dropped() {
        let records = vec![
            record(json!({"Year": null, "Power": 80, "Price": 3.0})),
            record(json!({"Year": "unknown", "Power": 90, "Price": 4.0})),
        ];
        let data = VehiclePreprocessor::new(2024).prepare(&records).unwrap();

        assert_eq!(data.feature_names, vec!["Power"]);
        assert!(data.dropped_features.contains(&"Year".to_string()));
        assert!(data.dropped_features.contains(&"Age".to_string()));
    }

    #[test]
    fn test_prepare_is_deterministic() {
        let records = full_records();
        let pre = VehiclePreprocessor::new(2024);
        let a = pre.prepare(&records).unwrap();
        let b = pre.prepare(&records).unwrap();
        assert_eq!(a.features, b.features);
        assert_eq!(a.feature_names, b.feature_names);
    }

    #[test]
    fn test_empty_records_error() {
        let result = VehiclePreprocessor::new(2024).prepare(&[]);
        assert!(matches!(result, Err(PipelineError::Data(_))));
    }

    #[test]
    fn test_missing_price_column_error() {
        let records = vec![record(json!({"Year": 2015}))];
        let result = VehiclePreprocessor::new(2024).prepare(&records);
        assert!(matches!(result, Err(PipelineError::Data(msg)) if msg.contains("Price")));
    }

    #[test]
    fn test_bad_price_reports_row() {
        let records = vec![
            record(json!({"Year": 2015, "Price": 3.0})),
            record(json!({"Year": 2016, "Price": "call me"})),
        ];
        let result = VehiclePreprocessor::new(2024).prepare(&records);
        assert!(matches!(result, Err(PipelineError::Data(msg)) if msg.contains("record 1")));
    }

    #[test]
    fn test_no_features_error() {
        let records = vec![record(json!({"Price": 3.0, "Colour": "red"}))];
        let result = VehiclePreprocessor::new(2024).prepare(&records);
        assert!(matches!(result, Err(PipelineError::Data(_))));
    }

    #[test]
    fn test_brand_of() {
        assert_eq!(brand_of(Some("Mahindra Scorpio S10")), "Mahindra");
        assert_eq!(brand_of(Some("   ")), UNKNOWN);
        assert_eq!(brand_of(None), UNKNOWN);
    }
}
