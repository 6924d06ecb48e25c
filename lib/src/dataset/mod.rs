//! Raw vehicle-listing records and the column vocabulary shared by the pipeline.
//!
//! A [`Record`] is a loosely typed JSON object, exactly as it arrives from a
//! client upload: numeric fields may be numbers, numeric strings, junk strings
//! or missing altogether. Typed access goes through [`numeric_value`] and
//! [`text_value`], which implement the coercion rules used by the
//! preprocessor.
//!
//! # Example
//!
//! ```rust
//! use autoprice::dataset::{numeric_value, columns, Record};
//! use serde_json::json;
//!
//! let record: Record = serde_json::from_value(json!({
//!     "Name": "Maruti Swift Dzire VDI",
//!     "Year": "2015",
//!     "Mileage": "n/a",
//! })).unwrap();
//!
//! assert_eq!(numeric_value(record.get(columns::YEAR)), Some(2015.0));
//! assert_eq!(numeric_value(record.get(columns::MILEAGE)), None);
//! ```

use serde_json::Value;

pub mod loader;
pub mod synthetic;

pub use self::loader::{read_records, read_records_from_path};
pub use self::synthetic::SyntheticGenerator;

/// One vehicle listing: column name → raw value.
pub type Record = serde_json::Map<String, Value>;

/// Canonical column names, as used by the source dataset.
pub mod columns {
    pub const NAME: &str = "Name";
    pub const LOCATION: &str = "Location";
    pub const YEAR: &str = "Year";
    pub const KILOMETERS_DRIVEN: &str = "Kilometers_Driven";
    pub const FUEL_TYPE: &str = "Fuel_Type";
    pub const TRANSMISSION: &str = "Transmission";
    pub const OWNER_TYPE: &str = "Owner_Type";
    pub const MILEAGE: &str = "Mileage";
    pub const ENGINE: &str = "Engine";
    pub const POWER: &str = "Power";
    pub const SEATS: &str = "Seats";
    pub const PRICE: &str = "Price";

    /// Derived from `Year`.
    pub const AGE: &str = "Age";
    /// Derived from `Name`.
    pub const BRAND: &str = "Brand";

    /// Numeric input columns, imputed with the batch median.
    pub const NUMERIC: [&str; 6] = [YEAR, KILOMETERS_DRIVEN, MILEAGE, ENGINE, POWER, SEATS];

    /// Categorical columns, label-encoded per run.
    pub const CATEGORICAL: [&str; 5] = [FUEL_TYPE, TRANSMISSION, OWNER_TYPE, LOCATION, BRAND];

    /// Order of the columns in the feature matrix.
    pub const FEATURE_ORDER: [&str; 12] = [
        YEAR,
        KILOMETERS_DRIVEN,
        MILEAGE,
        ENGINE,
        POWER,
        SEATS,
        AGE,
        FUEL_TYPE,
        TRANSMISSION,
        OWNER_TYPE,
        LOCATION,
        BRAND,
    ];

    /// Every column a record may carry, in CSV header order.
    pub const ALL: [&str; 12] = [
        NAME,
        LOCATION,
        YEAR,
        KILOMETERS_DRIVEN,
        FUEL_TYPE,
        TRANSMISSION,
        OWNER_TYPE,
        MILEAGE,
        ENGINE,
        POWER,
        SEATS,
        PRICE,
    ];
}

/// Coerce a raw value to a finite number.
///
/// JSON numbers are taken as-is, strings are parsed after trimming. Anything
/// else (null, booleans, containers, unparseable or non-finite text) is
/// treated as missing.
pub fn numeric_value(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Coerce a raw value to a non-empty, trimmed string.
///
/// Numbers and booleans are rendered with their JSON representation so that
/// e.g. a numeric `Seats` column can still be used as a category.
pub fn text_value(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Whether at least one record carries `column` (with any value, even null).
pub fn column_present(records: &[Record], column: &str) -> bool {
    records.iter().any(|r| r.contains_key(column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_value_coercion() {
        assert_eq!(numeric_value(Some(&json!(12))), Some(12.0));
        assert_eq!(numeric_value(Some(&json!(18.5))), Some(18.5));
        assert_eq!(numeric_value(Some(&json!(" 1197 "))), Some(1197.0));
        assert_eq!(numeric_value(Some(&json!("82 bhp"))), None);
        assert_eq!(numeric_value(Some(&json!(""))), None);
        assert_eq!(numeric_value(Some(&json!(null))), None);
        assert_eq!(numeric_value(Some(&json!(true))), None);
        assert_eq!(numeric_value(Some(&json!("NaN"))), None);
        assert_eq!(numeric_value(None), None);
    }

    #[test]
    fn test_text_value_coercion() {
        assert_eq!(
            text_value(Some(&json!("  Diesel "))),
            Some("Diesel".to_string())
        );
        assert_eq!(text_value(Some(&json!(5))), Some("5".to_string()));
        assert_eq!(text_value(Some(&json!("   "))), None);
        assert_eq!(text_value(Some(&json!(null))), None);
    }

    #[test]
    fn test_column_present() {
        let records: Vec<Record> = vec![
            serde_json::from_value(json!({"Year": 2010})).unwrap(),
            serde_json::from_value(json!({"Seats": null})).unwrap(),
        ];
        assert!(column_present(&records, columns::YEAR));
        assert!(column_present(&records, columns::SEATS));
        assert!(!column_present(&records, columns::POWER));
    }
}
