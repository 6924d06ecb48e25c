//! CSV ingestion into [`Record`]s.
//!
//! The header row names the columns. Every header becomes a key in every
//! record, so column presence follows the header even when all cells of a
//! column are empty. Cells are typed loosely:
//! - empty cell → `null`
//! - cell parsing as a finite number → JSON number
//! - anything else → JSON string

use super::Record;
use crate::error::PipelineError;
use csv::ReaderBuilder;
use serde_json::{Number, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read records from any CSV source with a header row.
///
/// # Errors
/// Returns [`PipelineError::Csv`] on malformed CSV (e.g. ragged rows) and
/// [`PipelineError::Data`] when the header row is missing.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, PipelineError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(PipelineError::data("CSV input has no header row"));
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let mut record = Record::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            record.insert(header.to_string(), cell_value(cell));
        }
        records.push(record);
    }

    tracing::debug!(rows = records.len(), columns = headers.len(), "parsed CSV input");
    Ok(records)
}

/// Read records from a CSV file on disk.
///
/// # Errors
/// Returns [`PipelineError::Csv`] if the file cannot be opened or parsed.
pub fn read_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, PipelineError> {
    let file = File::open(path.as_ref()).map_err(|e| {
        PipelineError::Csv(format!("cannot open {}: {}", path.as_ref().display(), e))
    })?;
    read_records(BufReader::new(file))
}

fn cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match cell.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) if looks_numeric(cell) => Value::Number(n),
        _ => Value::String(cell.to_string()),
    }
}

// "inf"/"nan" parse as floats but are names, not numbers.
fn looks_numeric(cell: &str) -> bool {
    cell.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{columns, numeric_value, text_value};

    const SAMPLE: &str = "\
Name,Location,Year,Kilometers_Driven,Fuel_Type,Transmission,Owner_Type,Mileage,Engine,Power,Seats,Price
Maruti Swift VDI,Pune,2014,41000,Diesel,Manual,First,25.2,1248,74,5,4.5
Hyundai Creta 1.6,Delhi,2017,,Petrol,Automatic,Second,null,1591,121.3,5,12.1
";

    #[test]
    fn test_read_records_types_cells() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(numeric_value(first.get(columns::YEAR)), Some(2014.0));
        assert_eq!(
            text_value(first.get(columns::NAME)),
            Some("Maruti Swift VDI".to_string())
        );
        assert!(first.get(columns::PRICE).unwrap().is_number());

        let second = &records[1];
        assert_eq!(second.get(columns::KILOMETERS_DRIVEN), Some(&Value::Null));
        assert_eq!(numeric_value(second.get(columns::MILEAGE)), None);
    }

    #[test]
    fn test_every_header_becomes_a_key() {
        let records = read_records("Name,Seats\nAlto,\n".as_bytes()).unwrap();
        assert!(records[0].contains_key(columns::SEATS));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let result = read_records("Name,Price\nAlto,2.0,extra\n".as_bytes());
        assert!(matches!(result, Err(PipelineError::Csv(_))));
    }

    #[test]
    fn test_textual_float_names_stay_strings() {
        let records = read_records("Name,Price\ninf,3\n".as_bytes()).unwrap();
        assert!(records[0].get(columns::NAME).unwrap().is_string());
    }

    #[test]
    fn test_missing_file() {
        let result = read_records_from_path("/definitely/not/here.csv");
        assert!(matches!(result, Err(PipelineError::Csv(_))));
    }
}
