use crate::data::record::{FieldValue, Record};
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use serde_json::Value as JsonValue;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// Load a JSON array of objects; non-object entries are skipped with a warning
pub fn load_json_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open JSON file: {:?}", path.as_ref()))?;
    let value: JsonValue = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON file: {:?}", path.as_ref()))?;

    let items = value
        .as_array()
        .ok_or_else(|| anyhow!("Expected a JSON array of records in {:?}", path.as_ref()))?;

    let records: Vec<Record> = items.iter().filter_map(Record::from_json).collect();
    if records.len() != items.len() {
        warn!(
            target: "loader",
            "Skipped {} non-object entries in {:?}",
            items.len() - records.len(),
            path.as_ref()
        );
    }

    debug!(target: "loader", "Loaded {} records from {:?}", records.len(), path.as_ref());
    Ok(records)
}

/// Load a CSV file with a header row, inferring scalar types per cell
pub fn load_csv_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = row
                    .get(idx)
                    .map(FieldValue::infer_from_str)
                    .unwrap_or(FieldValue::Null);
                (header.to_string(), value)
            })
            .collect();
        records.push(record);
    }

    debug!(target: "loader", "Loaded {} records from {:?}", records.len(), path.as_ref());
    Ok(records)
}

/// Pick a loader from the file extension
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("json") => load_json_records(path),
        Some("csv") => load_csv_records(path),
        _ => Err(anyhow!(
            "Unsupported file type {:?}; expected .json or .csv",
            path.as_ref()
        )),
    }
}
