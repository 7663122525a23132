use crate::data::record::{FieldValue, Record};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::HashSet;
use tracing::warn;

/// Min, max and mean of a column whose values are all numeric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Statistics for a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub non_null_count: usize,
    /// Missing fields, explicit nulls and empty strings
    pub null_count: usize,
    pub distinct_count: usize,
    /// Present only when every non-null value is a number or parses as one
    pub numeric: Option<NumericSummary>,
}

/// Column statistics over record sets
pub struct DataAnalyzer;

impl DataAnalyzer {
    /// Summaries for every column seen in `records`, in first-seen order
    pub fn summarize<R: Borrow<Record>>(records: &[R]) -> Vec<ColumnSummary> {
        if records.is_empty() {
            warn!(target: "export", "No records to summarize");
            return Vec::new();
        }

        Self::column_names(records)
            .into_iter()
            .map(|column| Self::summarize_column(records, &column))
            .collect()
    }

    /// Union of field names across `records`, in first-seen order
    pub fn column_names<R: Borrow<Record>>(records: &[R]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for record in records {
            for key in record.borrow().keys() {
                if seen.insert(key.to_string()) {
                    columns.push(key.to_string());
                }
            }
        }
        columns
    }

    /// Statistics for `column` across `records`
    pub fn summarize_column<R: Borrow<Record>>(records: &[R], column: &str) -> ColumnSummary {
        let mut null_count = 0;
        let mut distinct = HashSet::new();
        let mut numbers = Vec::new();
        let mut all_numeric = true;

        for record in records {
            match record.borrow().get(column) {
                None => null_count += 1,
                Some(FieldValue::String(s)) if s.is_empty() => null_count += 1,
                Some(value) => {
                    distinct.insert(value.to_string());
                    match value.numeric() {
                        Some(n) => numbers.push(n),
                        None => all_numeric = false,
                    }
                }
            }
        }

        let numeric = if all_numeric && !numbers.is_empty() {
            let min = numbers.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = numbers.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
            Some(NumericSummary { min, max, mean })
        } else {
            None
        };

        ColumnSummary {
            column: column.to_string(),
            non_null_count: records.len() - null_count,
            null_count,
            distinct_count: distinct.len(),
            numeric,
        }
    }
}
