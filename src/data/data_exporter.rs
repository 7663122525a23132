use crate::config::config::ExportConfig;
use crate::data::data_analyzer::{ColumnSummary, DataAnalyzer};
use crate::data::record::Record;
use crate::output::clipboard::{ClipboardAccess, SystemClipboard};
use crate::output::download::{DirectorySink, ExportSink};
use crate::output::printer::{BrowserPrinter, Printer};
use anyhow::Result;
use chrono::{Local, Utc};
use convert_case::{Case, Casing};
use std::borrow::Borrow;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

const UTF8_BOM: char = '\u{FEFF}';

/// Caller options shared by every export format
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// File name without extension; defaults to `<prefix>_<date>`
    pub filename: Option<String>,
    /// Columns to include, in this order; defaults to the first record's fields
    pub columns: Option<Vec<String>>,
    pub exclude_columns: Vec<String>,
    /// Heading for printed documents
    pub title: Option<String>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn excluding<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.exclude_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn keeps(&self, column: &str) -> bool {
        let included = self
            .columns
            .as_ref()
            .map(|cols| cols.iter().any(|c| c == column))
            .unwrap_or(true);
        included && !self.exclude_columns.iter().any(|c| c == column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardFormat {
    Csv,
    Json,
    /// Tab-separated values, one record per line, no header
    Text,
}

/// Result of a download-style export
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing to export; no artifact was produced
    Skipped,
}

/// Turn an identifier-style column name into a display label (`fechaRegistro` -> `Fecha Registro`)
///
/// Runs of capitals are kept as written, so `precioUSD` becomes `Precio USD`.
pub fn column_label(column: &str) -> String {
    column
        .to_case(Case::Title)
        .split(' ')
        .map(|word| {
            let upper = word.to_uppercase();
            if word.chars().count() > 1 && column.contains(&upper) {
                upper
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serializes records to CSV, JSON, plain text and print documents
pub struct DataExporter {
    config: ExportConfig,
    sink: Arc<dyn ExportSink>,
    clipboard: Arc<dyn ClipboardAccess>,
    printer: Arc<dyn Printer>,
}

impl DataExporter {
    pub fn new(
        config: ExportConfig,
        sink: Arc<dyn ExportSink>,
        clipboard: Arc<dyn ClipboardAccess>,
        printer: Arc<dyn Printer>,
    ) -> Self {
        Self {
            config,
            sink,
            clipboard,
            printer,
        }
    }

    /// Exporter wired to the export directory, system clipboard and default viewer
    pub fn from_config(config: ExportConfig) -> Self {
        let sink = Arc::new(DirectorySink::new(config.resolve_directory()));
        Self::new(
            config,
            sink,
            Arc::new(SystemClipboard),
            Arc::new(BrowserPrinter),
        )
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export records as a CSV file
    pub fn export_to_csv<R: Borrow<Record>>(&self, records: &[R], options: &ExportOptions) -> Result<ExportOutcome> {
        if records.is_empty() {
            warn!(target: "export", "No records to export to CSV");
            return Ok(ExportOutcome::Skipped);
        }

        let csv = Self::generate_csv_text(records, options, self.config.include_bom);
        let filename = self.filename_for(options, "csv");
        let path = self.sink.deliver(&filename, csv.as_bytes())?;

        info!(target: "export", "Exported {} rows to CSV: {}", records.len(), filename);
        Ok(ExportOutcome::Written {
            path,
            rows: records.len(),
        })
    }

    /// Export records as a pretty-printed JSON file
    pub fn export_to_json<R: Borrow<Record>>(&self, records: &[R], options: &ExportOptions) -> Result<ExportOutcome> {
        if records.is_empty() {
            warn!(target: "export", "No records to export to JSON");
            return Ok(ExportOutcome::Skipped);
        }

        let json = Self::generate_json_text(records, options)?;
        let filename = self.filename_for(options, "json");
        let path = self.sink.deliver(&filename, json.as_bytes())?;

        info!(target: "export", "Exported {} rows to JSON: {}", records.len(), filename);
        Ok(ExportOutcome::Written {
            path,
            rows: records.len(),
        })
    }

    /// Copy records to the clipboard; any failure is reported as `false`
    pub fn copy_to_clipboard<R: Borrow<Record>>(
        &self,
        records: &[R],
        options: &ExportOptions,
        format: ClipboardFormat,
    ) -> bool {
        if records.is_empty() {
            warn!(target: "export", "No records to copy to clipboard");
            return false;
        }

        let text = match format {
            ClipboardFormat::Csv => Self::generate_csv_text(records, options, false),
            ClipboardFormat::Text => Self::generate_text_lines(records, options),
            ClipboardFormat::Json => match Self::generate_json_text(records, options) {
                Ok(json) => json,
                Err(e) => {
                    warn!(target: "export", "Failed to serialize records for clipboard: {}", e);
                    return false;
                }
            },
        };

        match self.clipboard.write_text(&text) {
            Ok(()) => {
                debug!(target: "export", "Copied {} records as {:?}", records.len(), format);
                true
            }
            Err(e) => {
                warn!(target: "export", "Clipboard write failed: {:#}", e);
                false
            }
        }
    }

    /// Render records into a print document and hand it to the printer
    pub fn print<R: Borrow<Record>>(&self, records: &[R], options: &ExportOptions) {
        if records.is_empty() {
            warn!(target: "export", "No records to print");
            return;
        }

        let title = options
            .title
            .clone()
            .unwrap_or_else(|| self.config.print_title.clone());
        let html = Self::generate_print_html(records, options, &title);
        self.printer.render_and_print(&html);
    }

    /// Per-column statistics for `records`
    pub fn summarize<R: Borrow<Record>>(records: &[R]) -> Vec<ColumnSummary> {
        DataAnalyzer::summarize(records)
    }

    /// File name from the options or `<prefix>_<YYYY-MM-DD>` (UTC date), with `extension`
    pub fn filename_for(&self, options: &ExportOptions, extension: &str) -> String {
        let base = options.filename.clone().unwrap_or_else(|| {
            format!(
                "{}_{}",
                self.config.filename_prefix,
                Utc::now().format("%Y-%m-%d")
            )
        });

        let suffix = format!(".{}", extension);
        if base.to_lowercase().ends_with(&suffix) {
            base
        } else {
            base + &suffix
        }
    }

    /// Columns exported for `records`: explicit list or the first record's fields, minus exclusions
    pub fn resolve_columns<R: Borrow<Record>>(records: &[R], options: &ExportOptions) -> Vec<String> {
        let base: Vec<String> = match &options.columns {
            Some(columns) => columns.clone(),
            None => records
                .first()
                .map(|r| r.borrow().keys().map(|k| k.to_string()).collect())
                .unwrap_or_default(),
        };

        base.into_iter()
            .filter(|c| !options.exclude_columns.contains(c))
            .collect()
    }

    /// CSV text with a title-cased header row
    pub fn generate_csv_text<R: Borrow<Record>>(records: &[R], options: &ExportOptions, include_bom: bool) -> String {
        let columns = Self::resolve_columns(records, options);

        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(
            columns
                .iter()
                .map(|c| Self::escape_csv_field(&column_label(c)))
                .collect::<Vec<_>>()
                .join(","),
        );

        for record in records {
            let record = record.borrow();
            let row: Vec<String> = columns
                .iter()
                .map(|c| {
                    record
                        .get(c)
                        .map(|v| Self::escape_csv_field(&v.to_string()))
                        .unwrap_or_default()
                })
                .collect();
            lines.push(row.join(","));
        }

        let mut csv = String::new();
        if include_bom {
            csv.push(UTF8_BOM);
        }
        csv.push_str(&lines.join("\n"));
        csv
    }

    /// Pretty-printed JSON array of the column-filtered records
    ///
    /// With explicit columns every record is projected onto them; otherwise
    /// each record keeps its own fields minus the excluded ones.
    pub fn generate_json_text<R: Borrow<Record>>(records: &[R], options: &ExportOptions) -> Result<String> {
        let projected: Vec<Record> = match &options.columns {
            Some(_) => {
                let columns = Self::resolve_columns(records, options);
                records.iter().map(|r| r.borrow().project(&columns)).collect()
            }
            None => records
                .iter()
                .map(|r| {
                    r.borrow()
                        .iter()
                        .filter(|(key, _)| options.keeps(key))
                        .map(|(key, value)| (key, value.clone()))
                        .collect::<Record>()
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&projected)?)
    }

    /// One line per record, values tab-separated in the record's own key order
    pub fn generate_text_lines<R: Borrow<Record>>(records: &[R], options: &ExportOptions) -> String {
        records
            .iter()
            .map(|record| {
                record
                    .borrow()
                    .iter()
                    .filter(|(key, _)| options.keeps(key))
                    .map(|(_, value)| {
                        value
                            .to_string()
                            .replace('\t', "    ")
                            .replace('\n', " ")
                            .replace('\r', "")
                    })
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Self-contained HTML document with a single table
    pub fn generate_print_html<R: Borrow<Record>>(records: &[R], options: &ExportOptions, title: &str) -> String {
        let columns = Self::resolve_columns(records, options);
        let title = Self::escape_html(title);

        let header: String = columns
            .iter()
            .map(|c| format!("<th>{}</th>", Self::escape_html(&column_label(c))))
            .collect();

        let body: String = records
            .iter()
            .map(|record| {
                let record = record.borrow();
                let cells: String = columns
                    .iter()
                    .map(|c| {
                        let value = record.get(c).map(|v| v.to_string()).unwrap_or_default();
                        format!("<td>{}</td>", Self::escape_html(&value))
                    })
                    .collect();
                format!("<tr>{}</tr>", cells)
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 20px; }}
h1 {{ font-size: 18px; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ddd; padding: 6px 8px; text-align: left; font-size: 12px; }}
th {{ background-color: #f2f2f2; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p>{generated} - {count} records</p>
<table>
<thead><tr>{header}</tr></thead>
<tbody>
{body}
</tbody>
</table>
<script>
window.onload = function () {{ window.print(); }};
window.onafterprint = function () {{ window.close(); }};
</script>
</body>
</html>
"#,
            title = title,
            generated = Local::now().format("%Y-%m-%d %H:%M"),
            count = records.len(),
            header = header,
            body = body,
        )
    }

    /// Quote a field when it contains a comma, quote or newline, doubling inner quotes
    pub fn escape_csv_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn escape_html(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                other => escaped.push(other),
            }
        }
        escaped
    }
}
