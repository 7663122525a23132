// Table Debug Binary - loads a record file and prints the derived view
// Run with: cargo run --bin table-debug -- data.json --sort name --page 2

use anyhow::{anyhow, Context, Result};
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use table_kit::config::config::Config;
use table_kit::data::data_exporter::column_label;
use table_kit::data::loaders::load_records;
use table_kit::data::preferences::Preferences;
use table_kit::output::download::DirectorySink;
use table_kit::output::clipboard::SystemClipboard;
use table_kit::output::printer::BrowserPrinter;
use table_kit::utils::logging::init_tracing;
use table_kit::{ControllerOptions, DataExporter, ExportOptions, ExportOutcome, Record, TableController};

#[derive(Debug, Default)]
struct Args {
    file: Option<PathBuf>,
    search: Option<String>,
    sort: Option<String>,
    descending: bool,
    page: Option<usize>,
    page_size: Option<usize>,
    summary: bool,
    export_csv: Option<PathBuf>,
    export_json: Option<PathBuf>,
    prefs: Option<String>,
}

fn print_help() {
    println!("table-debug - inspect a record file through the table pipeline");
    println!();
    println!("Usage:");
    println!("  table-debug FILE.json|FILE.csv [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --search TERM        Filter records containing TERM");
    println!("  --sort FIELD         Sort by FIELD (ascending)");
    println!("  --desc               Sort descending");
    println!("  --page N             Show page N (1-based)");
    println!("  --page-size N        Rows per page");
    println!("  --summary            Print per-column statistics");
    println!("  --export-csv DIR     Write the filtered rows as CSV into DIR");
    println!("  --export-json DIR    Write the filtered rows as JSON into DIR");
    println!("  --prefs KEY          Restore and save page size and sort under KEY");
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .ok_or_else(|| anyhow!("Missing value for {}", name))
        };

        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--search" => args.search = Some(value("--search")?),
            "--sort" => args.sort = Some(value("--sort")?),
            "--desc" => args.descending = true,
            "--page" => args.page = Some(value("--page")?.parse().context("--page expects a number")?),
            "--page-size" => {
                args.page_size = Some(value("--page-size")?.parse().context("--page-size expects a number")?)
            }
            "--summary" => args.summary = true,
            "--export-csv" => args.export_csv = Some(PathBuf::from(value("--export-csv")?)),
            "--export-json" => args.export_json = Some(PathBuf::from(value("--export-json")?)),
            "--prefs" => args.prefs = Some(value("--prefs")?),
            other if other.starts_with("--") => return Err(anyhow!("Unknown option {}", other)),
            other => args.file = Some(PathBuf::from(other)),
        }
    }

    Ok(Some(args))
}

fn display_page(columns: &[String], rows: &[&Record]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        columns
            .iter()
            .map(|c| Cell::new(column_label(c)).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    for record in rows {
        let row: Vec<String> = columns
            .iter()
            .map(|c| record.get(c).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        table.add_row(row);
    }

    println!("{table}");
}

fn display_summary(rows: &[&Record]) {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Non-null", "Null", "Distinct", "Min", "Max", "Mean"]);

    for summary in DataExporter::summarize(rows) {
        let (min, max, mean) = match &summary.numeric {
            Some(n) => (n.min.to_string(), n.max.to_string(), format!("{:.2}", n.mean)),
            None => (String::new(), String::new(), String::new()),
        };
        table.add_row(vec![
            summary.column,
            summary.non_null_count.to_string(),
            summary.null_count.to_string(),
            summary.distinct_count.to_string(),
            min,
            max,
            mean,
        ]);
    }

    println!("{table}");
}

fn report(outcome: ExportOutcome) {
    match outcome {
        ExportOutcome::Written { path, rows } => println!("Exported {} rows to {}", rows, path.display()),
        ExportOutcome::Skipped => println!("Nothing to export"),
    }
}

fn run(args: Args, config: Config) -> Result<()> {
    let file = args.file.ok_or_else(|| anyhow!("No input file given (see --help)"))?;
    let records = load_records(&file)?;

    let mut options = ControllerOptions::from_config(&config.table);
    if let Some(size) = args.page_size {
        options = options.with_page_size(size);
    }
    let records = Arc::new(records);
    let mut table = match &args.prefs {
        Some(key) => {
            let store = config.preferences.open_store()?;
            let prefs = Preferences::from_config(store, &config.preferences, key);
            TableController::with_preferences(records, options, prefs)
        }
        None => TableController::new(records, options),
    };

    if let Some(term) = &args.search {
        table.handle_search(term);
    }
    if let Some(key) = &args.sort {
        table.handle_sort(key);
        if args.descending {
            table.handle_sort(key);
        }
    }
    if let Some(page) = args.page {
        table.handle_page_change(page);
    }

    let view = table.view();
    let columns = view
        .all_data
        .first()
        .map(|r| r.keys().map(|k| k.to_string()).collect::<Vec<_>>())
        .unwrap_or_default();

    display_page(&columns, &view.data);
    println!(
        "Page {}/{} - {} matching of {} records",
        view.current_page,
        view.total_pages,
        view.total_items,
        table.records().len()
    );

    if args.summary {
        display_summary(&view.all_data);
    }

    for (dir, json) in [(&args.export_csv, false), (&args.export_json, true)] {
        let Some(dir) = dir else { continue };
        let exporter = DataExporter::new(
            config.export.clone(),
            Arc::new(DirectorySink::new(dir.clone())),
            Arc::new(SystemClipboard),
            Arc::new(BrowserPrinter),
        );
        let outcome = if json {
            exporter.export_to_json(&view.all_data, &ExportOptions::new())?
        } else {
            exporter.export_to_csv(&view.all_data, &ExportOptions::new())?
        };
        report(outcome);
    }

    Ok(())
}

fn main() -> ExitCode {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config.logging.level);
    if let Some(e) = config_error {
        tracing::warn!(target: "config", "Using default config: {:#}", e);
    }

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
