//! Client-side tabular data management: search, sort, pagination, row
//! selection and export over dynamically shaped records.
//!
//! ```
//! use std::sync::Arc;
//! use table_kit::data::table_controller::{ControllerOptions, TableController};
//! use table_kit::record;
//!
//! let records = vec![
//!     record! { "id" => 1, "name" => "Ana", "age" => 30 },
//!     record! { "id" => 2, "name" => "Beto", "age" => 25 },
//! ];
//! let mut table = TableController::new(Arc::new(records), ControllerOptions::default());
//! table.handle_sort("age");
//! assert_eq!(table.data()[0].get("name").unwrap().to_string(), "Beto");
//! ```

pub mod config;
pub mod data;
pub mod output;
pub mod storage;
pub mod utils;

pub use data::data_exporter::{ClipboardFormat, DataExporter, ExportOptions, ExportOutcome};
pub use data::record::{FieldValue, IdentityStrategy, Record, RecordId};
pub use data::selection::{SelectionState, SelectionTracker};
pub use data::sorter::SortDirection;
pub use data::table_controller::{derive_view, ControllerOptions, TableController, ViewResult, ViewState};
