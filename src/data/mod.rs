//! Tabular data layer
//!
//! Records, the search/sort/paginate pipeline, selection tracking,
//! persisted view preferences and exports.

pub mod data_analyzer;
pub mod data_exporter;
pub mod loaders;
pub mod paginator;
pub mod preferences;
pub mod record;
pub mod search_filter;
pub mod selection;
pub mod sorter;
pub mod table_controller;
pub mod value_compare;
