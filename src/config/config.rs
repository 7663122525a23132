use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::preferences::DEFAULT_PREFERENCE_NAMESPACE;
use crate::storage::key_value_store::{JsonFileStore, KeyValueStore};
use crate::utils::app_paths::AppPaths;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table: TableConfig,
    pub export: ExportConfig,
    pub preferences: PreferencesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page for new tables
    pub default_page_size: usize,

    /// Choices offered by page size selectors
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where downloaded exports are written (defaults to the user's download directory)
    pub directory: Option<PathBuf>,

    /// Prefix of generated file names: `<prefix>_<date>.csv`
    pub filename_prefix: String,

    /// Prepend a UTF-8 byte order mark to CSV output for spreadsheet compatibility
    pub include_bom: bool,

    /// Heading of printed documents
    pub print_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Prepended to every caller-supplied preference key
    pub namespace: String,

    /// File backing persisted preferences and record collections
    pub storage_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set
    pub level: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![5, 10, 25, 50],
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filename_prefix: "export".to_string(),
            include_bom: true,
            print_title: "Data export".to_string(),
        }
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_PREFERENCE_NAMESPACE.to_string(),
            storage_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ExportConfig {
    /// Directory exports are written to
    pub fn resolve_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl PreferencesConfig {
    /// Open the file store backing preferences and record collections
    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>> {
        let path = match &self.storage_file {
            Some(path) => path.clone(),
            None => AppPaths::storage_file()?,
        };
        Ok(Arc::new(JsonFileStore::open(path)?))
    }
}

impl Config {
    /// Load config from the default location, creating it when missing
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&config_path, Self::create_default_with_comments())
                .with_context(|| format!("Failed to write default config: {:?}", config_path))?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config: {:?}", path.as_ref()))?;

        if config.table.default_page_size == 0 {
            config.table.default_page_size = TableConfig::default().default_page_size;
        }

        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::get_config_path()?)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        Ok(AppPaths::config_dir()?.join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# table-kit configuration
# Location: ~/.config/table-kit/config.toml (Linux)

[table]
# Rows per page for new tables
default_page_size = 10

# Choices offered by page size selectors
page_size_options = [5, 10, 25, 50]

[export]
# Directory for CSV/JSON exports (defaults to the download directory)
# directory = "/path/to/exports"

# Generated file names look like export_2024-05-01.csv
filename_prefix = "export"

# Prepend a byte order mark so spreadsheets detect UTF-8
include_bom = true

# Heading of printed documents
print_title = "Data export"

[preferences]
# Prefix for persisted table preferences
namespace = "table_prefs:"

# File backing preferences and record collections
# storage_file = "/path/to/storage.json"

[logging]
# Used when RUST_LOG is not set
level = "info"
"#
        .to_string()
    }
}
