use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "table-kit";

pub struct AppPaths;

impl AppPaths {
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow!("Cannot determine data directory"))?
            .join(APP_DIR);

        fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| anyhow!("Cannot determine config directory"))?
            .join(APP_DIR))
    }

    /// Default file backing persisted preferences and record collections
    pub fn storage_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("storage.json"))
    }

    /// Scratch directory for transient print documents
    pub fn print_dir() -> Result<PathBuf> {
        let dir = std::env::temp_dir().join(APP_DIR).join("print");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
