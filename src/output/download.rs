use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Destination for downloaded export artifacts
pub trait ExportSink: Send + Sync {
    /// Deliver `contents` under `filename`, returning where it ended up
    fn deliver(&self, filename: &str, contents: &[u8]) -> Result<PathBuf>;
}

/// Writes artifacts into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&self, filename: &str, contents: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory)
            .with_context(|| format!("Failed to create export directory {:?}", self.directory))?;
        let path = self.directory.join(filename);
        fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))?;
        info!(target: "export", "Wrote {} bytes to {:?}", contents.len(), path);
        Ok(path)
    }
}

/// Keeps delivered artifacts in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    delivered: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<(String, Vec<u8>)> {
        self.delivered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl ExportSink for MemorySink {
    fn deliver(&self, filename: &str, contents: &[u8]) -> Result<PathBuf> {
        self.delivered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((filename.to_string(), contents.to_vec()));
        Ok(PathBuf::from(filename))
    }
}
