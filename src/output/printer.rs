use crate::utils::app_paths::AppPaths;
use chrono::Local;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Print documents kept in the scratch directory, including the one being opened
const MAX_PRINT_DOCUMENTS: usize = 5;

/// Delete all but the newest `keep` print documents in `dir`, returning how many were removed
///
/// Document names embed a sortable timestamp, so name order is age order.
pub fn prune_print_documents(dir: &Path, keep: usize) -> io::Result<usize> {
    let mut documents: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("print_") && n.ends_with(".html"))
                .unwrap_or(false)
        })
        .collect();

    if documents.len() <= keep {
        return Ok(0);
    }

    documents.sort();
    let stale = documents.len() - keep;
    for path in &documents[..stale] {
        fs::remove_file(path)?;
    }
    Ok(stale)
}

/// Renders an HTML document and hands it to a print dialog
///
/// Fire-and-forget: nothing is returned and failures are only logged.
pub trait Printer: Send + Sync {
    fn render_and_print(&self, html: &str);
}

/// Opens the document in the system's default viewer
///
/// The document carries a script that opens the print dialog on load and
/// closes the window once printing finishes or is cancelled.
#[derive(Debug, Default)]
pub struct BrowserPrinter;

impl Printer for BrowserPrinter {
    fn render_and_print(&self, html: &str) {
        let dir = match AppPaths::print_dir() {
            Ok(dir) => dir,
            Err(e) => {
                warn!(target: "export", "No directory for print document: {:#}", e);
                return;
            }
        };

        match prune_print_documents(&dir, MAX_PRINT_DOCUMENTS - 1) {
            Ok(0) => {}
            Ok(removed) => debug!(target: "export", "Removed {} old print documents", removed),
            Err(e) => warn!(target: "export", "Failed to prune print documents in {:?}: {}", dir, e),
        }

        let path = dir.join(format!("print_{}.html", Local::now().format("%Y%m%d_%H%M%S%3f")));
        if let Err(e) = fs::write(&path, html) {
            warn!(target: "export", "Failed to write print document {:?}: {}", path, e);
            return;
        }

        debug!(target: "export", "Opening print document {:?}", path);
        if let Err(e) = open::that_detached(&path) {
            warn!(target: "export", "Failed to open print document {:?}: {}", path, e);
        }
    }
}

/// Records printed documents in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryPrinter {
    documents: Arc<Mutex<Vec<String>>>,
}

impl MemoryPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> Vec<String> {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Printer for MemoryPrinter {
    fn render_and_print(&self, html: &str) {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(html.to_string());
    }
}
