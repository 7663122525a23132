use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex};

/// Write access to a clipboard
pub trait ClipboardAccess: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The system clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardAccess for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// In-memory clipboard that can be told to refuse writes
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard whose writes always fail, as when permission is denied
    pub fn denied() -> Self {
        Self {
            contents: Arc::new(Mutex::new(None)),
            deny: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl ClipboardAccess for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.deny {
            return Err(anyhow!("Clipboard write permission denied"));
        }
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
        Ok(())
    }
}
