use crate::config::config::PreferencesConfig;
use crate::data::sorter::SortDirection;
use crate::storage::key_value_store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default namespace prepended to caller preference keys
pub const DEFAULT_PREFERENCE_NAMESPACE: &str = "table_prefs:";

/// The persisted subset of a table's view state
///
/// Search term and current page are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePreferences {
    pub page_size: usize,
    #[serde(default)]
    pub sort_key: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

/// Loads and saves [`TablePreferences`] under a namespaced key
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        Self::with_namespace(store, DEFAULT_PREFERENCE_NAMESPACE, key)
    }

    pub fn with_namespace(store: Arc<dyn KeyValueStore>, namespace: &str, key: &str) -> Self {
        Self {
            store,
            key: format!("{}{}", namespace, key),
        }
    }

    /// Preferences under the configured namespace, stored in `store`
    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &PreferencesConfig, key: &str) -> Self {
        Self::with_namespace(store, &config.namespace, key)
    }

    /// Full storage key including the namespace
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Stored preferences, or `None` when missing, unreadable or corrupt
    pub fn load(&self) -> Option<TablePreferences> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(target: "preferences", "Failed to read '{}': {:#}", self.key, e);
                return None;
            }
        };

        match serde_json::from_str::<TablePreferences>(&raw) {
            Ok(prefs) if prefs.page_size > 0 => Some(prefs),
            Ok(_) => {
                warn!(target: "preferences", "Ignoring '{}' with zero page size", self.key);
                None
            }
            Err(e) => {
                warn!(target: "preferences", "Ignoring corrupt '{}': {}", self.key, e);
                None
            }
        }
    }

    /// Persist `prefs`; failures are logged and otherwise ignored
    pub fn save(&self, prefs: &TablePreferences) -> bool {
        let raw = match serde_json::to_string(prefs) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(target: "preferences", "Failed to serialize preferences: {}", e);
                return false;
            }
        };

        match self.store.set(&self.key, &raw) {
            Ok(()) => {
                debug!(target: "preferences", "Saved '{}': {}", self.key, raw);
                true
            }
            Err(e) => {
                warn!(target: "preferences", "Skipping persistence of '{}': {:#}", self.key, e);
                false
            }
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            warn!(target: "preferences", "Failed to remove '{}': {:#}", self.key, e);
        }
    }
}
