use crate::data::record::{FieldValue, Record};
use crate::storage::key_value_store::KeyValueStore;
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// A named list of records persisted as one JSON array in a [`KeyValueStore`]
///
/// Used for the site's editable record types (tourist sites, guides,
/// activities, reservations). Every write rewrites the whole array; last
/// write wins.
pub struct RecordCollection {
    store: Arc<dyn KeyValueStore>,
    key: String,
    id_field: String,
}

impl RecordCollection {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            id_field: "id".to_string(),
        }
    }

    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// All records; unreadable or corrupt data is logged and reads as empty
    pub fn list(&self) -> Vec<Record> {
        match self.try_list() {
            Ok(records) => records,
            Err(e) => {
                warn!(target: "storage", "Failed to read collection '{}': {:#}", self.key, e);
                Vec::new()
            }
        }
    }

    /// All records, surfacing storage and parse failures
    pub fn try_list(&self) -> Result<Vec<Record>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let values: Vec<serde_json::Value> = serde_json::from_str(&raw)
            .with_context(|| format!("Collection '{}' is not a JSON array", self.key))?;
        Ok(values.iter().filter_map(Record::from_json).collect())
    }

    pub fn get(&self, id: &FieldValue) -> Option<Record> {
        self.list()
            .into_iter()
            .find(|r| r.get(&self.id_field) == Some(id))
    }

    /// Append `record`, assigning the next numeric id when it has none
    pub fn insert(&self, mut record: Record) -> Result<Record> {
        let mut records = self.list();
        if record.get(&self.id_field).is_none() {
            let next_id = records
                .iter()
                .filter_map(|r| r.get(&self.id_field).and_then(|v| v.numeric()))
                .fold(0.0_f64, f64::max)
                + 1.0;
            record.insert(self.id_field.clone(), next_id);
        }
        records.push(record.clone());
        self.write(&records)?;
        debug!(target: "storage", "Inserted record into '{}' ({} total)", self.key, records.len());
        Ok(record)
    }

    /// Merge `changes` into the record with `id`
    pub fn update(&self, id: &FieldValue, changes: &Record) -> Result<Record> {
        let mut records = self.list();
        let existing = records
            .iter_mut()
            .find(|r| r.get(&self.id_field) == Some(id))
            .ok_or_else(|| anyhow!("No record with {} = {} in '{}'", self.id_field, id, self.key))?;
        existing.merge(changes);
        // The identifier is not editable
        existing.insert(self.id_field.clone(), id.clone());
        let updated = existing.clone();
        self.write(&records)?;
        Ok(updated)
    }

    /// Remove the record with `id`; returns whether one was removed
    pub fn remove(&self, id: &FieldValue) -> Result<bool> {
        let mut records = self.list();
        let before = records.len();
        records.retain(|r| r.get(&self.id_field) != Some(id));
        if records.len() == before {
            return Ok(false);
        }
        self.write(&records)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }

    fn write(&self, records: &[Record]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.store
            .set(&self.key, &raw)
            .with_context(|| format!("Failed to persist collection '{}'", self.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use crate::storage::key_value_store::MemoryStore;

    fn collection() -> (Arc<MemoryStore>, RecordCollection) {
        let store = Arc::new(MemoryStore::new());
        let collection = RecordCollection::new(store.clone(), "guides");
        (store, collection)
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let (_, guides) = collection();
        let first = guides.insert(record! { "name" => "Rosa" }).unwrap();
        let second = guides.insert(record! { "name" => "Luis" }).unwrap();

        assert_eq!(first.get("id"), Some(&FieldValue::Number(1.0)));
        assert_eq!(second.get("id"), Some(&FieldValue::Number(2.0)));
        assert_eq!(guides.list().len(), 2);
    }

    #[test]
    fn test_update_merges_and_keeps_id() {
        let (_, guides) = collection();
        guides.insert(record! { "name" => "Rosa", "languages" => "es" }).unwrap();

        let updated = guides
            .update(&FieldValue::Number(1.0), &record! { "languages" => "es,qu", "id" => 50 })
            .unwrap();
        assert_eq!(updated.get("name"), Some(&FieldValue::from("Rosa")));
        assert_eq!(updated.get("languages"), Some(&FieldValue::from("es,qu")));
        assert_eq!(updated.get("id"), Some(&FieldValue::Number(1.0)));
    }

    #[test]
    fn test_update_missing_record_fails() {
        let (_, guides) = collection();
        assert!(guides.update(&FieldValue::Number(9.0), &Record::new()).is_err());
    }

    #[test]
    fn test_remove() {
        let (_, guides) = collection();
        guides.insert(record! { "name" => "Rosa" }).unwrap();
        assert!(guides.remove(&FieldValue::Number(1.0)).unwrap());
        assert!(!guides.remove(&FieldValue::Number(1.0)).unwrap());
        assert!(guides.list().is_empty());
    }

    #[test]
    fn test_corrupt_collection_reads_as_empty() {
        let (store, guides) = collection();
        store.set("guides", "{broken").unwrap();
        assert!(guides.list().is_empty());
        assert!(guides.try_list().is_err());
    }

    #[test]
    fn test_quota_failure_is_returned() {
        let store = Arc::new(MemoryStore::with_quota(16));
        let reservations = RecordCollection::new(store, "reservations");
        let result = reservations.insert(record! { "notes" => "a long note that does not fit" });
        assert!(result.is_err());
        assert!(reservations.list().is_empty());
    }
}
