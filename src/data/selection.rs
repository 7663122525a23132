use crate::data::record::{IdentityStrategy, Record, RecordId};
use std::collections::HashSet;
use tracing::debug;

/// Derived selection state, used to drive tri-state checkboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Some,
    All,
}

/// Tracks selected record identifiers independently of paging and filtering
///
/// The tracker never owns records. Every read takes the collection the
/// selection applies to (the filtered and sorted result, not a single page)
/// and re-derives identifiers from its current ordering. Identifiers that are
/// no longer present in that collection are ignored by every read.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selected: HashSet<RecordId>,
    identity: IdentityStrategy,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: IdentityStrategy) -> Self {
        Self {
            selected: HashSet::new(),
            identity,
        }
    }

    pub fn identity(&self) -> &IdentityStrategy {
        &self.identity
    }

    pub fn id_for(&self, record: &Record, index: usize) -> Option<RecordId> {
        self.identity.id_for(record, index)
    }

    /// Identifiers of `items` in their current order
    pub fn ids_for(&self, items: &[&Record]) -> Vec<RecordId> {
        items
            .iter()
            .enumerate()
            .filter_map(|(index, record)| self.id_for(record, index))
            .collect()
    }

    pub fn toggle(&mut self, id: RecordId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn select(&mut self, id: RecordId) {
        self.selected.insert(id);
    }

    pub fn deselect(&mut self, id: &RecordId) {
        self.selected.remove(id);
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    /// Replace the selection with every identifiable record in `items`
    pub fn select_all(&mut self, items: &[&Record]) {
        self.selected = self.ids_for(items).into_iter().collect();
        debug!(target: "selection", "selected all {} records", self.selected.len());
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn toggle_all(&mut self, items: &[&Record]) {
        if self.is_all_selected(items) {
            self.clear();
        } else {
            self.select_all(items);
        }
    }

    /// Number of selected identifiers that are present in `items`
    pub fn selected_count(&self, items: &[&Record]) -> usize {
        self.ids_for(items)
            .iter()
            .filter(|id| self.selected.contains(id))
            .count()
    }

    pub fn is_all_selected(&self, items: &[&Record]) -> bool {
        let count = self.ids_for(items).len();
        let selected = self.selected_count(items);
        count > 0 && selected == count
    }

    pub fn is_some_selected(&self, items: &[&Record]) -> bool {
        let count = self.ids_for(items).len();
        let selected = self.selected_count(items);
        selected > 0 && selected < count
    }

    pub fn state(&self, items: &[&Record]) -> SelectionState {
        if self.is_all_selected(items) {
            SelectionState::All
        } else if self.is_some_selected(items) {
            SelectionState::Some
        } else {
            SelectionState::None
        }
    }

    /// Selected records of `items`, in the order of `items`
    pub fn selected_items<'a>(&self, items: &[&'a Record]) -> Vec<&'a Record> {
        items
            .iter()
            .enumerate()
            .filter(|(index, record)| {
                self.id_for(record, *index)
                    .map(|id| self.selected.contains(&id))
                    .unwrap_or(false)
            })
            .map(|(_, record)| *record)
            .collect()
    }

    /// Drop identifiers that are absent from `items`
    pub fn prune(&mut self, items: &[&Record]) -> usize {
        let present: HashSet<RecordId> = self.ids_for(items).into_iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| present.contains(id));
        let removed = before - self.selected.len();
        if removed > 0 {
            debug!(target: "selection", "pruned {} stale identifiers", removed);
        }
        removed
    }

    /// Raw identifier set, including identifiers no longer present anywhere
    pub fn raw_ids(&self) -> &HashSet<RecordId> {
        &self.selected
    }
}
