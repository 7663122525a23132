use crate::config::config::TableConfig;
use crate::data::paginator::Paginator;
use crate::data::preferences::{Preferences, TablePreferences};
use crate::data::record::Record;
use crate::data::search_filter::SearchFilter;
use crate::data::sorter::{SortDirection, Sorter};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Search, sort and pagination configuration applied to a record set
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub search_term: String,
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
    /// 1-based
    pub current_page: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    fn preferences(&self) -> TablePreferences {
        TablePreferences {
            page_size: self.page_size,
            sort_key: self.sort_key.clone(),
            sort_direction: self.sort_direction,
        }
    }

    fn apply_preferences(&mut self, prefs: TablePreferences) {
        self.page_size = prefs.page_size.max(1);
        self.sort_key = prefs.sort_key;
        self.sort_direction = prefs.sort_direction;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(TableConfig::default().default_page_size)
    }
}

/// Caller configuration for a [`TableController`]
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub initial_page_size: usize,
    /// Fields searched; `None` searches the fields of the first record
    pub search_keys: Option<Vec<String>>,
    pub initial_sort_key: Option<String>,
    pub initial_sort_direction: SortDirection,
}

impl ControllerOptions {
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            initial_page_size: config.default_page_size,
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.initial_page_size = page_size;
        self
    }

    pub fn with_search_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.search_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.initial_sort_key = Some(key.into());
        self.initial_sort_direction = direction;
        self
    }

    fn initial_state(&self) -> ViewState {
        ViewState {
            sort_key: self.initial_sort_key.clone(),
            sort_direction: self.initial_sort_direction,
            ..ViewState::new(self.initial_page_size)
        }
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            initial_page_size: TableConfig::default().default_page_size,
            search_keys: None,
            initial_sort_key: None,
            initial_sort_direction: SortDirection::Ascending,
        }
    }
}

/// The derived view: current page plus the full filtered and sorted collection
#[derive(Debug, Clone)]
pub struct ViewResult<'a> {
    /// Records on the current page
    pub data: Vec<&'a Record>,
    /// Every record passing the search, in sorted order
    pub all_data: Vec<&'a Record>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

/// Filter, sort and paginate `records` according to `state`
///
/// Pure; callers re-derive after every state change.
pub fn derive_view<'a>(records: &'a [Record], state: &ViewState, search_keys: Option<&[String]>) -> ViewResult<'a> {
    let filtered = SearchFilter::filter(records, &state.search_term, search_keys);
    let all_data = Sorter::sort(filtered, state.sort_key.as_deref(), state.sort_direction);
    let page = Paginator::paginate(&all_data, state.current_page, state.page_size);

    trace!(
        target: "table",
        "derived page {}/{} ({} of {} records)",
        page.page,
        page.total_pages,
        page.items.len(),
        page.total_items
    );

    ViewResult {
        data: page.items,
        total_items: all_data.len(),
        total_pages: page.total_pages,
        current_page: state.current_page,
        page_size: page.page_size,
        all_data,
    }
}

/// Owns a [`ViewState`] over a shared record set and exposes its mutations
pub struct TableController {
    source: Arc<Vec<Record>>,
    state: ViewState,
    defaults: ViewState,
    search_keys: Option<Vec<String>>,
    preferences: Option<Preferences>,
}

impl TableController {
    pub fn new(source: Arc<Vec<Record>>, options: ControllerOptions) -> Self {
        let defaults = options.initial_state();
        Self {
            source,
            state: defaults.clone(),
            defaults,
            search_keys: options.search_keys,
            preferences: None,
        }
    }

    /// Controller whose page size and sort are restored from and saved to `preferences`
    pub fn with_preferences(source: Arc<Vec<Record>>, options: ControllerOptions, preferences: Preferences) -> Self {
        let mut controller = Self::new(source, options);
        if let Some(prefs) = preferences.load() {
            debug!(target: "table", "Restored preferences from '{}'", preferences.storage_key());
            controller.state.apply_preferences(prefs);
        }
        controller.preferences = Some(preferences);
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn records(&self) -> &Arc<Vec<Record>> {
        &self.source
    }

    /// Replace the record set, keeping the current page in range
    pub fn set_records(&mut self, source: Arc<Vec<Record>>) {
        self.source = source;
        let count = self.filtered_count();
        self.state.current_page = Paginator::clamp_page(self.state.current_page, count, self.state.page_size);
    }

    pub fn view(&self) -> ViewResult<'_> {
        derive_view(&self.source, &self.state, self.search_keys.as_deref())
    }

    /// Records on the current page
    pub fn data(&self) -> Vec<&Record> {
        self.view().data
    }

    /// Full filtered and sorted collection
    pub fn all_data(&self) -> Vec<&Record> {
        self.view().all_data
    }

    pub fn total_pages(&self) -> usize {
        Paginator::total_pages(self.filtered_count(), self.state.page_size)
    }

    pub fn handle_search(&mut self, term: &str) {
        self.state.search_term = term.to_string();
        self.state.current_page = 1;
        debug!(target: "table", "search term set to '{}'", term);
    }

    /// Sort by `key`, flipping the direction when it is already the sort key
    pub fn handle_sort(&mut self, key: &str) {
        if self.state.sort_key.as_deref() == Some(key) {
            self.state.sort_direction = self.state.sort_direction.toggle();
        } else {
            self.state.sort_key = Some(key.to_string());
            self.state.sort_direction = SortDirection::Ascending;
        }
        debug!(target: "table", "sorting by {} {}", key, self.state.sort_direction);
        self.persist();
    }

    pub fn handle_page_change(&mut self, page: usize) {
        let clamped = Paginator::clamp_page(page, self.filtered_count(), self.state.page_size);
        if clamped != page {
            trace!(target: "table", "page {} clamped to {}", page, clamped);
        }
        self.state.current_page = clamped;
    }

    pub fn handle_page_size_change(&mut self, size: usize) {
        if size == 0 {
            warn!(target: "table", "Ignoring page size of 0");
            return;
        }
        self.state.page_size = size;
        self.state.current_page = 1;
        self.persist();
    }

    /// Restore every view setting to the controller's initial defaults
    pub fn reset_filters(&mut self) {
        self.state = self.defaults.clone();
        self.persist();
    }

    fn filtered_count(&self) -> usize {
        SearchFilter::filter(&self.source, &self.state.search_term, self.search_keys.as_deref()).len()
    }

    fn persist(&self) {
        if let Some(preferences) = &self.preferences {
            preferences.save(&self.state.preferences());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    fn controller(page_size: usize) -> TableController {
        let records = (1..=12)
            .map(|i| record! { "id" => i, "name" => format!("site {}", i) })
            .collect();
        TableController::new(Arc::new(records), ControllerOptions::default().with_page_size(page_size))
    }

    #[test]
    fn test_search_resets_page() {
        let mut table = controller(5);
        table.handle_page_change(3);
        assert_eq!(table.state().current_page, 3);

        table.handle_search("site 1");
        assert_eq!(table.state().current_page, 1);
        // site 1, 10, 11, 12
        assert_eq!(table.view().total_items, 4);
    }

    #[test]
    fn test_sort_does_not_reset_page() {
        let mut table = controller(5);
        table.handle_page_change(2);
        table.handle_sort("name");
        assert_eq!(table.state().current_page, 2);
    }

    #[test]
    fn test_page_change_is_clamped() {
        let mut table = controller(5);
        table.handle_page_change(0);
        assert_eq!(table.state().current_page, 1);
        table.handle_page_change(42);
        assert_eq!(table.state().current_page, 3);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut table = controller(5);
        table.handle_page_change(3);
        table.handle_page_size_change(4);
        assert_eq!(table.state().current_page, 1);
        assert_eq!(table.total_pages(), 3);

        table.handle_page_size_change(0);
        assert_eq!(table.state().page_size, 4);
    }

    #[test]
    fn test_set_records_clamps_page() {
        let mut table = controller(5);
        table.handle_page_change(3);
        table.set_records(Arc::new(vec![record! { "id" => 1 }]));
        assert_eq!(table.state().current_page, 1);
        assert_eq!(table.data().len(), 1);
    }

    #[test]
    fn test_all_data_spans_pages() {
        let table = controller(5);
        assert_eq!(table.data().len(), 5);
        assert_eq!(table.all_data().len(), 12);
    }
}
