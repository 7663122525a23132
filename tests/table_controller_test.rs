#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use table_kit::data::preferences::{Preferences, TablePreferences};
    use table_kit::storage::key_value_store::{KeyValueStore, MemoryStore};
    use table_kit::{
        record, ControllerOptions, FieldValue, Record, RecordId, SelectionState, SelectionTracker,
        SortDirection, TableController,
    };

    fn people() -> Arc<Vec<Record>> {
        Arc::new(vec![
            record! { "id" => 1, "name" => "Ana", "age" => 30 },
            record! { "id" => 2, "name" => "Beto", "age" => 25 },
            record! { "id" => 3, "name" => "Carla", "age" => 25 },
        ])
    }

    fn names(records: &[&Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.get("name").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    fn sites(count: usize) -> Arc<Vec<Record>> {
        Arc::new(
            (1..=count)
                .map(|i| {
                    record! {
                        "id" => i,
                        "nombre" => format!("Sitio {}", i),
                        "region" => if i % 2 == 0 { "Costa" } else { "Sierra" },
                    }
                })
                .collect(),
        )
    }

    #[test]
    fn test_sort_toggle_is_stable() {
        let mut table = TableController::new(people(), ControllerOptions::default().with_page_size(2));

        table.handle_sort("age");
        let view = table.view();
        assert_eq!(names(&view.all_data), vec!["Beto", "Carla", "Ana"]);
        assert_eq!(names(&view.data), vec!["Beto", "Carla"]);
        assert_eq!(view.total_pages, 2);

        table.handle_page_change(2);
        assert_eq!(names(&table.data()), vec!["Ana"]);

        table.handle_sort("age");
        assert_eq!(table.state().sort_direction, SortDirection::Descending);
        assert_eq!(names(&table.all_data()), vec!["Ana", "Beto", "Carla"]);
    }

    #[test]
    fn test_switching_sort_key_starts_ascending() {
        let mut table = TableController::new(people(), ControllerOptions::default());
        table.handle_sort("age");
        table.handle_sort("age");
        table.handle_sort("name");

        assert_eq!(table.state().sort_key.as_deref(), Some("name"));
        assert_eq!(table.state().sort_direction, SortDirection::Ascending);
        assert_eq!(names(&table.all_data()), vec!["Ana", "Beto", "Carla"]);
    }

    #[test]
    fn test_search_matches_numbers_and_case() {
        let mut table = TableController::new(people(), ControllerOptions::default());

        table.handle_search("CARLA");
        assert_eq!(names(&table.all_data()), vec!["Carla"]);

        table.handle_search("25");
        assert_eq!(table.view().total_items, 2);

        // whitespace is a real term, only the empty term matches everything
        table.handle_search("   ");
        assert_eq!(table.view().total_items, 0);

        table.handle_search("");
        assert_eq!(table.view().total_items, 3);
    }

    #[test]
    fn test_search_keys_restrict_matching() {
        let options = ControllerOptions::default().with_search_keys(["name"]);
        let mut table = TableController::new(people(), options);

        table.handle_search("30");
        assert!(table.all_data().is_empty());
        assert_eq!(table.view().total_pages, 1);
    }

    #[test]
    fn test_empty_record_set() {
        let table = TableController::new(Arc::new(Vec::new()), ControllerOptions::default());
        let view = table.view();
        assert!(view.data.is_empty());
        assert_eq!(view.total_items, 0);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
    }

    #[test]
    fn test_pages_cover_every_record_once() {
        let mut table = TableController::new(sites(23), ControllerOptions::default().with_page_size(5));
        assert_eq!(table.total_pages(), 5);

        let mut seen = Vec::new();
        for page in 1..=table.total_pages() {
            table.handle_page_change(page);
            let data = table.data();
            assert!(data.len() <= 5);
            seen.extend(data.iter().map(|r| r.get("id").cloned()));
        }

        assert_eq!(seen.len(), 23);
        let expected: Vec<Option<FieldValue>> = (1..=23).map(|i| Some(FieldValue::from(i))).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_reset_filters_restores_initial_options() {
        let options = ControllerOptions::default()
            .with_page_size(4)
            .with_sort("nombre", SortDirection::Descending);
        let mut table = TableController::new(sites(10), options);

        table.handle_search("costa");
        table.handle_sort("region");
        table.handle_page_size_change(2);
        table.handle_page_change(2);

        table.reset_filters();
        let state = table.state();
        assert_eq!(state.search_term, "");
        assert_eq!(state.sort_key.as_deref(), Some("nombre"));
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(state.page_size, 4);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_select_all_is_scoped_to_filtered_view() {
        let mut table = TableController::new(sites(6), ControllerOptions::default());
        let mut selection = SelectionTracker::new();

        table.handle_search("costa");
        {
            let view = table.view();
            selection.select_all(&view.all_data);
            assert!(selection.is_all_selected(&view.all_data));
            assert_eq!(selection.state(&view.all_data), SelectionState::All);
        }

        table.handle_search("");
        let view = table.view();
        assert!(!selection.is_all_selected(&view.all_data));
        assert_eq!(selection.state(&view.all_data), SelectionState::Some);
        assert_eq!(selection.selected_count(&view.all_data), 3);

        let selected = selection.selected_items(&view.all_data);
        assert!(selected
            .iter()
            .all(|r| r.get("region") == Some(&FieldValue::from("Costa"))));
    }

    #[test]
    fn test_toggle_all_on_current_page() {
        let table = TableController::new(sites(6), ControllerOptions::default().with_page_size(4));
        let mut selection = SelectionTracker::new();
        let page = table.data();

        selection.toggle(RecordId::from(2));
        assert_eq!(selection.state(&page), SelectionState::Some);

        selection.toggle_all(&page);
        assert!(selection.is_all_selected(&page));

        selection.toggle_all(&page);
        assert_eq!(selection.selected_count(&page), 0);
        assert_eq!(selection.state(&page), SelectionState::None);
    }

    #[test]
    fn test_preferences_round_trip_through_controller() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        {
            let prefs = Preferences::new(store.clone(), "sites");
            let mut table = TableController::with_preferences(sites(30), ControllerOptions::default(), prefs);
            table.handle_page_size_change(25);
            table.handle_sort("nombre");
            table.handle_sort("nombre");
            table.handle_search("Sierra");
        }

        let raw = store.get("table_prefs:sites").unwrap().unwrap();
        let saved: TablePreferences = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved.page_size, 25);
        assert_eq!(saved.sort_key.as_deref(), Some("nombre"));
        assert_eq!(saved.sort_direction, SortDirection::Descending);
        assert!(!raw.contains("Sierra"));

        let prefs = Preferences::new(store.clone(), "sites");
        let table = TableController::with_preferences(sites(30), ControllerOptions::default(), prefs);
        let state = table.state();
        assert_eq!(state.page_size, 25);
        assert_eq!(state.sort_key.as_deref(), Some("nombre"));
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(state.search_term, "");
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_corrupt_preferences_fall_back_to_options() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set("table_prefs:guides", "{not json").unwrap();

        let prefs = Preferences::new(store.clone(), "guides");
        let table = TableController::with_preferences(
            sites(3),
            ControllerOptions::default().with_page_size(7),
            prefs,
        );
        assert_eq!(table.state().page_size, 7);
        assert_eq!(table.state().sort_key, None);
    }

    #[test]
    fn test_preferences_survive_full_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_quota(8));
        let prefs = Preferences::new(store.clone(), "activities");
        let mut table = TableController::with_preferences(sites(12), ControllerOptions::default(), prefs);

        table.handle_page_size_change(5);
        assert_eq!(table.state().page_size, 5);
        assert_eq!(table.total_pages(), 3);
        assert_eq!(store.get("table_prefs:activities").unwrap(), None);
    }
}
