use crate::data::record::Record;
use crate::data::value_compare::compare_nulls_last;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortDirection::Descending
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// Single-key stable ordering of records
pub struct Sorter;

impl Sorter {
    /// Order `records` by the field `key`
    ///
    /// With no key the input is returned untouched. Equal keys keep their
    /// input order and null or missing values sort last in both directions.
    pub fn sort<'a>(mut records: Vec<&'a Record>, key: Option<&str>, direction: SortDirection) -> Vec<&'a Record> {
        let Some(key) = key else {
            return records;
        };

        let descending = direction.is_descending();
        // Vec::sort_by is stable
        records.sort_by(|a, b| compare_nulls_last(a.get(key), b.get(key), descending));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::FieldValue;
    use crate::record;

    fn names(records: &[&Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.get("name").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    fn people() -> Vec<Record> {
        vec![
            record! { "id" => 1, "name" => "Ana", "age" => 30 },
            record! { "id" => 2, "name" => "Beto", "age" => 25 },
            record! { "id" => 3, "name" => "Carla", "age" => 25 },
        ]
    }

    #[test]
    fn test_no_key_returns_input() {
        let data = people();
        let sorted = Sorter::sort(data.iter().collect(), None, SortDirection::Descending);
        assert_eq!(names(&sorted), vec!["Ana", "Beto", "Carla"]);
    }

    #[test]
    fn test_stable_ascending_and_descending() {
        let data = people();
        let asc = Sorter::sort(data.iter().collect(), Some("age"), SortDirection::Ascending);
        assert_eq!(names(&asc), vec!["Beto", "Carla", "Ana"]);

        let desc = Sorter::sort(data.iter().collect(), Some("age"), SortDirection::Descending);
        assert_eq!(names(&desc), vec!["Ana", "Beto", "Carla"]);
    }

    #[test]
    fn test_nulls_sort_last_regardless_of_direction() {
        let data = vec![
            record! { "name" => "gap", "price" => FieldValue::Null },
            record! { "name" => "cheap", "price" => 10 },
            record! { "name" => "missing" },
            record! { "name" => "pricey", "price" => 90 },
        ];

        let asc = Sorter::sort(data.iter().collect(), Some("price"), SortDirection::Ascending);
        assert_eq!(names(&asc), vec!["cheap", "pricey", "gap", "missing"]);

        let desc = Sorter::sort(data.iter().collect(), Some("price"), SortDirection::Descending);
        assert_eq!(names(&desc), vec!["pricey", "cheap", "gap", "missing"]);
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        let data = vec![
            record! { "name" => "b", "n" => 100 },
            record! { "name" => "a", "n" => 9 },
        ];
        let asc = Sorter::sort(data.iter().collect(), Some("n"), SortDirection::Ascending);
        assert_eq!(names(&asc), vec!["a", "b"]);
    }

    #[test]
    fn test_direction_toggle_and_serde() {
        assert_eq!(SortDirection::Ascending.toggle(), SortDirection::Descending);
        assert_eq!(
            serde_json::to_string(&SortDirection::Descending).unwrap(),
            "\"desc\""
        );
    }
}
