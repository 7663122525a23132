use crate::data::record::Record;
use tracing::trace;

/// Case-insensitive substring search across record fields
pub struct SearchFilter;

impl SearchFilter {
    /// Keep records where any checked field contains `term`
    ///
    /// An empty term returns every record in input order. When `keys` is
    /// `None` the fields of the first record are checked. Null and missing
    /// fields never match.
    pub fn filter<'a>(records: &'a [Record], term: &str, keys: Option<&[String]>) -> Vec<&'a Record> {
        Self::filter_refs(records.iter(), term, keys)
    }

    /// Same as [`SearchFilter::filter`] over borrowed records
    pub fn filter_refs<'a, I>(records: I, term: &str, keys: Option<&[String]>) -> Vec<&'a Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let records: Vec<&'a Record> = records.into_iter().collect();
        if term.is_empty() {
            return records;
        }

        let default_keys: Vec<String>;
        let keys: &[String] = match keys {
            Some(keys) => keys,
            None => {
                default_keys = records
                    .first()
                    .map(|r| r.keys().map(|k| k.to_string()).collect())
                    .unwrap_or_default();
                &default_keys
            }
        };

        let needle = term.to_lowercase();
        let matched: Vec<&'a Record> = records
            .into_iter()
            .filter(|record| Self::matches(record, &needle, keys))
            .collect();

        trace!(target: "table", "search '{}' over {} keys matched {} records", term, keys.len(), matched.len());
        matched
    }

    /// Whether any of `keys` on `record` contains the already lowercased `needle`
    pub fn matches(record: &Record, needle: &str, keys: &[String]) -> bool {
        keys.iter().any(|key| {
            record
                .get(key)
                .and_then(|value| value.search_text())
                .map(|text| text.contains(needle))
                .unwrap_or(false)
        })
    }
}
