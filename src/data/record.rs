use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

/// Largest integer an f64 holds exactly; beyond it numbers serialize as floats
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A single field value in a record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text used for substring search; nulls never match
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            other => Some(other.to_string().to_lowercase()),
        }
    }

    /// Numeric reading of the value, parsing strings when they look numeric
    pub fn numeric(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// Infer a typed value from raw text (CSV cells, form inputs)
    pub fn infer_from_str(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("null") {
            return FieldValue::Null;
        }

        if value.eq_ignore_ascii_case("true") {
            return FieldValue::Boolean(true);
        }
        if value.eq_ignore_ascii_case("false") {
            return FieldValue::Boolean(false);
        }

        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::String(value.to_string()),
        }
    }

    /// Convert a JSON value; nested arrays and objects are kept as their JSON text
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => FieldValue::Null,
            JsonValue::Bool(b) => FieldValue::Boolean(*b),
            JsonValue::Number(n) => n
                .as_f64()
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::String(n.to_string())),
            JsonValue::String(s) => FieldValue::String(s.clone()),
            other => FieldValue::String(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// One row of tabular data: field name to value, in the record's natural key order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.shift_remove(key)
    }

    /// Field value, with explicit nulls reported as absent
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy of the record restricted to `columns`, in the given column order
    pub fn project(&self, columns: &[String]) -> Record {
        let fields = columns
            .iter()
            .map(|c| {
                let value = self.fields.get(c).cloned().unwrap_or(FieldValue::Null);
                (c.clone(), value)
            })
            .collect();
        Record { fields }
    }

    /// Overwrite fields with those of `other`, keeping fields `other` lacks
    pub fn merge(&mut self, other: &Record) {
        for (key, value) in other.iter() {
            self.fields.insert(key.to_string(), value.clone());
        }
    }

    /// Build a record from a JSON object; anything else yields `None`
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        let obj = value.as_object()?;
        let fields = obj
            .iter()
            .map(|(k, v)| (k.clone(), FieldValue::from_json(v)))
            .collect();
        Some(Record { fields })
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Build a [`Record`] from `key => value` pairs
#[macro_export]
macro_rules! record {
    () => {
        $crate::data::record::Record::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::data::record::Record::new();
        $(record.insert($key, $value);)+
        record
    }};
}

/// Identity of a record for selection purposes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordId {
    /// Value of an explicit identifier field, rendered as text
    Key(String),
    /// Position within the tracked collection
    Index(usize),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordId::Key(k) => write!(f, "{}", k),
            RecordId::Index(i) => write!(f, "#{}", i),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Key(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Key(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Key(value.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Key(value.to_string())
    }
}

/// How record identity is derived
///
/// Positional identity is only stable while the ordering of the tracked
/// collection does not change. Prefer [`IdentityStrategy::Field`] when records
/// carry a real identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityStrategy {
    /// Use the field, falling back to the position in the tracked collection
    FieldOrPosition(String),
    /// Use the field only; records without it cannot be identified
    Field(String),
}

impl Default for IdentityStrategy {
    fn default() -> Self {
        IdentityStrategy::FieldOrPosition("id".to_string())
    }
}

impl IdentityStrategy {
    pub fn id_for(&self, record: &Record, index: usize) -> Option<RecordId> {
        match self {
            IdentityStrategy::FieldOrPosition(field) => Some(
                record
                    .get(field)
                    .map(|v| RecordId::Key(v.to_string()))
                    .unwrap_or(RecordId::Index(index)),
            ),
            IdentityStrategy::Field(field) => record.get(field).map(|v| RecordId::Key(v.to_string())),
        }
    }
}
