//! Key-value persistence and record collections built on it

pub mod key_value_store;
pub mod record_store;
