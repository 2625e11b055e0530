//! Readers turn raw rows into a parsed [`Dataset`]

use crate::config::ReaderConfig;
use crate::core::dataset::Dataset;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Parses raw rows into records
///
/// A reader is called once per load, never per page request. It must be
/// total: whatever the input, it produces a dataset (possibly empty).
pub trait Reader: Send + Sync {
    /// The record type produced by this reader
    type Record: Send + Sync;

    /// Parse `rows` into a dataset
    fn read(&self, rows: &[Value]) -> Dataset<Self::Record>;
}

/// Reader deserializing each row into `T` with serde
///
/// Rows that do not deserialize are dropped and counted in the dataset
/// message; the rest of the load still succeeds.
///
/// # Example
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct Order { number: String, amount: f64 }
///
/// let reader = JsonReader::<Order>::new().with_record_path("/order");
/// ```
pub struct JsonReader<T> {
    record_path: Option<String>,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonReader<T> {
    /// Reader taking each row as the record itself
    pub fn new() -> Self {
        Self {
            record_path: None,
            _record: PhantomData,
        }
    }

    /// Reader built from configuration
    pub fn from_config(config: &ReaderConfig) -> Self {
        Self {
            record_path: config.record.clone(),
            _record: PhantomData,
        }
    }

    /// Locate the record inside each row with a JSON pointer (e.g. `/data`)
    pub fn with_record_path(mut self, path: impl Into<String>) -> Self {
        self.record_path = Some(path.into());
        self
    }

    fn locate<'a>(&self, row: &'a Value) -> Option<&'a Value> {
        match &self.record_path {
            Some(path) => row.pointer(path),
            None => Some(row),
        }
    }
}

impl<T> Default for JsonReader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Reader for JsonReader<T>
where
    T: DeserializeOwned + Send + Sync,
{
    type Record = T;

    fn read(&self, rows: &[Value]) -> Dataset<T> {
        let mut records = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;

        for (index, row) in rows.iter().enumerate() {
            let Some(raw) = self.locate(row) else {
                tracing::warn!(
                    index,
                    path = ?self.record_path,
                    "Row has no record at path, skipping"
                );
                skipped += 1;
                continue;
            };

            match T::deserialize(raw) {
                Ok(record) => records.push(Arc::new(record)),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Row failed to deserialize, skipping");
                    skipped += 1;
                }
            }
        }

        let dataset = Dataset::from_records(records);
        if skipped > 0 {
            dataset.with_message(format!("{} of {} rows skipped", skipped, rows.len()))
        } else {
            dataset
        }
    }
}
