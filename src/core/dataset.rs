//! Parsed dataset and the cache that hands out snapshots of it

use crate::core::reader::Reader;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

/// An ordered sequence of parsed records plus status metadata
///
/// Records are held behind `Arc` so that copying the sequence is shallow:
/// a new container pointing at the same records.
#[derive(Debug)]
pub struct Dataset<R> {
    /// The parsed records, in source order
    pub records: Vec<Arc<R>>,

    /// Number of records in this view
    pub count: Option<usize>,

    /// Authoritative number of records
    pub total: Option<usize>,

    /// Same as `total`, kept for grids that read this name
    pub total_records: Option<usize>,

    /// Status text from the reader
    pub message: Option<String>,

    /// Whether the reader considered the read successful
    pub success: bool,
}

impl<R> Dataset<R> {
    /// Build a dataset whose counts all equal the number of records
    pub fn from_records(records: Vec<Arc<R>>) -> Self {
        let len = records.len();
        Self {
            records,
            count: Some(len),
            total: Some(len),
            total_records: Some(len),
            message: None,
            success: true,
        }
    }

    /// Attach a status message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Shallow copy: new record container, same record references
    pub fn shallow_copy(&self) -> Self {
        Self {
            records: self.records.clone(),
            count: self.count,
            total: self.total,
            total_records: self.total_records,
            message: self.message.clone(),
            success: self.success,
        }
    }
}

// Manual impl so `R` needs no `Default`.
impl<R> Default for Dataset<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            count: None,
            total: None,
            total_records: None,
            message: None,
            success: false,
        }
    }
}

/// Holds exactly one parsed view of the source data
///
/// The dataset is only ever replaced wholesale by [`DatasetCache::load`];
/// every reader of the cache gets its own [`Dataset::shallow_copy`].
pub struct DatasetCache<R> {
    data: RwLock<Dataset<R>>,
}

impl<R> DatasetCache<R> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Dataset::default()),
        }
    }

    /// Parse `raw` through `reader` and replace the cached dataset
    ///
    /// Only a non-empty JSON array is loaded. Anything else (null, an empty
    /// array, an object, a scalar) leaves the previous dataset in place.
    /// Returns whether the cache was replaced.
    pub fn load<Rd>(&self, reader: &Rd, raw: &Value) -> bool
    where
        Rd: Reader<Record = R> + ?Sized,
    {
        let rows = match raw.as_array() {
            Some(rows) if !rows.is_empty() => rows,
            _ => {
                tracing::debug!(
                    kind = value_kind(raw),
                    "Ignoring load input that is not a non-empty array"
                );
                return false;
            }
        };

        let dataset = reader.read(rows);
        tracing::debug!(
            rows = rows.len(),
            records = dataset.records.len(),
            "Loaded dataset into cache"
        );

        // A poisoned lock still holds a whole dataset: replacement is one assignment.
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = dataset;
        true
    }

    /// Return a shallow copy of the cached dataset
    pub fn snapshot(&self) -> Dataset<R> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .shallow_copy()
    }

    /// Number of cached records
    pub fn len(&self) -> usize {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    /// Whether the cache holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R> Default for DatasetCache<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "empty array",
        Value::Object(_) => "object",
    }
}
