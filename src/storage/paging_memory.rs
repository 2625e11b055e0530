//! In-memory paged source: parse once, answer every page from the cache

use crate::config::ProxyConfig;
use crate::core::dataset::{Dataset, DatasetCache};
use crate::core::executor::QueryExecutor;
use crate::core::operation::{ExecutionResult, Operation};
use crate::core::reader::{JsonReader, Reader};
use crate::core::service::PagedSource;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Serves paged reads over a dataset parsed a single time
///
/// Pulling the whole dataset through the reader for every page is wasteful
/// when the data does not change, so rows go through the reader only on
/// [`load`](Self::load). Each read then works on a shallow snapshot.
pub struct PagingMemoryProxy<Rd: Reader> {
    reader: Rd,
    cache: DatasetCache<Rd::Record>,
}

impl<Rd: Reader> PagingMemoryProxy<Rd> {
    /// Create a proxy with an empty dataset
    pub fn new(reader: Rd) -> Self {
        Self {
            reader,
            cache: DatasetCache::new(),
        }
    }

    /// Create a proxy and load the configured initial data
    pub fn with_config(reader: Rd, config: &ProxyConfig) -> Self {
        let proxy = Self::new(reader);
        if let Some(data) = &config.data {
            proxy.load(data);
        }
        proxy
    }

    /// Replace the dataset with `raw` rows, see [`DatasetCache::load`]
    pub fn load(&self, raw: &Value) -> bool {
        self.cache.load(&self.reader, raw)
    }

    /// Shallow copy of the current dataset
    pub fn snapshot(&self) -> Dataset<Rd::Record> {
        self.cache.snapshot()
    }

    /// Number of records currently cached
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Run `operation` against a fresh snapshot
    pub fn read(&self, operation: &Operation<Rd::Record>) -> ExecutionResult<Rd::Record> {
        tracing::debug!(?operation, "Reading from paging memory proxy");
        QueryExecutor::execute(self.snapshot(), operation)
    }

    /// Run `operation`, then hand the result to `callback`
    ///
    /// Whatever the callback captures is its context. It runs after the
    /// whole pipeline has finished, before this call returns.
    pub fn execute<F, T>(&self, operation: &Operation<Rd::Record>, callback: F) -> T
    where
        F: FnOnce(ExecutionResult<Rd::Record>) -> T,
    {
        callback(self.read(operation))
    }
}

impl<T> PagingMemoryProxy<JsonReader<T>>
where
    T: DeserializeOwned + Send + Sync,
{
    /// Proxy with a [`JsonReader`] built from `config`, initial data loaded
    pub fn from_config(config: &ProxyConfig) -> Self {
        Self::with_config(JsonReader::from_config(&config.reader), config)
    }
}

#[async_trait]
impl<Rd> PagedSource<Rd::Record> for PagingMemoryProxy<Rd>
where
    Rd: Reader,
    Rd::Record: 'static,
{
    async fn read(&self, operation: Operation<Rd::Record>) -> ExecutionResult<Rd::Record> {
        let result = PagingMemoryProxy::read(self, &operation);
        // Hand the result back on a later turn, like a remote source would.
        tokio::task::yield_now().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{FieldFilter, FilterOperator};
    use crate::core::sorter::FieldSorter;
    use serde_json::json;

    fn proxy() -> PagingMemoryProxy<JsonReader<Value>> {
        let proxy = PagingMemoryProxy::new(JsonReader::new());
        proxy.load(&json!([
            {"number": "ORD-1", "status": "open", "amount": 50},
            {"number": "ORD-2", "status": "paid", "amount": 150},
            {"number": "ORD-3", "status": "open", "amount": 250},
            {"number": "ORD-4", "status": "open", "amount": 100},
        ]));
        proxy
    }

    fn numbers(result: &ExecutionResult<Value>) -> Vec<&str> {
        result
            .result_set
            .records
            .iter()
            .map(|r| r["number"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_read_full_pipeline() {
        let proxy = proxy();
        let operation = Operation::new()
            .filter(FieldFilter::new("status", FilterOperator::Eq, json!("open")))
            .sort(FieldSorter::desc("amount"))
            .window(0, 2);

        let result = proxy.read(&operation);

        assert_eq!(numbers(&result), vec!["ORD-3", "ORD-4"]);
        assert_eq!(result.result_set.count, Some(2));
        assert_eq!(result.result_set.total, Some(3));
        assert!(result.completed && result.successful);
    }

    #[test]
    fn test_read_does_not_touch_cache() {
        let proxy = proxy();
        let operation = Operation::new()
            .filter(FieldFilter::new("status", FilterOperator::Eq, json!("paid")))
            .sort(FieldSorter::desc("amount"));

        proxy.read(&operation);

        let snapshot = proxy.snapshot();
        assert_eq!(snapshot.records.len(), 4);
        assert_eq!(snapshot.records[0]["number"], "ORD-1");
        assert_eq!(snapshot.total, Some(4));
    }

    #[test]
    fn test_execute_invokes_callback_with_context() {
        let proxy = proxy();
        let mut seen = Vec::new();

        let returned = proxy.execute(&Operation::new().window(1, 2), |result| {
            seen.extend(result.result_set.records.iter().cloned());
            result.successful
        });

        assert!(returned);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0]["number"], "ORD-2");
    }

    #[test]
    fn test_with_config_loads_initial_data() {
        let config = ProxyConfig {
            data: Some(json!([{"x": 1}, {"x": 2}])),
            ..Default::default()
        };

        let proxy = PagingMemoryProxy::<JsonReader<Value>>::from_config(&config);
        assert_eq!(proxy.len(), 2);
    }

    #[test]
    fn test_with_config_without_data_is_empty() {
        let proxy = PagingMemoryProxy::<JsonReader<Value>>::from_config(&ProxyConfig::default());

        assert!(proxy.is_empty());
        let result = proxy.read(&Operation::new().window(0, 10));
        assert!(result.result_set.records.is_empty());
        assert!(result.successful);
    }

    #[tokio::test]
    async fn test_paged_source_read() {
        let proxy = proxy();
        let operation = Operation::new().sort(FieldSorter::asc("amount")).window(0, 1);

        let result = PagedSource::read(&proxy, operation).await;

        assert_eq!(numbers(&result), vec!["ORD-1"]);
        assert_eq!(result.result_set.total, Some(4));
    }
}
