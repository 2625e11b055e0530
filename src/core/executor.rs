//! The filter → sort → page pipeline
//!
//! Every stage works on the snapshot it was handed, never on the cache, so
//! one operation cannot affect what another sees.

use crate::core::dataset::Dataset;
use crate::core::operation::{ExecutionResult, Operation, ResultSet};
use crate::core::sorter::compare_all;

/// Runs one operation against one dataset snapshot
pub struct QueryExecutor;

impl QueryExecutor {
    /// Filter, sort and page `dataset` as `operation` describes
    ///
    /// Always completes successfully. A panicking filter or sorter is not
    /// caught.
    pub fn execute<R>(dataset: Dataset<R>, operation: &Operation<R>) -> ExecutionResult<R> {
        let dataset = Self::filter_stage(dataset, operation);
        let dataset = Self::sort_stage(dataset, operation);
        let dataset = Self::page_stage(dataset, operation);

        tracing::debug!(
            count = ?dataset.count,
            total = ?dataset.total,
            "Operation completed"
        );

        ExecutionResult {
            result_set: ResultSet::from(dataset),
            completed: true,
            successful: true,
        }
    }

    /// Keep records matching every filter; totals become the kept count
    fn filter_stage<R>(mut dataset: Dataset<R>, operation: &Operation<R>) -> Dataset<R> {
        if operation.filters.is_empty() {
            return dataset;
        }

        let scanned = dataset.records.len();
        dataset
            .records
            .retain(|record| operation.filters.iter().all(|f| f.matches(record)));

        let kept = dataset.records.len();
        dataset.total = Some(kept);
        dataset.total_records = Some(kept);

        tracing::debug!(scanned, kept, filters = operation.filters.len(), "Filter stage");
        dataset
    }

    fn sort_stage<R>(mut dataset: Dataset<R>, operation: &Operation<R>) -> Dataset<R> {
        if operation.sorters.is_empty() {
            return dataset;
        }

        dataset
            .records
            .sort_by(|a, b| compare_all(operation.sorters.as_slice(), &**a, &**b));

        tracing::debug!(sorters = operation.sorters.len(), "Sort stage");
        dataset
    }

    /// Slice to `[start, start + limit)`, clamped to the records available
    fn page_stage<R>(mut dataset: Dataset<R>, operation: &Operation<R>) -> Dataset<R> {
        let (Some(start), Some(limit)) = (operation.start, operation.limit) else {
            return dataset;
        };

        let len = dataset.records.len();
        let begin = start.min(len);
        let end = start.saturating_add(limit).min(len);

        dataset.records.truncate(end);
        dataset.records.drain(..begin);
        dataset.count = Some(dataset.records.len());

        tracing::debug!(start, limit, count = dataset.records.len(), "Page stage");
        dataset
    }
}
