//! Read operations and the results they produce

use crate::core::dataset::Dataset;
use crate::core::filter::Filter;
use crate::core::query::PaginationMeta;
use crate::core::sorter::Sorter;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A paged read request: filters, sort order and page window
///
/// Built fresh by the caller for every request.
///
/// # Example
/// ```rust,ignore
/// let operation = Operation::new()
///     .filter(FieldFilter::new("status", FilterOperator::Eq, json!("active")))
///     .sort(FieldSorter::desc("amount"))
///     .page(2, 25);
/// ```
pub struct Operation<R> {
    /// Combined with logical AND
    pub filters: Vec<Box<dyn Filter<R>>>,

    /// Combined lexicographically, first sorter has precedence
    pub sorters: Vec<Box<dyn Sorter<R>>>,

    /// Offset of the first record of the page
    pub start: Option<usize>,

    /// Maximum number of records in the page
    pub limit: Option<usize>,
}

impl<R> Operation<R> {
    /// Operation returning every record unchanged
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sorters: Vec::new(),
            start: None,
            limit: None,
        }
    }

    /// Add a filter
    pub fn filter(mut self, filter: impl Filter<R> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Add a sorter with lower precedence than those already added
    pub fn sort(mut self, sorter: impl Sorter<R> + 'static) -> Self {
        self.sorters.push(Box::new(sorter));
        self
    }

    /// Set the page window as an offset and a limit
    pub fn window(mut self, start: usize, limit: usize) -> Self {
        self.start = Some(start);
        self.limit = Some(limit);
        self
    }

    /// Set the page window from a 1-based page number
    pub fn page(self, page: usize, page_size: usize) -> Self {
        let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
        self.window(start, page_size)
    }

    /// Whether both page bounds are present
    pub fn is_paged(&self) -> bool {
        self.start.is_some() && self.limit.is_some()
    }
}

impl<R> Default for Operation<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Operation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("filters", &self.filters.len())
            .field("sorters", &self.sorters.len())
            .field("start", &self.start)
            .field("limit", &self.limit)
            .finish()
    }
}

/// The records of one page plus counts and status
#[derive(Debug, Serialize)]
pub struct ResultSet<R> {
    /// Filtered, sorted and paged records
    pub records: Vec<Arc<R>>,

    /// Number of records after paging
    pub count: Option<usize>,

    /// Number of records after filtering, before paging
    pub total: Option<usize>,

    /// Same as `total`
    pub total_records: Option<usize>,

    /// Status text carried over from the dataset
    pub message: Option<String>,

    /// Outcome flag carried over from the dataset
    pub success: bool,
}

impl<R> ResultSet<R> {
    /// Pagination metadata for this page
    ///
    /// Uses `total` when known, the number of records otherwise.
    pub fn pagination(&self, page: usize, limit: usize) -> PaginationMeta {
        let total = self.total.unwrap_or(self.records.len());
        PaginationMeta::new(page.max(1), limit, total)
    }
}

impl<R> From<Dataset<R>> for ResultSet<R> {
    fn from(dataset: Dataset<R>) -> Self {
        Self {
            records: dataset.records,
            count: dataset.count,
            total: dataset.total,
            total_records: dataset.total_records,
            message: dataset.message,
            success: dataset.success,
        }
    }
}

/// What a read hands back to the caller
#[derive(Debug)]
pub struct ExecutionResult<R> {
    pub result_set: ResultSet<R>,
    pub completed: bool,
    pub successful: bool,
}
