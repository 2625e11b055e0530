//! Query parameters and pagination utilities

use crate::config::ProxyConfig;
use crate::core::error::PagingError;
use crate::core::filter::FieldFilter;
use crate::core::operation::Operation;
use crate::core::sorter::FieldSorter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters for pagination, filtering and sorting
///
/// This is the shape a grid sends for each page request. `page` and `limit`
/// default to the first page of the configured page size.
///
/// # Example
/// ```rust,ignore
/// // page=2&limit=10
/// // filter={"status": "active", "amount>": 100}
/// // sort=created_at:desc,number
/// let operation = params.into_operation(&config)?;
/// let result = proxy.read(operation);
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: Option<usize>,

    /// Number of items per page
    pub limit: Option<usize>,

    /// Filters as a JSON object string
    ///
    /// # Format
    /// - Exact match: `{"field": "value"}`
    /// - Comparison: `{"field>": value, "field<": value, "field>=": value, "field<=": value}`
    /// - Not equal: `{"field!=": value}`
    /// - Substring: `{"field~": "text"}`, regular expression: `{"field=~": "^A"}`
    pub filter: Option<String>,

    /// Sort fields and directions, comma separated
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub sort: Option<String>,
}

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Get limit, falling back to the page size and capped by the maximum
    pub fn limit(&self, config: &ProxyConfig) -> usize {
        self.limit
            .unwrap_or(config.page_size)
            .clamp(1, config.max_page_size.max(1))
    }

    /// Parse filter JSON string into Value
    pub fn filter_value(&self) -> Result<Option<Value>, PagingError> {
        self.filter
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                serde_json::from_str(s)
                    .map_err(|e| PagingError::invalid_filter(s, format!("not valid JSON: {}", e)))
            })
            .transpose()
    }

    /// Build the read operation these parameters describe
    pub fn into_operation(&self, config: &ProxyConfig) -> Result<Operation<Value>, PagingError> {
        let mut operation = Operation::new();

        if let Some(filter) = self.filter_value()? {
            for field_filter in FieldFilter::from_json(&filter)? {
                operation = operation.filter(field_filter);
            }
        }

        if let Some(sort) = &self.sort {
            for sorter in FieldSorter::parse_list(sort)? {
                operation = operation.sort(sorter);
            }
        }

        Ok(operation.page(self.page(), self.limit(config)))
    }
}

/// Paginated response structure
///
/// This structure wraps paginated data with metadata about pagination state.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let page = page.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}
