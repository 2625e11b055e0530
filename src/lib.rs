//! # Paging Memory
//!
//! Paged, filtered and sorted reads over an in-memory dataset, served through
//! the same contract as a remote paged source.
//!
//! ## Features
//!
//! - **Parse Once**: Raw rows go through the reader on load, never per page
//! - **Snapshot Reads**: Every read works on a shallow copy of the cached records
//! - **Fixed Pipeline**: Filter, then sort, then page, with accurate totals
//! - **Closures or Fields**: Filters and sorters are plain closures, or
//!   field-based helpers parsed from query parameters
//! - **Configuration-Based**: Page sizes, reader settings and initial data via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paging::prelude::*;
//!
//! let proxy = PagingMemoryProxy::new(JsonReader::<Value>::new());
//! proxy.load(&json!([
//!     {"number": "ORD-1", "status": "open", "amount": 50},
//!     {"number": "ORD-2", "status": "paid", "amount": 150},
//! ]));
//!
//! let operation = Operation::new()
//!     .filter(FieldFilter::new("status", FilterOperator::Eq, json!("open")))
//!     .sort(FieldSorter::desc("amount"))
//!     .page(1, 25);
//!
//! proxy.execute(&operation, |result| {
//!     println!("{} of {:?}", result.result_set.records.len(), result.result_set.total);
//! });
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        dataset::{Dataset, DatasetCache},
        error::PagingError,
        executor::QueryExecutor,
        field::Fields,
        filter::{FieldFilter, Filter, FilterOperator},
        operation::{ExecutionResult, Operation, ResultSet},
        query::{PaginatedResponse, PaginationMeta, QueryParams},
        reader::{JsonReader, Reader},
        service::PagedSource,
        sorter::{Direction, FieldSorter, Sorter},
    };

    // === Storage ===
    pub use crate::storage::PagingMemoryProxy;

    // === Config ===
    pub use crate::config::{ProxyConfig, ReaderConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
