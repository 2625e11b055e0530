//! Core module containing the dataset cache, operations and the query pipeline

pub mod dataset;
pub mod error;
pub mod executor;
pub mod field;
pub mod filter;
pub mod operation;
pub mod query;
pub mod reader;
pub mod service;
pub mod sorter;

pub use dataset::{Dataset, DatasetCache};
pub use error::PagingError;
pub use executor::QueryExecutor;
pub use field::Fields;
pub use filter::{FieldFilter, Filter, FilterOperator};
pub use operation::{ExecutionResult, Operation, ResultSet};
pub use query::{PaginatedResponse, PaginationMeta, QueryParams};
pub use reader::{JsonReader, Reader};
pub use service::PagedSource;
pub use sorter::{Direction, FieldSorter, Sorter};
