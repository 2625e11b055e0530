//! Service trait for paged data sources

use crate::core::operation::{ExecutionResult, Operation};
use async_trait::async_trait;

/// A source answering paged read operations
///
/// This is the contract a grid uses whether pages come from a remote
/// backend or from an in-memory dataset. The result is handed back only
/// after the whole read has run.
#[async_trait]
pub trait PagedSource<R>: Send + Sync {
    /// Run one read operation
    async fn read(&self, operation: Operation<R>) -> ExecutionResult<R>;
}
