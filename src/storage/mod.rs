//! Paged source implementations

pub mod paging_memory;

pub use paging_memory::PagingMemoryProxy;
