//! Typed errors for building operations and loading configuration
//!
//! The query pipeline itself has no failure path: every well-formed
//! [`Operation`](crate::core::operation::Operation) completes successfully,
//! and a query matching nothing is an empty result rather than an error.
//! The errors below only surface while *constructing* things from untrusted
//! input, such as filter objects and sort expressions taken from query
//! parameters, or a YAML configuration file.
//!
//! # Example
//!
//! ```rust,ignore
//! use paging::prelude::*;
//!
//! match FieldSorter::parse("amount:sideways") {
//!     Err(PagingError::InvalidSort { expression, .. }) => {
//!         println!("rejected sort expression {}", expression);
//!     }
//!     other => println!("{:?}", other),
//! }
//! ```

use thiserror::Error;

/// Errors raised while building operations or configuration
#[derive(Debug, Error)]
pub enum PagingError {
    /// A filter object could not be turned into field filters
    #[error("Invalid filter '{key}': {reason}")]
    InvalidFilter { key: String, reason: String },

    /// A sort expression was not `field`, `field:asc` or `field:desc`
    #[error("Invalid sort expression '{expression}': {reason}")]
    InvalidSort { expression: String, reason: String },

    /// A regular expression filter did not compile
    #[error("Invalid pattern for '{property}': {source}")]
    InvalidPattern {
        property: String,
        #[source]
        source: regex::Error,
    },

    /// The YAML configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl PagingError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PagingError::InvalidFilter { .. } => "INVALID_FILTER",
            PagingError::InvalidSort { .. } => "INVALID_SORT",
            PagingError::InvalidPattern { .. } => "INVALID_PATTERN",
            PagingError::Config(_) => "CONFIG_ERROR",
        }
    }

    pub(crate) fn invalid_filter(key: &str, reason: impl Into<String>) -> Self {
        PagingError::InvalidFilter {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_sort(expression: &str, reason: impl Into<String>) -> Self {
        PagingError::InvalidSort {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}
