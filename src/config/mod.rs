//! Configuration loading and management

use crate::core::error::PagingError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration for the reader that parses raw rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// JSON pointer locating the record inside each row (e.g. `/data`)
    #[serde(default)]
    pub record: Option<String>,
}

/// Complete configuration for a paging memory proxy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Records per page when a request does not say
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Upper bound for a requested page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Reader settings
    #[serde(default)]
    pub reader: ReaderConfig,

    /// Rows loaded when the proxy is built
    #[serde(default)]
    pub data: Option<Value>,
}

fn default_page_size() -> usize {
    25
}

fn default_max_page_size() -> usize {
    100
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            reader: ReaderConfig::default(),
            data: None,
        }
    }
}

impl ProxyConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(PagingError::from)?;
        Ok(config)
    }
}
