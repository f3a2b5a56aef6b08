//! Pagination configuration
//!
//! Defaults applied when a caller does not spell out a full page request,
//! and the limits a provider enforces. Loaded from YAML (or JSON, which
//! YAML accepts).
//!
//! ```yaml
//! default_page_size: 20
//! max_page_size: 500
//! request_total: false
//! mode: cursor
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::page::PageRequest;
use crate::sort::Order;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How a pagination session positions its pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagingMode {
    /// Page numbers and offsets
    #[default]
    Offset,
    /// Keyset cursors
    Cursor,
}

/// Pagination defaults and limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    /// Page size when the caller gives none
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page size a provider accepts
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Whether first requests ask for a total count
    #[serde(default = "default_request_total")]
    pub request_total: bool,

    /// Positioning used by sessions started from this config
    #[serde(default)]
    pub mode: PagingMode,
}

fn default_page_size() -> u32 {
    crate::page::DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u32 {
    1000
}

fn default_request_total() -> bool {
    true
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            request_total: default_request_total(),
            mode: PagingMode::default(),
        }
    }
}

impl PaginationConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the limits are usable and consistent
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size < 1 {
            return Err(Error::config("default_page_size must be at least 1"));
        }
        if self.max_page_size < 1 {
            return Err(Error::config("max_page_size must be at least 1"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(Error::config(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }

    /// Request for the first page under these defaults
    pub fn first_request<T>(&self, order: Order) -> Result<PageRequest<T>> {
        let request = PageRequest::of_size(self.default_page_size)?.with_order(order);
        Ok(if self.request_total {
            request.with_total()
        } else {
            request.without_total()
        })
    }

    /// Reject a request whose size exceeds `max_page_size`
    pub fn check_size<T>(&self, request: &PageRequest<T>) -> Result<()> {
        if request.size() > self.max_page_size {
            return Err(Error::invalid_request(
                "size",
                format!(
                    "page size {} exceeds the maximum of {}",
                    request.size(),
                    self.max_page_size
                ),
            ));
        }
        Ok(())
    }
}

/// Load a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<PaginationConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    PaginationConfig::from_yaml_str(&content)
}
