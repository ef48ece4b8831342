//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind (e.g., "127.0.0.1:3000")
    pub bind: String,

    /// Prefix for every generated link target
    ///
    /// Either an absolute origin (`http://localhost:3000`) or a path
    /// prefix (`/`) for relative links.
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Paging limits for collection routes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 20,
        }
    }
}

/// Complete configuration for the library API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LibraryConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,

    /// Populate the in-memory repository with sample authors and books
    pub seed_data: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pagination: PaginationConfig::default(),
            seed_data: true,
        }
    }
}

impl LibraryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, "<inline>")
    }

    fn parse(yaml: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Load {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable together
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pagination = &self.pagination;
        if pagination.max_page_size == 0 {
            return Err(invalid("pagination.max_page_size", "must be at least 1"));
        }
        if pagination.default_page_size == 0 {
            return Err(invalid("pagination.default_page_size", "must be at least 1"));
        }
        if pagination.default_page_size > pagination.max_page_size {
            return Err(invalid(
                "pagination.default_page_size",
                "must not exceed pagination.max_page_size",
            ));
        }

        let base_url = &self.server.base_url;
        let usable = base_url.starts_with("http://")
            || base_url.starts_with("https://")
            || base_url.starts_with('/');
        if !usable {
            return Err(invalid(
                "server.base_url",
                "must start with http://, https:// or /",
            ));
        }

        Ok(())
    }

    /// Link prefix with any trailing slash removed
    pub fn link_base(&self) -> &str {
        self.server.base_url.trim_end_matches('/')
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.to_string(),
    }
}
