use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
///
/// Everything is optional: without overrides the server uses the catalog
/// compiled into the binary and serves on stdio.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog TOML replacing the embedded one. `None` uses the embedded catalog.
    pub catalog_path: Option<String>,
    /// TCP listen address (e.g. "127.0.0.1:7400"). `None` serves on stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `PHP_GUIDELINES_CATALOG_PATH`: path to a catalog TOML file
    /// - `MCP_TCP_LISTEN_ADDR`: serve MCP over TCP instead of stdio
    pub fn from_env() -> Result<Self, AppError> {
        let catalog_path = std::env::var("PHP_GUIDELINES_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty());

        if let Some(path) = catalog_path.as_deref() {
            if !Path::new(path).is_file() {
                return Err(AppError::Config(format!(
                    "PHP_GUIDELINES_CATALOG_PATH does not point to a file: {path}"
                )));
            }
        }

        Ok(Self {
            catalog_path,
            tcp_listen_addr: std::env::var("MCP_TCP_LISTEN_ADDR").ok(),
        })
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_path.as_deref().map(PathBuf::from)
    }
}
