//! Library API server
//!
//! Serves authors and their books over REST with data shaping, sorting,
//! paging and hypermedia links.
//!
//! Configuration is read from the YAML file named by `LIBRARY_CONFIG`
//! (defaults apply when unset). Log filtering follows `RUST_LOG`.

use anyhow::{Context, Result};
use library::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("LIBRARY_CONFIG") {
        Ok(path) => LibraryConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        Err(_) => LibraryConfig::default(),
    };

    tracing::info!(
        bind = %config.server.bind,
        base_url = %config.server.base_url,
        seed_data = config.seed_data,
        "Starting library-api v{}",
        env!("CARGO_PKG_VERSION")
    );

    ServerBuilder::new()
        .with_config(config)
        .with_library_resources()
        .serve()
        .await
}
