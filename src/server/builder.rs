//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use super::resource_registry::{ResourceDescriptor, ResourceRegistry};
use crate::config::LibraryConfig;
use crate::resources::author::AuthorDescriptor;
use crate::resources::book::BookDescriptor;
use crate::storage::{InMemoryLibraryRepository, LibraryRepository};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the library HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(LibraryConfig::from_yaml_file("library.yaml")?)
///     .with_library_resources()
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: LibraryConfig,
    repository: Option<Arc<dyn LibraryRepository>>,
    resource_registry: ResourceRegistry,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            config: LibraryConfig::default(),
            repository: None,
            resource_registry: ResourceRegistry::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: LibraryConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the repository
    ///
    /// Without one, an in-memory repository is used, seeded when the
    /// configuration asks for it.
    pub fn with_repository(mut self, repository: impl LibraryRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Register a resource descriptor
    pub fn register_resource(mut self, descriptor: impl ResourceDescriptor + 'static) -> Self {
        self.resource_registry.register(Box::new(descriptor));
        self
    }

    /// Register the authors and books resources
    pub fn with_library_resources(self) -> Self {
        self.register_resource(AuthorDescriptor)
            .register_resource(BookDescriptor)
    }

    /// Add custom routes next to the resource routes
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let repository = match self.repository.take() {
            Some(repository) => repository,
            None if self.config.seed_data => {
                tracing::info!("Using seeded in-memory repository");
                Arc::new(InMemoryLibraryRepository::seeded()) as Arc<dyn LibraryRepository>
            }
            None => Arc::new(InMemoryLibraryRepository::new()),
        };

        if self.resource_registry.is_empty() {
            tracing::warn!("No resources registered; only health routes will be served");
        }

        ServerHost::from_builder_components(self.config, repository, self.resource_registry)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application on `server.bind` with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
