//! Server host holding the state shared by every exposure
//!
//! The host is built once at startup. Its property mappings and route
//! table are read-only afterwards and shared by all requests.

use crate::config::LibraryConfig;
use crate::core::property_mapping::PropertyMappingRegistry;
use crate::links::routes::RouteTable;
use crate::resources::{self, AppState};
use crate::server::resource_registry::ResourceRegistry;
use crate::storage::LibraryRepository;
use anyhow::Result;
use std::sync::Arc;

/// Host context containing all server state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::from_builder_components(config, repository, resource_registry)?;
/// let app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    /// Validated configuration
    pub config: Arc<LibraryConfig>,

    /// Author and book storage
    pub repository: Arc<dyn LibraryRepository>,

    /// Sort mappings from transfer objects onto entities
    pub mappings: Arc<PropertyMappingRegistry>,

    /// Named routes used for link generation
    pub routes: Arc<RouteTable>,

    /// Registered resources and their routes
    pub resource_registry: ResourceRegistry,
}

impl ServerHost {
    /// Build the host from builder components
    ///
    /// Validates the configuration, then builds the route table (rooted at
    /// `server.base_url`) and the property mapping registry.
    pub fn from_builder_components(
        config: LibraryConfig,
        repository: Arc<dyn LibraryRepository>,
        resource_registry: ResourceRegistry,
    ) -> Result<Self> {
        config.validate()?;

        let routes = resources::route_table(config.link_base());
        let mappings = resources::property_mappings();

        Ok(Self {
            config: Arc::new(config),
            repository,
            mappings: Arc::new(mappings),
            routes: Arc::new(routes),
            resource_registry,
        })
    }

    /// State handed to resource handlers
    pub fn app_state(&self) -> AppState {
        AppState {
            repository: self.repository.clone(),
            mappings: self.mappings.clone(),
            routes: self.routes.clone(),
            pagination: self.config.pagination.clone(),
        }
    }

    /// Resource types registered in the host
    pub fn resource_types(&self) -> Vec<&str> {
        self.resource_registry.resource_types()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::routes::{RouteParams, UrlResolver};
    use crate::storage::InMemoryLibraryRepository;

    fn host(config: LibraryConfig) -> Result<ServerHost> {
        ServerHost::from_builder_components(
            config,
            Arc::new(InMemoryLibraryRepository::new()),
            ResourceRegistry::new(),
        )
    }

    #[test]
    fn test_routes_use_configured_base_url() {
        let mut config = LibraryConfig::default();
        config.server.base_url = "https://library.example.com/".to_string();
        let host = host(config).unwrap();

        let href = host
            .routes
            .resolve("GetAuthor", &RouteParams::new().with("id", 1))
            .unwrap();
        assert_eq!(href, "https://library.example.com/api/authors/1");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = LibraryConfig::default();
        config.pagination.default_page_size = 0;
        assert!(host(config).is_err());
    }

    #[test]
    fn test_app_state_shares_host_state() {
        let host = host(LibraryConfig::default()).unwrap();
        let state = host.app_state();
        assert!(Arc::ptr_eq(&state.routes, &host.routes));
        assert!(Arc::ptr_eq(&state.mappings, &host.mappings));
        assert_eq!(state.pagination.max_page_size, 20);
        assert!(host.resource_types().is_empty());
    }
}
