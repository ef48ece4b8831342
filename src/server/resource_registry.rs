//! Resource registry for managing resource descriptors and their routes

use crate::resources::AppState;
use axum::Router;
use indexmap::IndexMap;

/// Trait that describes how to build routes for a resource
///
/// Each resource (author, book) implements this trait to provide its
/// HTTP routes over the shared [`AppState`].
pub trait ResourceDescriptor: Send + Sync {
    /// The resource type name (singular, e.g., "author")
    fn resource_type(&self) -> &str;

    /// Build the routes for this resource
    fn build_routes(&self, state: AppState) -> Router;
}

/// Registry for all resources exposed by the server
///
/// Collects resource descriptors and merges their routes into one router.
#[derive(Default)]
pub struct ResourceRegistry {
    descriptors: IndexMap<String, Box<dyn ResourceDescriptor>>,
}

impl ResourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource descriptor
    ///
    /// The resource type name is used as the key; registering the same type
    /// again replaces the earlier descriptor.
    pub fn register(&mut self, descriptor: Box<dyn ResourceDescriptor>) {
        let resource_type = descriptor.resource_type().to_string();
        self.descriptors.insert(resource_type, descriptor);
    }

    /// Build a router with all registered resource routes
    pub fn build_routes(&self, state: &AppState) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes(state.clone()))
            })
    }

    /// Registered resource types, in registration order
    pub fn resource_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
