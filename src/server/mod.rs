//! Server module for building the HTTP server
//!
//! `ServerBuilder` collects configuration, the repository and resource
//! descriptors, builds the shared `ServerHost`, and exposes it over REST.

pub mod builder;
pub mod exposure;
pub mod host;
pub mod resource_registry;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
pub use resource_registry::{ResourceDescriptor, ResourceRegistry};
