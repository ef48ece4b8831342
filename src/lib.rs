//! # Library API
//!
//! A REST resource server for authors and their books, built on a small
//! set of resource-agnostic components.
//!
//! ## Features
//!
//! - **Data Shaping**: `?fields=id,name` projects responses onto a subset of fields
//! - **Field Validation**: unknown fields are rejected with 400 before any query runs
//! - **Property Mappings**: client sort fields map onto one or more entity properties
//! - **Pagination**: page metadata in the `X-Pagination` header
//! - **Hypermedia Links**: declarative link policies interpreted by one link builder
//! - **Configuration-Based**: server, link base URL and paging limits from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use library::prelude::*;
//!
//! pub struct ReviewDto {
//!     pub id: Uuid,
//!     pub rating: i32,
//! }
//!
//! // Field table for shaping and `fields` validation
//! impl_resource!(ReviewDto, "review", {
//!     "id" => id,
//!     "rating" => rating,
//! });
//!
//! let shaped = shape(&review, Some("rating"))?;
//!
//! // Serve authors and books
//! ServerBuilder::new()
//!     .with_config(LibraryConfig::from_yaml_file("library.yaml")?)
//!     .with_library_resources()
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod links;
pub mod resources;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{LibraryError, LibraryResult},
        field::FieldValue,
        link::{Link, LinkedCollection, LinkedResource},
        property_mapping::{OrderClause, PropertyMapping, PropertyMappingRegistry},
        query::{FieldsParams, Page, PaginationMetadata, ResourceParameters},
        resource::{FieldDescriptor, Resource, Sortable},
        shaping::{ShapedEntity, shape, shape_all},
        type_fields::type_has_properties,
    };

    // === Macros ===
    pub use crate::{impl_resource, impl_sortable};

    // === Links ===
    pub use crate::links::{
        CollectionLinkPolicy, ItemLinkPolicy, LinkBuilder, LinkContext, LinkRule, RouteParams,
        RouteTable, UrlResolver,
    };

    // === Resources ===
    pub use crate::resources::{
        AppState,
        author::{Author, AuthorDescriptor, AuthorDto},
        book::{Book, BookDescriptor, BookDto},
    };

    // === Storage ===
    pub use crate::storage::{AuthorFilter, InMemoryLibraryRepository, LibraryRepository};

    // === Config ===
    pub use crate::config::{LibraryConfig, PaginationConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{ResourceDescriptor, ResourceRegistry, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        http::HeaderMap,
        routing::{delete, get, patch, post, put},
    };
}
