//! Core module containing the resource-agnostic building blocks:
//! field values, field tables, shaping, property mappings, paging,
//! hypermedia value types and errors

pub mod error;
pub mod field;
pub mod link;
pub mod property_mapping;
pub mod query;
pub mod resource;
pub mod shaping;
pub mod type_fields;

pub use error::{LibraryError, LibraryResult};
pub use field::FieldValue;
pub use link::{Link, LinkedCollection, LinkedResource};
pub use property_mapping::{OrderClause, PropertyMapping, PropertyMappingRegistry};
pub use query::{FieldsParams, Page, PaginationMetadata, ResourceParameters};
pub use resource::{FieldDescriptor, Resource, Sortable};
pub use shaping::{ShapedEntity, shape, shape_all};
pub use type_fields::type_has_properties;
