//! Authors and books: entities, transfer objects, link policies and routes
//!
//! Each resource lives in its own module with the same layout:
//! `model` (entity, transfer objects, mapping), `links` (link policies),
//! `handlers` (axum handlers) and `descriptor` (route registration).

pub mod author;
pub mod book;
pub mod patch;

use crate::config::PaginationConfig;
use crate::core::error::{LinkError, QueryError, ValidationError};
use crate::core::property_mapping::{PropertyMapping, PropertyMappingRegistry};
use crate::core::resource::Resource;
use crate::core::type_fields::first_unknown_field;
use crate::links::builder::LinkBuilder;
use crate::links::routes::{RouteParams, RouteTable, UrlResolver};
use crate::storage::LibraryRepository;
use author::{Author, AuthorDto};
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use book::{Book, BookDto};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Accept type asking for collections wrapped with links
pub const HATEOAS_MEDIA_TYPE: &str = "application/vnd.marvin.hateoas+json";

/// Content type for author creation (same body as plain JSON)
pub const AUTHOR_FULL_MEDIA_TYPE: &str = "application/vnd.marvin.author.full+json";

/// Content type for author creation including a date of death
pub const AUTHOR_WITH_DATE_OF_DEATH_MEDIA_TYPE: &str =
    "application/vnd.marvin.authorwithdateofdeath.full+json";

/// State shared by every resource handler
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn LibraryRepository>,
    pub mappings: Arc<PropertyMappingRegistry>,
    pub routes: Arc<RouteTable>,
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn links(&self) -> LinkBuilder<'_> {
        LinkBuilder::new(self.routes.as_ref())
    }

    /// Target of a named route, for `Location` headers
    pub fn location(&self, route: &str, params: &RouteParams) -> Result<String, LinkError> {
        self.routes
            .resolve(route, params)
            .map_err(|source| LinkError::Resolution {
                rel: "location".to_string(),
                source,
            })
    }
}

/// Named routes link targets are generated from
pub fn route_table(base_url: &str) -> RouteTable {
    RouteTable::new(base_url)
        .route("GetAuthors", "/api/authors")
        .route("CreateAuthor", "/api/authors")
        .route("GetAuthor", "/api/authors/{id}")
        .route("DeleteAuthor", "/api/authors/{id}")
        .route("GetBooksForAuthor", "/api/authors/{authorId}/books")
        .route("CreateBookForAuthor", "/api/authors/{authorId}/books")
        .route("GetBookForAuthor", "/api/authors/{authorId}/books/{id}")
        .route("DeleteBookForAuthor", "/api/authors/{authorId}/books/{id}")
        .route("UpdateBookForAuthor", "/api/authors/{authorId}/books/{id}")
        .route(
            "PartiallyUpdateBookForAuthor",
            "/api/authors/{authorId}/books/{id}",
        )
}

/// Sort mappings from client fields onto entity properties
pub fn property_mappings() -> PropertyMappingRegistry {
    let mut registry = PropertyMappingRegistry::new();
    registry.register::<AuthorDto, Author>([
        PropertyMapping::new("id", ["Id"]),
        PropertyMapping::new("genre", ["Genre"]),
        PropertyMapping::new("age", ["DateOfBirth"]).reverted(),
        PropertyMapping::new("name", ["FirstName", "LastName"]),
    ]);
    registry.register::<BookDto, Book>([
        PropertyMapping::new("id", ["Id"]),
        PropertyMapping::new("title", ["Title"]),
        PropertyMapping::new("description", ["Description"]),
    ]);
    registry
}

/// Reject a `fields` selection naming an undeclared field of `T`
pub fn ensure_fields<T: Resource>(fields: Option<&str>) -> Result<(), QueryError> {
    match first_unknown_field::<T>(fields) {
        Some(unknown) => {
            tracing::debug!(resource = T::resource_name(), field = %unknown, "Rejected field selection");
            Err(QueryError::InvalidFields {
                resource: T::resource_name(),
                fields: fields.unwrap_or_default().to_string(),
            })
        }
        None => Ok(()),
    }
}

/// Whether the client asked for the linked collection representation
pub fn wants_links(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(|media_type| media_type_of(media_type) == HATEOAS_MEDIA_TYPE)
}

/// Request media type without parameters, lowercased
pub fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(media_type_of)
}

fn media_type_of(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Deserialize a JSON request body; missing or unreadable bodies are 400s
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ValidationError::MissingBody {
            message: "request body is empty".to_string(),
        });
    }
    serde_json::from_slice(body).map_err(|e| ValidationError::MissingBody {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::property_mapping::SortKey;
    use axum::http::HeaderValue;

    #[test]
    fn test_author_mappings() {
        let registry = property_mappings();
        let clause = registry
            .order_clause::<AuthorDto, Author>("age desc, name")
            .unwrap();
        assert_eq!(
            clause.keys(),
            &[
                SortKey {
                    property: "DateOfBirth".to_string(),
                    descending: false
                },
                SortKey {
                    property: "FirstName".to_string(),
                    descending: false
                },
                SortKey {
                    property: "LastName".to_string(),
                    descending: false
                },
            ]
        );
        assert!(!registry.valid_order_by::<AuthorDto, Author>("royalties"));
        assert!(registry.valid_order_by::<BookDto, Book>("title desc"));
    }

    #[test]
    fn test_route_table_covers_link_targets() {
        let routes = route_table("http://localhost:3000/");
        let href = routes
            .resolve(
                "UpdateBookForAuthor",
                &RouteParams::new().with("authorId", "a").with("id", "b"),
            )
            .unwrap();
        assert_eq!(href, "http://localhost:3000/api/authors/a/books/b");
    }

    #[test]
    fn test_ensure_fields() {
        assert!(ensure_fields::<AuthorDto>(Some("id, NAME")).is_ok());
        assert!(ensure_fields::<AuthorDto>(None).is_ok());
        assert!(matches!(
            ensure_fields::<AuthorDto>(Some("id,royalties")),
            Err(QueryError::InvalidFields { .. })
        ));
    }

    #[test]
    fn test_media_type_negotiation() {
        let mut headers = HeaderMap::new();
        assert!(!wants_links(&headers));

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, application/vnd.marvin.hateoas+json"),
        );
        assert!(wants_links(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("Application/JSON; charset=utf-8"),
        );
        assert_eq!(content_type(&headers).as_deref(), Some("application/json"));
    }

    #[test]
    fn test_parse_body_rejects_empty_and_malformed() {
        assert!(matches!(
            parse_body::<serde_json::Value>(&Bytes::from_static(b"  ")),
            Err(ValidationError::MissingBody { .. })
        ));
        assert!(parse_body::<serde_json::Value>(&Bytes::from_static(b"{")).is_err());
        assert!(parse_body::<serde_json::Value>(&Bytes::from_static(b"{}")).is_ok());
    }
}
