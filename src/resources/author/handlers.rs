//! HTTP handlers for authors

use super::links::{AUTHOR_LINKS, AUTHORS_COLLECTION_LINKS, collection_query};
use super::model::{Author, AuthorDto, AuthorForCreation, AuthorForCreationWithDateOfDeath};
use crate::core::error::{LibraryError, LibraryResult, QueryError, ResourceError, ValidationError};
use crate::core::link::{LinkedCollection, LinkedResource};
use crate::core::query::{FieldsParams, ResourceParameters};
use crate::core::resource::Resource;
use crate::core::shaping::{shape, shape_all};
use crate::links::builder::LinkBuilder;
use crate::links::policy::LinkContext;
use crate::links::routes::RouteParams;
use crate::resources::{
    AUTHOR_FULL_MEDIA_TYPE, AUTHOR_WITH_DATE_OF_DEATH_MEDIA_TYPE, AppState, HATEOAS_MEDIA_TYPE,
    content_type, ensure_fields, parse_body, wants_links,
};
use crate::storage::AuthorFilter;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{
        HeaderMap, HeaderName, HeaderValue, StatusCode,
        header::{ALLOW, CONTENT_TYPE, LOCATION},
    },
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use uuid::Uuid;
use validator::Validate;

/// Response header carrying the pagination metadata as JSON
pub const X_PAGINATION: HeaderName = HeaderName::from_static("x-pagination");

fn not_found(id: Uuid) -> LibraryError {
    ResourceError::NotFound {
        resource: AuthorDto::resource_name(),
        id,
    }
    .into()
}

fn linked_author(
    links: &LinkBuilder<'_>,
    author: &AuthorDto,
    fields: Option<&str>,
) -> LibraryResult<LinkedResource> {
    let resource = shape(author, fields)?;
    let links = links.links_for_item(&AUTHOR_LINKS, &LinkContext::new(author.id).with_fields(fields))?;
    Ok(LinkedResource::new(resource, links))
}

/// GET/HEAD /api/authors
pub async fn get_authors(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ResourceParameters>,
) -> LibraryResult<Response> {
    let pagination = &state.pagination;
    let params = params.normalized(pagination.default_page_size, pagination.max_page_size);

    let order = state
        .mappings
        .order_clause::<AuthorDto, Author>(&params.order_by)
        .map_err(|reason| {
            tracing::debug!(order_by = %params.order_by, %reason, "Rejected sort expression");
            QueryError::InvalidOrderBy {
                resource: AuthorDto::resource_name(),
                order_by: params.order_by.clone(),
                reason,
            }
        })?;
    ensure_fields::<AuthorDto>(params.fields())?;

    let filter = AuthorFilter {
        genre: params.genre.clone(),
        search_query: params.search_query.clone(),
    };
    let page = state
        .repository
        .get_authors(&filter, &order, params.page_number, params.page_size())
        .await?
        .map(|author| AuthorDto::from(&author));
    let metadata = page.metadata;

    let mut response = if wants_links(&headers) {
        let links = state.links();
        let value = page
            .items
            .iter()
            .map(|author| linked_author(&links, author, params.fields()))
            .collect::<LibraryResult<Vec<_>>>()?;
        // `self` names the requested page so re-fetching it yields this body
        let collection_links = links.links_for_collection(
            &AUTHORS_COLLECTION_LINKS,
            &collection_query(&params),
            Some(params.page_number),
            metadata.has_next(),
            metadata.has_previous(),
        )?;
        (
            [(CONTENT_TYPE, HATEOAS_MEDIA_TYPE)],
            Json(LinkedCollection::new(value, collection_links)),
        )
            .into_response()
    } else {
        Json(shape_all(&page.items, params.fields())?).into_response()
    };

    let header = HeaderValue::from_str(&serde_json::to_string(&metadata)?)
        .map_err(|e| LibraryError::Internal(format!("invalid pagination header: {}", e)))?;
    response.headers_mut().insert(X_PAGINATION, header);

    Ok(response)
}

/// OPTIONS /api/authors
pub async fn authors_options() -> impl IntoResponse {
    [(ALLOW, "GET,OPTIONS,POST")]
}

/// GET /api/authors/{id}
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FieldsParams>,
) -> LibraryResult<Json<LinkedResource>> {
    ensure_fields::<AuthorDto>(query.fields())?;

    let author = state.repository.get_author(&id).await?.ok_or_else(|| not_found(id))?;

    Ok(Json(linked_author(
        &state.links(),
        &AuthorDto::from(&author),
        query.fields(),
    )?))
}

/// POST /api/authors
///
/// The body type is chosen by `Content-Type`; the date-of-death variant
/// has its own vendor media type.
pub async fn create_author(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> LibraryResult<Response> {
    let author: Author = match content_type(&headers).as_deref() {
        Some("application/json") | Some(AUTHOR_FULL_MEDIA_TYPE) => {
            let request: AuthorForCreation = parse_body(&body)?;
            request.validate()?;
            request.into()
        }
        Some(AUTHOR_WITH_DATE_OF_DEATH_MEDIA_TYPE) => {
            let request: AuthorForCreationWithDateOfDeath = parse_body(&body)?;
            request.validate()?;
            request.into()
        }
        other => {
            return Err(ValidationError::UnsupportedMediaType {
                media_type: other.unwrap_or_default().to_string(),
            }
            .into());
        }
    };

    let author = state.repository.add_author(author).await?;
    tracing::info!(author_id = %author.id, books = author.books.len(), "Created author");

    let linked = linked_author(&state.links(), &AuthorDto::from(&author), None)?;
    let location = state.location("GetAuthor", &RouteParams::new().with("id", author.id))?;

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(linked)).into_response())
}

/// POST /api/authors/{id}
///
/// Authors cannot be created at a client-chosen id.
pub async fn block_author_creation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> LibraryResult<Infallible> {
    if state.repository.author_exists(&id).await? {
        return Err(ResourceError::AlreadyExists {
            resource: AuthorDto::resource_name(),
            id,
        }
        .into());
    }
    Err(not_found(id))
}

/// DELETE /api/authors/{id}
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> LibraryResult<StatusCode> {
    if !state.repository.delete_author(&id).await? {
        return Err(not_found(id));
    }

    tracing::info!(author_id = %id, "Deleted author and their books");
    Ok(StatusCode::NO_CONTENT)
}
