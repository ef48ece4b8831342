//! HTTP handlers for an author's books

use super::links::{BOOK_LINKS, BOOKS_COLLECTION_LINKS};
use super::model::{Book, BookDto, BookForCreation, BookForUpdate, validate_book};
use crate::core::error::{LibraryError, LibraryResult, ResourceError, ValidationError};
use crate::core::link::{LinkedCollection, LinkedResource};
use crate::core::query::FieldsParams;
use crate::core::resource::Resource;
use crate::core::shaping::shape;
use crate::links::builder::LinkBuilder;
use crate::links::policy::LinkContext;
use crate::links::routes::RouteParams;
use crate::resources::author::AuthorDto;
use crate::resources::patch::{PatchOperation, apply_patch};
use crate::resources::{AppState, ensure_fields, parse_body};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

fn book_not_found(id: Uuid) -> LibraryError {
    ResourceError::NotFound {
        resource: BookDto::resource_name(),
        id,
    }
    .into()
}

async fn ensure_author(state: &AppState, author_id: Uuid) -> LibraryResult<()> {
    if state.repository.author_exists(&author_id).await? {
        Ok(())
    } else {
        Err(ResourceError::NotFound {
            resource: AuthorDto::resource_name(),
            id: author_id,
        }
        .into())
    }
}

fn linked_book(
    links: &LinkBuilder<'_>,
    book: &BookDto,
    fields: Option<&str>,
) -> LibraryResult<LinkedResource> {
    let resource = shape(book, fields)?;
    let ctx = LinkContext::new(book.id)
        .with_parent(book.author_id)
        .with_fields(fields);
    Ok(LinkedResource::new(resource, links.links_for_item(&BOOK_LINKS, &ctx)?))
}

/// 201 with `Location` and the linked book
fn created(state: &AppState, book: &Book) -> LibraryResult<Response> {
    let linked = linked_book(&state.links(), &BookDto::from(book), None)?;
    let location = state.location(
        "GetBookForAuthor",
        &RouteParams::new()
            .with("authorId", book.author_id)
            .with("id", book.id),
    )?;
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(linked)).into_response())
}

/// GET /api/authors/{authorId}/books
pub async fn get_books_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Query(query): Query<FieldsParams>,
) -> LibraryResult<Json<LinkedCollection>> {
    ensure_fields::<BookDto>(query.fields())?;
    ensure_author(&state, author_id).await?;

    let links = state.links();
    let value = state
        .repository
        .get_books_for_author(&author_id)
        .await?
        .iter()
        .map(|book| linked_book(&links, &BookDto::from(book), query.fields()))
        .collect::<LibraryResult<Vec<_>>>()?;

    let collection_links = links.links_for_collection(
        &BOOKS_COLLECTION_LINKS,
        &RouteParams::new()
            .with("authorId", author_id)
            .with_opt("fields", query.fields()),
        None,
        false,
        false,
    )?;

    Ok(Json(LinkedCollection::new(value, collection_links)))
}

/// GET /api/authors/{authorId}/books/{id}
pub async fn get_book_for_author(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
    Query(query): Query<FieldsParams>,
) -> LibraryResult<Json<LinkedResource>> {
    ensure_fields::<BookDto>(query.fields())?;
    ensure_author(&state, author_id).await?;

    let book = state
        .repository
        .get_book_for_author(&author_id, &id)
        .await?
        .ok_or_else(|| book_not_found(id))?;

    Ok(Json(linked_book(
        &state.links(),
        &BookDto::from(&book),
        query.fields(),
    )?))
}

/// POST /api/authors/{authorId}/books
pub async fn create_book_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    body: Bytes,
) -> LibraryResult<Response> {
    let request: BookForCreation = parse_body(&body)?;
    validate_book(&request)?;
    ensure_author(&state, author_id).await?;

    let book = state
        .repository
        .add_book_for_author(&author_id, request.into_book(author_id))
        .await?;
    tracing::info!(book_id = %book.id, author_id = %author_id, "Created book");

    created(&state, &book)
}

/// DELETE /api/authors/{authorId}/books/{id}
pub async fn delete_book_for_author(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
) -> LibraryResult<StatusCode> {
    ensure_author(&state, author_id).await?;

    if !state.repository.delete_book(&author_id, &id).await? {
        return Err(book_not_found(id));
    }

    tracing::info!(book_id = %id, author_id = %author_id, "Book {} for author {} was deleted", id, author_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Store `update` over `existing`, or create the book at `id` when missing
async fn upsert(
    state: &AppState,
    author_id: Uuid,
    id: Uuid,
    existing: Option<Book>,
    update: BookForUpdate,
) -> LibraryResult<Response> {
    match existing {
        Some(mut book) => {
            update.apply_to(&mut book);
            state.repository.update_book_for_author(book).await?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        None => {
            let book = state
                .repository
                .add_book_for_author(&author_id, update.into_book(id, author_id))
                .await?;
            tracing::info!(book_id = %id, author_id = %author_id, "Created book by upsert");
            created(state, &book)
        }
    }
}

/// PUT /api/authors/{authorId}/books/{id}
///
/// Replaces the book, or creates it at the given id (201).
pub async fn update_book_for_author(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
    body: Bytes,
) -> LibraryResult<Response> {
    let request: BookForUpdate = parse_body(&body)?;
    validate_book(&request)?;
    ensure_author(&state, author_id).await?;

    let existing = state.repository.get_book_for_author(&author_id, &id).await?;
    upsert(&state, author_id, id, existing, request).await
}

/// PATCH /api/authors/{authorId}/books/{id}
///
/// Applies a JSON Patch document to the book's update body. A missing
/// book is patched from an empty body and created (201).
pub async fn partially_update_book_for_author(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
    body: Bytes,
) -> LibraryResult<Response> {
    let operations: Vec<PatchOperation> = parse_body(&body)?;
    ensure_author(&state, author_id).await?;

    let existing = state.repository.get_book_for_author(&author_id, &id).await?;
    let mut document = serde_json::to_value(
        existing
            .as_ref()
            .map(BookForUpdate::from)
            .unwrap_or_default(),
    )?;
    apply_patch(&mut document, &operations).map_err(ValidationError::from)?;

    let patched: BookForUpdate =
        serde_json::from_value(document).map_err(|e| ValidationError::InvalidPatch {
            message: e.to_string(),
        })?;
    validate_book(&patched)?;

    upsert(&state, author_id, id, existing, patched).await
}
