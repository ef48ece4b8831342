//! Link policies for authors

use crate::core::query::ResourceParameters;
use crate::links::policy::{CollectionLinkPolicy, ItemLinkPolicy, LinkContext, LinkRule};
use crate::links::routes::RouteParams;
use axum::http::Method;
use std::sync::LazyLock;

fn author_id(ctx: &LinkContext) -> RouteParams {
    RouteParams::new().with("id", ctx.id)
}

fn books_of_author(ctx: &LinkContext) -> RouteParams {
    RouteParams::new().with("authorId", ctx.id)
}

/// Links carried by every author representation
pub static AUTHOR_LINKS: LazyLock<ItemLinkPolicy> = LazyLock::new(|| {
    ItemLinkPolicy::new("GetAuthor", author_id)
        .link(LinkRule::new("delete_author", "DeleteAuthor", Method::DELETE, author_id))
        .link(LinkRule::new(
            "create_book_for_author",
            "CreateBookForAuthor",
            Method::POST,
            books_of_author,
        ))
        .link(LinkRule::new("books", "GetBooksForAuthor", Method::GET, books_of_author))
});

/// Links of the paged authors collection
pub static AUTHORS_COLLECTION_LINKS: LazyLock<CollectionLinkPolicy> =
    LazyLock::new(|| CollectionLinkPolicy::new("GetAuthors"));

/// Query parameters repeated on collection links
///
/// The link builder moves `pageNumber` per link, keeping its position.
pub fn collection_query(params: &ResourceParameters) -> RouteParams {
    RouteParams::new()
        .with_opt("fields", params.fields.as_deref())
        .with("orderBy", &params.order_by)
        .with_opt("searchQuery", params.search_query.as_deref())
        .with_opt("genre", params.genre.as_deref())
        .with("pageNumber", params.page_number)
        .with("pageSize", params.page_size())
}
