//! Link policies for books

use crate::links::policy::{CollectionLinkPolicy, ItemLinkPolicy, LinkContext, LinkRule};
use crate::links::routes::RouteParams;
use axum::http::Method;
use std::sync::LazyLock;

/// A context without `parent_id` leaves `authorId` unset, so resolution fails
fn book_of_author(ctx: &LinkContext) -> RouteParams {
    RouteParams::new()
        .with_opt("authorId", ctx.parent_id)
        .with("id", ctx.id)
}

/// Links carried by every book representation
///
/// The link context's `parent_id` is the owning author.
pub static BOOK_LINKS: LazyLock<ItemLinkPolicy> = LazyLock::new(|| {
    ItemLinkPolicy::new("GetBookForAuthor", book_of_author)
        .link(LinkRule::new(
            "delete_book",
            "DeleteBookForAuthor",
            Method::DELETE,
            book_of_author,
        ))
        .link(LinkRule::new(
            "update_book",
            "UpdateBookForAuthor",
            Method::PUT,
            book_of_author,
        ))
        .link(LinkRule::new(
            "partially_update_book",
            "PartiallyUpdateBookForAuthor",
            Method::PATCH,
            book_of_author,
        ))
});

/// Links of an author's (unpaged) book collection
pub static BOOKS_COLLECTION_LINKS: LazyLock<CollectionLinkPolicy> =
    LazyLock::new(|| CollectionLinkPolicy::new("GetBooksForAuthor"));
