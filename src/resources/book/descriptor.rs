//! Route registration for books

use super::handlers::{
    create_book_for_author, delete_book_for_author, get_book_for_author, get_books_for_author,
    partially_update_book_for_author, update_book_for_author,
};
use crate::resources::AppState;
use crate::server::resource_registry::ResourceDescriptor;
use axum::{Router, routing::get};

/// Descriptor for books, nested under their author
pub struct BookDescriptor;

impl ResourceDescriptor for BookDescriptor {
    fn resource_type(&self) -> &str {
        "book"
    }

    fn build_routes(&self, state: AppState) -> Router {
        Router::new()
            .route(
                "/api/authors/{authorId}/books",
                get(get_books_for_author).post(create_book_for_author),
            )
            .route(
                "/api/authors/{authorId}/books/{id}",
                get(get_book_for_author)
                    .delete(delete_book_for_author)
                    .put(update_book_for_author)
                    .patch(partially_update_book_for_author),
            )
            .with_state(state)
    }
}
