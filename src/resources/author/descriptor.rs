//! Route registration for authors

use super::handlers::{
    authors_options, block_author_creation, create_author, delete_author, get_author,
    get_authors,
};
use crate::resources::AppState;
use crate::server::resource_registry::ResourceDescriptor;
use axum::{Router, routing::get};

/// Descriptor for the authors resource
pub struct AuthorDescriptor;

impl ResourceDescriptor for AuthorDescriptor {
    fn resource_type(&self) -> &str {
        "author"
    }

    fn build_routes(&self, state: AppState) -> Router {
        // `get` also answers HEAD without a body
        Router::new()
            .route(
                "/api/authors",
                get(get_authors).post(create_author).options(authors_options),
            )
            .route(
                "/api/authors/{authorId}",
                get(get_author)
                    .post(block_author_creation)
                    .delete(delete_author),
            )
            .with_state(state)
    }
}
