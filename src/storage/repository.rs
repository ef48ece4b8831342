//! Repository abstraction over author and book storage

use crate::core::error::StorageError;
use crate::core::property_mapping::OrderClause;
use crate::core::query::Page;
use crate::resources::author::Author;
use crate::resources::book::Book;
use async_trait::async_trait;
use uuid::Uuid;

/// Filters applied to the authors collection before paging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    /// Exact genre match, ignoring case
    pub genre: Option<String>,

    /// Substring match over genre, first name and last name, ignoring case
    pub search_query: Option<String>,
}

impl AuthorFilter {
    pub fn matches(&self, author: &Author) -> bool {
        let genre_matches = self
            .genre
            .as_deref()
            .is_none_or(|genre| author.genre.trim().eq_ignore_ascii_case(genre.trim()));

        let search_matches = self.search_query.as_deref().is_none_or(|query| {
            let query = query.trim().to_lowercase();
            [&author.genre, &author.first_name, &author.last_name]
                .iter()
                .any(|value| value.to_lowercase().contains(&query))
        });

        genre_matches && search_matches
    }
}

/// Storage operations used by the resource handlers
///
/// Authors returned by this trait carry their books.
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// One page of authors matching `filter`, sorted by `order`
    async fn get_authors(
        &self,
        filter: &AuthorFilter,
        order: &OrderClause,
        page_number: usize,
        page_size: usize,
    ) -> Result<Page<Author>, StorageError>;

    async fn get_author(&self, id: &Uuid) -> Result<Option<Author>, StorageError>;

    async fn author_exists(&self, id: &Uuid) -> Result<bool, StorageError>;

    /// Store an author together with its nested books
    async fn add_author(&self, author: Author) -> Result<Author, StorageError>;

    /// Delete an author and all of its books; false if it did not exist
    async fn delete_author(&self, id: &Uuid) -> Result<bool, StorageError>;

    async fn get_books_for_author(&self, author_id: &Uuid) -> Result<Vec<Book>, StorageError>;

    async fn get_book_for_author(
        &self,
        author_id: &Uuid,
        book_id: &Uuid,
    ) -> Result<Option<Book>, StorageError>;

    /// Store a new book under `author_id`
    ///
    /// Fails with `StorageError::DuplicateKey` when the book id is taken,
    /// whichever author holds it.
    async fn add_book_for_author(&self, author_id: &Uuid, book: Book) -> Result<Book, StorageError>;

    /// Replace an existing book
    async fn update_book_for_author(&self, book: Book) -> Result<Book, StorageError>;

    /// Delete a book of an author; false if it did not exist
    async fn delete_book(&self, author_id: &Uuid, book_id: &Uuid) -> Result<bool, StorageError>;
}
