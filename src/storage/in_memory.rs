//! In-memory implementation of LibraryRepository for testing and development

use crate::core::error::StorageError;
use crate::core::property_mapping::OrderClause;
use crate::core::query::Page;
use crate::resources::author::Author;
use crate::resources::book::Book;
use crate::storage::repository::{AuthorFilter, LibraryRepository};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    /// Authors without their books
    authors: IndexMap<Uuid, Author>,
    books: IndexMap<Uuid, Book>,
}

impl Tables {
    fn with_books(&self, author: &Author) -> Author {
        let mut author = author.clone();
        author.books = self.books_of(&author.id);
        author
    }

    fn books_of(&self, author_id: &Uuid) -> Vec<Book> {
        self.books
            .values()
            .filter(|book| &book.author_id == author_id)
            .cloned()
            .collect()
    }
}

/// In-memory library repository
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// records keep insertion order so equal sort keys stay stable.
#[derive(Clone, Default)]
pub struct InMemoryLibraryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryLibraryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the sample authors and books
    pub fn seeded() -> Self {
        let repository = Self::new();
        if let Ok(mut tables) = repository.tables.write() {
            for author in super::seed::authors() {
                insert_author(&mut tables, author);
            }
        }
        repository
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StorageError> {
        self.tables.read().map_err(|_| StorageError::LockPoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StorageError> {
        self.tables.write().map_err(|_| StorageError::LockPoisoned)
    }
}

fn insert_author(tables: &mut Tables, mut author: Author) -> Author {
    for mut book in std::mem::take(&mut author.books) {
        book.author_id = author.id;
        tables.books.insert(book.id, book);
    }
    tables.authors.insert(author.id, author.clone());
    tables.with_books(&author)
}

#[async_trait]
impl LibraryRepository for InMemoryLibraryRepository {
    async fn get_authors(
        &self,
        filter: &AuthorFilter,
        order: &OrderClause,
        page_number: usize,
        page_size: usize,
    ) -> Result<Page<Author>, StorageError> {
        let tables = self.read()?;

        let mut authors: Vec<Author> = tables
            .authors
            .values()
            .filter(|author| filter.matches(author))
            .cloned()
            .collect();
        order.sort(&mut authors);

        Ok(Page::from_source(authors, page_number, page_size).map(|author| tables.with_books(&author)))
    }

    async fn get_author(&self, id: &Uuid) -> Result<Option<Author>, StorageError> {
        let tables = self.read()?;
        Ok(tables.authors.get(id).map(|author| tables.with_books(author)))
    }

    async fn author_exists(&self, id: &Uuid) -> Result<bool, StorageError> {
        Ok(self.read()?.authors.contains_key(id))
    }

    async fn add_author(&self, author: Author) -> Result<Author, StorageError> {
        let mut tables = self.write()?;
        Ok(insert_author(&mut tables, author))
    }

    async fn delete_author(&self, id: &Uuid) -> Result<bool, StorageError> {
        let mut tables = self.write()?;
        if tables.authors.shift_remove(id).is_none() {
            return Ok(false);
        }
        tables.books.retain(|_, book| &book.author_id != id);
        Ok(true)
    }

    async fn get_books_for_author(&self, author_id: &Uuid) -> Result<Vec<Book>, StorageError> {
        Ok(self.read()?.books_of(author_id))
    }

    async fn get_book_for_author(
        &self,
        author_id: &Uuid,
        book_id: &Uuid,
    ) -> Result<Option<Book>, StorageError> {
        Ok(self
            .read()?
            .books
            .get(book_id)
            .filter(|book| &book.author_id == author_id)
            .cloned())
    }

    async fn add_book_for_author(&self, author_id: &Uuid, mut book: Book) -> Result<Book, StorageError> {
        let mut tables = self.write()?;
        if !tables.authors.contains_key(author_id) {
            return Err(StorageError::OperationFailed {
                operation: "add_book_for_author".to_string(),
                message: format!("author '{}' does not exist", author_id),
            });
        }
        if tables.books.contains_key(&book.id) {
            return Err(StorageError::DuplicateKey {
                resource: "book",
                id: book.id,
            });
        }
        book.author_id = *author_id;
        tables.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update_book_for_author(&self, book: Book) -> Result<Book, StorageError> {
        let mut tables = self.write()?;
        match tables.books.get_mut(&book.id) {
            Some(stored) if stored.author_id == book.author_id => {
                *stored = book.clone();
                Ok(book)
            }
            _ => Err(StorageError::OperationFailed {
                operation: "update_book_for_author".to_string(),
                message: format!("book '{}' does not exist", book.id),
            }),
        }
    }

    async fn delete_book(&self, author_id: &Uuid, book_id: &Uuid) -> Result<bool, StorageError> {
        let mut tables = self.write()?;
        let owned = tables
            .books
            .get(book_id)
            .is_some_and(|book| &book.author_id == author_id);
        if owned {
            tables.books.shift_remove(book_id);
        }
        Ok(owned)
    }
}
