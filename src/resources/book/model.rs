//! Book entity, transfer objects and mapping

use crate::core::error::{FieldValidationError, ValidationError, flatten_field_errors};
use crate::{impl_resource, impl_sortable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Stored book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

impl_sortable!(Book, {
    "Id" => id,
    "Title" => title,
    "Description" => description,
});

/// Book as exposed to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

impl_resource!(BookDto, "book", {
    "id" => id,
    "title" => title,
    "description" => description,
    "authorId" => author_id,
});

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            description: book.description.clone(),
            author_id: book.author_id,
        }
    }
}

/// Request body for creating a book
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookForCreation {
    #[validate(
        required(message = "You should fill out a title."),
        length(min = 1, max = 100, message = "The title should have between 1 and 100 characters.")
    )]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "The description shouldn't have more than 500 characters."))]
    pub description: Option<String>,
}

impl BookForCreation {
    pub fn into_book(self, author_id: Uuid) -> Book {
        Book {
            id: Uuid::new_v4(),
            title: self.title.unwrap_or_default(),
            description: self.description,
            author_id,
        }
    }
}

/// Request body for replacing a book, and the document JSON Patch edits
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookForUpdate {
    #[validate(
        required(message = "You should fill out a title."),
        length(min = 1, max = 100, message = "The title should have between 1 and 100 characters.")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "You should fill out the description."),
        length(max = 500, message = "The description shouldn't have more than 500 characters.")
    )]
    pub description: Option<String>,
}

impl BookForUpdate {
    /// Overwrite the editable members of `book`
    pub fn apply_to(self, book: &mut Book) {
        book.title = self.title.unwrap_or_default();
        book.description = self.description;
    }

    /// Create a new book with a caller-chosen id (upsert)
    pub fn into_book(self, id: Uuid, author_id: Uuid) -> Book {
        let mut book = Book {
            id,
            title: String::new(),
            description: None,
            author_id,
        };
        self.apply_to(&mut book);
        book
    }
}

impl From<&Book> for BookForUpdate {
    fn from(book: &Book) -> Self {
        Self {
            title: Some(book.title.clone()),
            description: book.description.clone(),
        }
    }
}

/// Common view over book bodies for whole-object rules
pub trait BookManipulation: Validate {
    fn title(&self) -> Option<&str>;
    fn description(&self) -> Option<&str>;
}

impl BookManipulation for BookForCreation {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl BookManipulation for BookForUpdate {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A book's description must not repeat its title
pub fn validate_description_differs_from_title(
    title: Option<&str>,
    description: Option<&str>,
) -> Result<(), FieldValidationError> {
    match (title, description) {
        (Some(title), Some(description)) if title == description => Err(FieldValidationError::new(
            "book",
            "The provided description should be different from the title.",
        )),
        _ => Ok(()),
    }
}

/// Run the field rules and the description rule, reporting every failure
pub fn validate_book<B: BookManipulation>(book: &B) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if let Err(error) = validate_description_differs_from_title(book.title(), book.description()) {
        errors.push(error);
    }

    if let Err(field_errors) = book.validate() {
        errors.extend(flatten_field_errors(&field_errors));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::FieldErrors(errors))
    }
}
