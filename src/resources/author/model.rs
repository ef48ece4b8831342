//! Author entity, transfer objects and mapping

use crate::resources::book::{Book, BookForCreation};
use crate::{impl_resource, impl_sortable};
use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Stored author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub date_of_death: Option<DateTime<Utc>>,
    pub genre: String,
    pub books: Vec<Book>,
}

impl_sortable!(Author, {
    "Id" => id,
    "FirstName" => first_name,
    "LastName" => last_name,
    "DateOfBirth" => date_of_birth,
    "Genre" => genre,
});

/// Author as exposed to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub genre: String,
}

impl_resource!(AuthorDto, "author", {
    "id" => id,
    "name" => name,
    "age" => age,
    "genre" => genre,
});

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: current_age(author.date_of_birth, author.date_of_death),
            genre: author.genre.clone(),
        }
    }
}

/// Age in whole years, up to the date of death for deceased authors
pub fn current_age(date_of_birth: DateTime<Utc>, date_of_death: Option<DateTime<Utc>>) -> i32 {
    age_at(date_of_birth, date_of_death.unwrap_or_else(Utc::now))
}

/// Whole years between `date_of_birth` and `until`
///
/// One year less while the anniversary has not been reached; a 29 February
/// birthday has its anniversary on 28 February in common years.
pub fn age_at(date_of_birth: DateTime<Utc>, until: DateTime<Utc>) -> i32 {
    let mut age = until.year() - date_of_birth.year();
    let anniversary_year = date_of_birth.year() + age;
    let anniversary = date_of_birth.with_year(anniversary_year).or_else(|| {
        (date_of_birth - Duration::days(1)).with_year(anniversary_year)
    });
    match anniversary {
        Some(anniversary) if until < anniversary => age -= 1,
        _ => {}
    }
    age
}

/// Request body for creating an author, with optional nested books
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreation {
    #[validate(
        required(message = "You should fill out a first name."),
        length(min = 1, max = 50, message = "The first name should have between 1 and 50 characters.")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "You should fill out a last name."),
        length(min = 1, max = 50, message = "The last name should have between 1 and 50 characters.")
    )]
    pub last_name: Option<String>,

    #[validate(required(message = "You should fill out a date of birth."))]
    pub date_of_birth: Option<DateTime<Utc>>,

    #[validate(
        required(message = "You should fill out a genre."),
        length(min = 1, max = 50, message = "The genre should have between 1 and 50 characters.")
    )]
    pub genre: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub books: Vec<BookForCreation>,
}

/// Request body for creating an author who has died
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreationWithDateOfDeath {
    #[validate(
        required(message = "You should fill out a first name."),
        length(min = 1, max = 50, message = "The first name should have between 1 and 50 characters.")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "You should fill out a last name."),
        length(min = 1, max = 50, message = "The last name should have between 1 and 50 characters.")
    )]
    pub last_name: Option<String>,

    #[validate(required(message = "You should fill out a date of birth."))]
    pub date_of_birth: Option<DateTime<Utc>>,

    pub date_of_death: Option<DateTime<Utc>>,

    #[validate(
        required(message = "You should fill out a genre."),
        length(min = 1, max = 50, message = "The genre should have between 1 and 50 characters.")
    )]
    pub genre: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub books: Vec<BookForCreation>,
}

impl From<AuthorForCreation> for Author {
    fn from(body: AuthorForCreation) -> Self {
        new_author(
            body.first_name,
            body.last_name,
            body.date_of_birth,
            None,
            body.genre,
            body.books,
        )
    }
}

impl From<AuthorForCreationWithDateOfDeath> for Author {
    fn from(body: AuthorForCreationWithDateOfDeath) -> Self {
        new_author(
            body.first_name,
            body.last_name,
            body.date_of_birth,
            body.date_of_death,
            body.genre,
            body.books,
        )
    }
}

fn new_author(
    first_name: Option<String>,
    last_name: Option<String>,
    date_of_birth: Option<DateTime<Utc>>,
    date_of_death: Option<DateTime<Utc>>,
    genre: Option<String>,
    books: Vec<BookForCreation>,
) -> Author {
    let id = Uuid::new_v4();
    Author {
        id,
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
        date_of_birth: date_of_birth.unwrap_or_default(),
        date_of_death,
        genre: genre.unwrap_or_default(),
        books: books.into_iter().map(|book| book.into_book(id)).collect(),
    }
}
