//! Books resource, nested under authors

pub mod descriptor;
pub mod handlers;
pub mod links;
pub mod model;

pub use descriptor::BookDescriptor;
pub use model::{
    Book, BookDto, BookForCreation, BookForUpdate, validate_book,
    validate_description_differs_from_title,
};
