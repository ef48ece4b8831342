//! Authors resource

pub mod descriptor;
pub mod handlers;
pub mod links;
pub mod model;

pub use descriptor::AuthorDescriptor;
pub use model::{
    Author, AuthorDto, AuthorForCreation, AuthorForCreationWithDateOfDeath, current_age,
};
