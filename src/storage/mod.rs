//! Storage for authors and books

pub mod in_memory;
pub mod repository;
pub mod seed;

pub use in_memory::InMemoryLibraryRepository;
pub use repository::{AuthorFilter, LibraryRepository};
