//! Macros for declaring shapeable transfer objects and sortable entities

pub mod macros;
