//! Field descriptor tables for transfer objects
//!
//! Every transfer-object type declares its public fields once, in order,
//! as a static table of `(name, accessor)` pairs. Field validation and
//! data shaping work over these tables instead of runtime reflection.

use crate::core::field::FieldValue;

/// A single declared field of a transfer object
pub struct FieldDescriptor<T> {
    /// Field name as exposed to clients (original casing)
    pub name: &'static str,

    /// Reads the field value from an instance
    pub value: fn(&T) -> FieldValue,
}

impl<T> FieldDescriptor<T> {
    /// Whether this field matches a client-supplied name (ASCII case-insensitive)
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Trait for transfer objects that can be validated against and shaped
///
/// Implemented with the [`impl_resource!`](crate::impl_resource) macro:
///
/// ```rust,ignore
/// impl_resource!(BookDto, "book", {
///     "id" => id,
///     "title" => title,
///     "description" => description,
///     "authorId" => author_id,
/// });
/// ```
pub trait Resource: Send + Sync + 'static {
    /// Singular resource name (e.g., "author")
    fn resource_name() -> &'static str;

    /// Declared public fields, in declaration order
    fn fields() -> &'static [FieldDescriptor<Self>]
    where
        Self: Sized;

    /// Find a declared field by name, ignoring ASCII case
    fn field(name: &str) -> Option<&'static FieldDescriptor<Self>>
    where
        Self: Sized,
    {
        Self::fields().iter().find(|field| field.matches(name))
    }
}

/// Trait for backing entities that can be ordered by storage property name
///
/// Property names are the backing names used in property mappings
/// (e.g. "FirstName", "DateOfBirth").
pub trait Sortable {
    /// Value of a backing property, or `None` if the entity has no such property
    fn sort_value(&self, property: &str) -> Option<FieldValue>;
}
