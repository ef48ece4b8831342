//! Data shaping: projecting a transfer object onto the requested fields

use crate::core::field::FieldValue;
use crate::core::resource::Resource;
use crate::core::type_fields::FieldSelection;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Shaping failed because a requested field is not declared on the type
///
/// Field selections are validated before shaping, so reaching this is a
/// programming error rather than a client error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{field}' is not declared on resource '{resource}'")]
pub struct ShapeError {
    pub resource: &'static str,
    pub field: String,
}

/// Ordered field name → value projection of a resource
///
/// Keys use the declared casing of the field. Order follows the request
/// when fields were selected, declaration order otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedEntity {
    values: IndexMap<String, FieldValue>,
}

impl ShapedEntity {
    /// Get a value by its declared field name
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Field names in output order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate `(name, value)` pairs in output order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for ShapedEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Project `item` onto the fields named in `fields`
///
/// With no selection every declared field is emitted in declaration
/// order. Otherwise fields are emitted in request order, each once.
pub fn shape<T: Resource>(item: &T, fields: Option<&str>) -> Result<ShapedEntity, ShapeError> {
    let selection = FieldSelection::parse(fields);
    let mut values = IndexMap::new();

    if selection.is_all() {
        for field in T::fields() {
            values.insert(field.name.to_string(), (field.value)(item));
        }
        return Ok(ShapedEntity { values });
    }

    for token in selection.tokens() {
        let Some(field) = T::field(token) else {
            debug_assert!(false, "unvalidated field '{}' reached shaping", token);
            return Err(ShapeError {
                resource: T::resource_name(),
                field: token.clone(),
            });
        };
        if !values.contains_key(field.name) {
            values.insert(field.name.to_string(), (field.value)(item));
        }
    }

    Ok(ShapedEntity { values })
}

/// Shape every item of a collection with the same selection
pub fn shape_all<T: Resource>(
    items: &[T],
    fields: Option<&str>,
) -> Result<Vec<ShapedEntity>, ShapeError> {
    items.iter().map(|item| shape(item, fields)).collect()
}
