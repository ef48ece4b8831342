//! Field selection parsing and validation against a resource's declared fields

use crate::core::resource::Resource;

/// Client-requested field names, parsed from a comma-separated string
///
/// Tokens are trimmed and empty tokens dropped. An empty selection means
/// "all declared fields".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    tokens: Vec<String>,
}

impl FieldSelection {
    /// Parse an optional `fields` query value
    pub fn parse(fields: Option<&str>) -> Self {
        let tokens = fields
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        Self { tokens }
    }

    /// Whether every field was requested
    pub fn is_all(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Requested names in request order, as the client spelled them
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Check that every requested field exists on `T`
///
/// Matching ignores ASCII case. `None`, an empty string or a string of
/// only separators and whitespace is valid and means "all fields".
pub fn type_has_properties<T: Resource>(fields: Option<&str>) -> bool {
    FieldSelection::parse(fields)
        .tokens()
        .iter()
        .all(|token| T::field(token).is_some())
}

/// First requested field that `T` does not declare, if any
pub fn first_unknown_field<T: Resource>(fields: Option<&str>) -> Option<String> {
    FieldSelection::parse(fields)
        .tokens()
        .iter()
        .find(|token| T::field(token).is_none())
        .cloned()
}
