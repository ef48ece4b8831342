//! Property mapping registry: translating client sort expressions into
//! backing-storage order clauses
//!
//! Each (transfer object, entity) pair registers how its client-facing
//! fields map onto backing properties. A client field may expand into
//! several backing properties (e.g. `name` → `FirstName, LastName`), and a
//! mapping may flip the direction when sorting descending (e.g. `age`
//! sorts by `DateOfBirth` in the opposite direction).

use crate::core::resource::Sortable;
use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Mapping from one client field to one or more backing properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMapping {
    pub client_field: String,
    pub source_properties: Vec<String>,
    pub revert_on_descending: bool,
}

impl PropertyMapping {
    /// Create a mapping that keeps the requested direction
    pub fn new<I, S>(client_field: impl Into<String>, source_properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut properties: Vec<String> = Vec::new();
        for property in source_properties {
            let property = property.into();
            if !properties.contains(&property) {
                properties.push(property);
            }
        }

        Self {
            client_field: client_field.into(),
            source_properties: properties,
            revert_on_descending: false,
        }
    }

    /// Flip the direction of every backing property when sorting descending
    pub fn reverted(mut self) -> Self {
        self.revert_on_descending = true;
        self
    }
}

/// One resolved sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub property: String,
    pub descending: bool,
}

/// Ordered list of backing sort keys derived from a client `orderBy`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderClause {
    keys: Vec<SortKey>,
}

impl OrderClause {
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Compare two entities key by key
    ///
    /// A property missing on an entity compares as equal for that key.
    pub fn compare<E: Sortable>(&self, a: &E, b: &E) -> Ordering {
        for key in &self.keys {
            let ordering = match (a.sort_value(&key.property), b.sort_value(&key.property)) {
                (Some(left), Some(right)) => left.sort_cmp(&right),
                _ => Ordering::Equal,
            };
            let ordering = if key.descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Sort entities in place (stable)
    pub fn sort<E: Sortable>(&self, items: &mut [E]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

/// Why an `orderBy` expression was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderByError {
    #[error("sort expression is empty")]
    Empty,

    #[error("malformed sort token '{0}'")]
    Malformed(String),

    #[error("no mapping for sort field '{0}'")]
    UnknownField(String),

    #[error("no property mappings registered for {dto} -> {entity}")]
    Unregistered {
        dto: &'static str,
        entity: &'static str,
    },
}

#[derive(Debug, Default)]
struct MappingSet {
    /// Keyed by lowercased client field
    entries: HashMap<String, PropertyMapping>,
}

/// Process-wide registry of property mappings
///
/// Built once during startup and then shared read-only (behind an `Arc`)
/// by every request.
#[derive(Debug, Default)]
pub struct PropertyMappingRegistry {
    sets: HashMap<(TypeId, TypeId), MappingSet>,
}

impl PropertyMappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the mappings for transfer type `D` backed by entity type `E`
    ///
    /// Registering the same pair again adds to (and overrides) its mappings.
    pub fn register<D: 'static, E: 'static>(
        &mut self,
        mappings: impl IntoIterator<Item = PropertyMapping>,
    ) {
        let set = self
            .sets
            .entry((TypeId::of::<D>(), TypeId::of::<E>()))
            .or_default();
        for mapping in mappings {
            set.entries
                .insert(mapping.client_field.to_ascii_lowercase(), mapping);
        }
        tracing::debug!(
            dto = type_name::<D>(),
            entity = type_name::<E>(),
            count = set.entries.len(),
            "Registered property mappings"
        );
    }

    /// Resolve a client field (ASCII case-insensitive)
    pub fn resolve<D: 'static, E: 'static>(&self, client_field: &str) -> Option<&PropertyMapping> {
        self.sets
            .get(&(TypeId::of::<D>(), TypeId::of::<E>()))?
            .entries
            .get(&client_field.to_ascii_lowercase())
    }

    /// Whether `order_by` is a valid sort expression for `D` → `E`
    ///
    /// False for an empty expression, a malformed token or a field with no
    /// mapping. Must be checked before any query runs.
    pub fn valid_order_by<D: 'static, E: 'static>(&self, order_by: &str) -> bool {
        self.order_clause::<D, E>(order_by).is_ok()
    }

    /// Parse and resolve `order_by` into a backing order clause
    ///
    /// Tokens are comma separated, each `field`, `field asc` or
    /// `field desc` (keywords are case-insensitive). Composite mappings
    /// expand in their registered order.
    pub fn order_clause<D: 'static, E: 'static>(
        &self,
        order_by: &str,
    ) -> Result<OrderClause, OrderByError> {
        if order_by.trim().is_empty() {
            return Err(OrderByError::Empty);
        }

        let set = self
            .sets
            .get(&(TypeId::of::<D>(), TypeId::of::<E>()))
            .ok_or(OrderByError::Unregistered {
                dto: type_name::<D>(),
                entity: type_name::<E>(),
            })?;

        let mut keys = Vec::new();
        for token in order_by.split(',') {
            let (field, descending) = parse_sort_token(token)?;
            let mapping = set
                .entries
                .get(&field.to_ascii_lowercase())
                .ok_or_else(|| OrderByError::UnknownField(field.to_string()))?;

            let descending = descending != mapping.revert_on_descending;
            keys.extend(mapping.source_properties.iter().map(|property| SortKey {
                property: property.clone(),
                descending,
            }));
        }

        Ok(OrderClause { keys })
    }
}

/// Split a single sort token into its field and direction
fn parse_sort_token(token: &str) -> Result<(&str, bool), OrderByError> {
    let mut parts = token.split_whitespace();
    let field = parts
        .next()
        .ok_or_else(|| OrderByError::Malformed(token.to_string()))?;

    let descending = match parts.next() {
        None => false,
        Some(direction) if direction.eq_ignore_ascii_case("asc") => false,
        Some(direction) if direction.eq_ignore_ascii_case("desc") => true,
        Some(_) => return Err(OrderByError::Malformed(token.trim().to_string())),
    };

    if parts.next().is_some() {
        return Err(OrderByError::Malformed(token.trim().to_string()));
    }

    Ok((field, descending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;

    struct PersonDto;

    #[derive(Debug, Clone)]
    struct Person {
        first: &'static str,
        last: &'static str,
        born: i64,
    }

    impl Sortable for Person {
        fn sort_value(&self, property: &str) -> Option<FieldValue> {
            match property {
                "FirstName" => Some(self.first.into()),
                "LastName" => Some(self.last.into()),
                "DateOfBirth" => Some(self.born.into()),
                _ => None,
            }
        }
    }

    fn registry() -> PropertyMappingRegistry {
        let mut registry = PropertyMappingRegistry::new();
        registry.register::<PersonDto, Person>([
            PropertyMapping::new("name", ["FirstName", "LastName"]),
            PropertyMapping::new("age", ["DateOfBirth"]).reverted(),
        ]);
        registry
    }

    #[test]
    fn test_resolve_ignores_case() {
        let registry = registry();
        let mapping = registry.resolve::<PersonDto, Person>("NAME").unwrap();
        assert_eq!(mapping.source_properties, vec!["FirstName", "LastName"]);
        assert!(registry.resolve::<PersonDto, Person>("genre").is_none());
    }

    #[test]
    fn test_valid_order_by() {
        let registry = registry();
        assert!(registry.valid_order_by::<PersonDto, Person>("name desc, age"));
        assert!(registry.valid_order_by::<PersonDto, Person>("Name ASC"));
        assert!(!registry.valid_order_by::<PersonDto, Person>("unknownfield"));
        assert!(!registry.valid_order_by::<PersonDto, Person>(""));
        assert!(!registry.valid_order_by::<PersonDto, Person>("   "));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let registry = registry();
        assert_eq!(
            registry.order_clause::<PersonDto, Person>("name sideways"),
            Err(OrderByError::Malformed("name sideways".to_string()))
        );
        assert!(!registry.valid_order_by::<PersonDto, Person>("name desc extra"));
        assert!(!registry.valid_order_by::<PersonDto, Person>("name,,age"));
    }

    #[test]
    fn test_unregistered_pair_is_invalid() {
        let registry = PropertyMappingRegistry::new();
        assert!(matches!(
            registry.order_clause::<PersonDto, Person>("name"),
            Err(OrderByError::Unregistered { .. })
        ));
    }

    #[test]
    fn test_composite_mapping_preserves_expansion_order() {
        let clause = registry()
            .order_clause::<PersonDto, Person>("name desc")
            .unwrap();
        assert_eq!(
            clause.keys(),
            &[
                SortKey {
                    property: "FirstName".to_string(),
                    descending: true
                },
                SortKey {
                    property: "LastName".to_string(),
                    descending: true
                },
            ]
        );
    }

    #[test]
    fn test_reverted_mapping_flips_direction() {
        let registry = registry();
        let asc = registry.order_clause::<PersonDto, Person>("age").unwrap();
        assert!(asc.keys()[0].descending);
        let desc = registry.order_clause::<PersonDto, Person>("age desc").unwrap();
        assert!(!desc.keys()[0].descending);
    }

    #[test]
    fn test_duplicate_source_properties_collapse() {
        let mapping = PropertyMapping::new("id", ["Id", "Id"]);
        assert_eq!(mapping.source_properties, vec!["Id"]);
    }

    #[test]
    fn test_sort_by_clause() {
        let mut people = vec![
            Person { first: "Stephen", last: "King", born: 1947 },
            Person { first: "Douglas", last: "Adams", born: 1952 },
            Person { first: "Stephen", last: "Fry", born: 1957 },
        ];
        let registry = registry();

        registry
            .order_clause::<PersonDto, Person>("name")
            .unwrap()
            .sort(&mut people);
        let names: Vec<_> = people.iter().map(|p| (p.first, p.last)).collect();
        assert_eq!(
            names,
            vec![("Douglas", "Adams"), ("Stephen", "Fry"), ("Stephen", "King")]
        );

        // youngest first: age ascending means date of birth descending
        registry
            .order_clause::<PersonDto, Person>("age")
            .unwrap()
            .sort(&mut people);
        let born: Vec<_> = people.iter().map(|p| p.born).collect();
        assert_eq!(born, vec![1957, 1952, 1947]);
    }
}
