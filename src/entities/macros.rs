//! Macros for reducing boilerplate when declaring resources
//!
//! These macros generate the field tables behind data shaping and the
//! property accessors behind sorting.

/// Implement [`Resource`](crate::core::resource::Resource) for a transfer object
///
/// Fields are listed in declaration order as `"clientName" => rust_field`.
/// Every field type must convert into
/// [`FieldValue`](crate::core::field::FieldValue).
///
/// # Example
/// ```rust,ignore
/// pub struct AuthorDto {
///     pub id: Uuid,
///     pub name: String,
///     pub age: i32,
///     pub genre: String,
/// }
///
/// impl_resource!(AuthorDto, "author", {
///     "id" => id,
///     "name" => name,
///     "age" => age,
///     "genre" => genre,
/// });
/// ```
#[macro_export]
macro_rules! impl_resource {
    (
        $type:ty,
        $resource_name:expr,
        { $( $name:literal => $field:ident ),* $(,)? }
    ) => {
        impl $crate::core::resource::Resource for $type {
            fn resource_name() -> &'static str {
                $resource_name
            }

            fn fields() -> &'static [$crate::core::resource::FieldDescriptor<Self>] {
                const FIELDS: &[$crate::core::resource::FieldDescriptor<$type>] = &[
                    $(
                        $crate::core::resource::FieldDescriptor {
                            name: $name,
                            value: |item: &$type| {
                                $crate::core::field::FieldValue::from(item.$field.clone())
                            },
                        }
                    ),*
                ];
                FIELDS
            }
        }
    };
}

/// Implement [`Sortable`](crate::core::resource::Sortable) for a backing entity
///
/// Properties are listed as `"StorageName" => rust_field`; the storage
/// names are the ones property mappings resolve client sort fields to.
///
/// # Example
/// ```rust,ignore
/// impl_sortable!(Book, {
///     "Id" => id,
///     "Title" => title,
/// });
/// ```
#[macro_export]
macro_rules! impl_sortable {
    (
        $type:ty,
        { $( $name:literal => $field:ident ),* $(,)? }
    ) => {
        impl $crate::core::resource::Sortable for $type {
            fn sort_value(&self, property: &str) -> Option<$crate::core::field::FieldValue> {
                match property {
                    $( $name => Some($crate::core::field::FieldValue::from(self.$field.clone())), )*
                    _ => None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::field::FieldValue;
    use crate::core::resource::{Resource, Sortable};
    use uuid::Uuid;

    #[derive(Clone)]
    struct Widget {
        id: Uuid,
        label: String,
        weight: Option<i64>,
    }

    crate::impl_resource!(Widget, "widget", {
        "id" => id,
        "label" => label,
        "weight" => weight,
    });

    crate::impl_sortable!(Widget, {
        "Id" => id,
        "Label" => label,
    });

    fn widget() -> Widget {
        Widget {
            id: Uuid::new_v4(),
            label: "bolt".to_string(),
            weight: None,
        }
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let names: Vec<_> = Widget::fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["id", "label", "weight"]);
        assert_eq!(Widget::resource_name(), "widget");
    }

    #[test]
    fn test_field_lookup_ignores_case() {
        let field = Widget::field("LABEL").expect("label should resolve");
        assert_eq!(field.name, "label");
        assert_eq!((field.value)(&widget()), FieldValue::from("bolt"));
        assert!(Widget::field("colour").is_none());
    }

    #[test]
    fn test_optional_field_is_null() {
        let field = Widget::field("weight").unwrap();
        assert!((field.value)(&widget()).is_null());
    }

    #[test]
    fn test_sortable_properties() {
        let w = widget();
        assert_eq!(w.sort_value("Label"), Some(FieldValue::from("bolt")));
        assert_eq!(w.sort_value("Id"), Some(FieldValue::from(w.id)));
        assert_eq!(w.sort_value("label"), None);
    }
}
