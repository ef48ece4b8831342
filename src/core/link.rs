//! Hypermedia link value types
//!
//! A [`Link`] tells the client what it can do next with a resource.
//! [`LinkedResource`] and [`LinkedCollection`] attach link lists to
//! shaped resources and to collections of them.

use crate::core::shaping::ShapedEntity;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A navigational link: target, relation and HTTP verb
#[derive(Debug, Clone, serde::Serialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }
}

/// A shaped resource with its links
///
/// Serializes as the shaped fields followed by a `links` member.
#[derive(Debug, Clone)]
pub struct LinkedResource {
    pub resource: ShapedEntity,
    pub links: Vec<Link>,
}

impl LinkedResource {
    pub fn new(resource: ShapedEntity, links: Vec<Link>) -> Self {
        Self { resource, links }
    }
}

impl Serialize for LinkedResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.resource.len() + 1))?;
        for (name, value) in self.resource.iter() {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry("links", &self.links)?;
        map.end()
    }
}

/// A collection of linked resources with collection-level links
#[derive(Debug, Clone, serde::Serialize)]
pub struct LinkedCollection<T = LinkedResource> {
    pub value: Vec<T>,
    pub links: Vec<Link>,
}

impl<T> LinkedCollection<T> {
    pub fn new(value: Vec<T>, links: Vec<Link>) -> Self {
        Self { value, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shaping::shape;
    use uuid::Uuid;

    #[derive(Clone)]
    struct Note {
        id: Uuid,
        text: String,
    }

    crate::impl_resource!(Note, "note", {
        "id" => id,
        "text" => text,
    });

    fn note() -> Note {
        Note {
            id: Uuid::nil(),
            text: "hello".to_string(),
        }
    }

    #[test]
    fn test_link_serialization() {
        let link = Link::new("http://localhost/api/notes", "self", "GET");
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            serde_json::json!({
                "href": "http://localhost/api/notes",
                "rel": "self",
                "method": "GET"
            })
        );
    }

    #[test]
    fn test_linked_resource_appends_links_member() {
        let shaped = shape(&note(), Some("text")).unwrap();
        let linked = LinkedResource::new(shaped, vec![Link::new("/n", "self", "GET")]);
        let json = serde_json::to_string(&linked).unwrap();
        assert_eq!(
            json,
            r#"{"text":"hello","links":[{"href":"/n","rel":"self","method":"GET"}]}"#
        );
    }

    #[test]
    fn test_linked_collection_shape() {
        let shaped = shape(&note(), None).unwrap();
        let collection = LinkedCollection::new(
            vec![LinkedResource::new(shaped, vec![])],
            vec![Link::new("/notes", "self", "GET")],
        );
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["value"][0]["text"], "hello");
        assert_eq!(json["value"][0]["links"], serde_json::json!([]));
        assert_eq!(json["links"][0]["rel"], "self");
    }
}
