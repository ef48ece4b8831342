//! Named routes and URI generation
//!
//! Link targets are produced from a route name plus a parameter map.
//! Parameters that match a `{placeholder}` in the route template fill the
//! path; the rest become the query string, in insertion order.

use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Ordered route parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: IndexMap<String, String>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a parameter
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    /// Add a parameter only when a value is present
    pub fn with_opt<V: fmt::Display>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Route resolution failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("unknown route '{0}'")]
    UnknownRoute(String),

    #[error("route '{route}' requires parameter '{parameter}'")]
    MissingParameter { route: String, parameter: String },

    #[error("cannot encode query for route '{route}': {message}")]
    Encoding { route: String, message: String },
}

/// Turns a route name and parameters into a URI
///
/// Resolution is a pure function of its inputs.
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, route: &str, params: &RouteParams) -> Result<String, RouteError>;
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

#[derive(Debug, Clone)]
struct RouteTemplate {
    template: String,
    placeholders: Vec<String>,
}

/// Table of named route templates rooted at a base URL
///
/// # Example
/// ```rust,ignore
/// let routes = RouteTable::new("http://localhost:3000")
///     .route("GetAuthor", "/api/authors/{id}");
///
/// let href = routes.resolve("GetAuthor", &RouteParams::new().with("id", id).with("fields", "id,name"))?;
/// // http://localhost:3000/api/authors/<id>?fields=id%2Cname
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    base_url: String,
    routes: HashMap<String, RouteTemplate>,
}

impl RouteTable {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            routes: HashMap::new(),
        }
    }

    /// Register a named route template such as `/api/authors/{id}`
    pub fn route(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        let template = template.into();
        let placeholders = placeholder_regex()
            .captures_iter(&template)
            .map(|caps| caps[1].to_string())
            .collect();
        self.routes.insert(
            name.into(),
            RouteTemplate {
                template,
                placeholders,
            },
        );
        self
    }

    /// Whether a route name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl UrlResolver for RouteTable {
    fn resolve(&self, route: &str, params: &RouteParams) -> Result<String, RouteError> {
        let template = self
            .routes
            .get(route)
            .ok_or_else(|| RouteError::UnknownRoute(route.to_string()))?;

        let mut path = template.template.clone();
        for placeholder in &template.placeholders {
            let value = params
                .get(placeholder)
                .ok_or_else(|| RouteError::MissingParameter {
                    route: route.to_string(),
                    parameter: placeholder.clone(),
                })?;
            path = path.replace(&format!("{{{}}}", placeholder), value);
        }

        let query: Vec<(&str, &str)> = params
            .iter()
            .filter(|(name, _)| !template.placeholders.iter().any(|p| p == name))
            .collect();

        let mut uri = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let encoded =
                serde_urlencoded::to_string(&query).map_err(|e| RouteError::Encoding {
                    route: route.to_string(),
                    message: e.to_string(),
                })?;
            uri.push('?');
            uri.push_str(&encoded);
        }

        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new("http://localhost:3000/")
            .route("GetAuthors", "/api/authors")
            .route("GetAuthor", "/api/authors/{id}")
            .route("GetBookForAuthor", "/api/authors/{authorId}/books/{id}")
    }

    #[test]
    fn test_path_parameters_are_filled() {
        let uri = table()
            .resolve(
                "GetBookForAuthor",
                &RouteParams::new().with("id", "b1").with("authorId", "a1"),
            )
            .unwrap();
        assert_eq!(uri, "http://localhost:3000/api/authors/a1/books/b1");
    }

    #[test]
    fn test_extra_parameters_become_query_in_order() {
        let uri = table()
            .resolve(
                "GetAuthors",
                &RouteParams::new()
                    .with("orderBy", "name desc")
                    .with("pageNumber", 2)
                    .with_opt("genre", None::<String>),
            )
            .unwrap();
        assert_eq!(
            uri,
            "http://localhost:3000/api/authors?orderBy=name+desc&pageNumber=2"
        );
    }

    #[test]
    fn test_query_values_are_encoded() {
        let uri = table()
            .resolve(
                "GetAuthor",
                &RouteParams::new().with("id", "a1").with("fields", "id,name"),
            )
            .unwrap();
        assert_eq!(uri, "http://localhost:3000/api/authors/a1?fields=id%2Cname");
    }

    #[test]
    fn test_unknown_route() {
        assert_eq!(
            table().resolve("Nope", &RouteParams::new()),
            Err(RouteError::UnknownRoute("Nope".to_string()))
        );
    }

    #[test]
    fn test_missing_path_parameter() {
        assert_eq!(
            table().resolve("GetAuthor", &RouteParams::new()),
            Err(RouteError::MissingParameter {
                route: "GetAuthor".to_string(),
                parameter: "id".to_string()
            })
        );
    }

    #[test]
    fn test_relative_base() {
        let table = RouteTable::new("").route("GetAuthor", "/api/authors/{id}");
        assert_eq!(
            table
                .resolve("GetAuthor", &RouteParams::new().with("id", 7))
                .unwrap(),
            "/api/authors/7"
        );
        assert!(table.contains("GetAuthor"));
    }
}
