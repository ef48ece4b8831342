//! Declarative link policies
//!
//! A policy lists, per resource kind, which links an item carries: the
//! relation, the named route it points at, the HTTP method, how to build
//! the route parameters from the request context, and when the link
//! applies. The [`LinkBuilder`](super::builder::LinkBuilder) interprets
//! policies; no resource has bespoke link code.

use crate::links::routes::RouteParams;
use axum::http::Method;
use uuid::Uuid;

/// Request context a link is built from
#[derive(Debug, Clone, Default)]
pub struct LinkContext {
    /// Identifier of the resource the links belong to
    pub id: Uuid,

    /// Identifier of the owning resource, for child resources
    pub parent_id: Option<Uuid>,

    /// Field selection of the current request
    pub fields: Option<String>,
}

impl LinkContext {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_fields(mut self, fields: Option<&str>) -> Self {
        self.fields = fields
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        self
    }
}

/// Builds route parameters from a link context
pub type ParamBuilder = fn(&LinkContext) -> RouteParams;

/// Decides whether a link applies in a context
pub type LinkCondition = fn(&LinkContext) -> bool;

/// Condition for links that are always present
pub fn always(_: &LinkContext) -> bool {
    true
}

/// One capability link in a policy
#[derive(Debug, Clone)]
pub struct LinkRule {
    pub rel: &'static str,
    pub route: &'static str,
    pub method: Method,
    pub params: ParamBuilder,
    pub condition: LinkCondition,
}

impl LinkRule {
    /// A link that is always emitted
    pub fn new(rel: &'static str, route: &'static str, method: Method, params: ParamBuilder) -> Self {
        Self {
            rel,
            route,
            method,
            params,
            condition: always,
        }
    }

    /// Only emit this link when `condition` holds
    pub fn when(mut self, condition: LinkCondition) -> Self {
        self.condition = condition;
        self
    }
}

/// Link policy for single items of one resource kind
///
/// Items always carry a `self` GET link to `self_route`; its parameters
/// get the request's `fields` added so re-fetching yields the same shape.
#[derive(Debug, Clone)]
pub struct ItemLinkPolicy {
    pub self_route: &'static str,
    pub self_params: ParamBuilder,
    pub rules: Vec<LinkRule>,
}

impl ItemLinkPolicy {
    pub fn new(self_route: &'static str, self_params: ParamBuilder) -> Self {
        Self {
            self_route,
            self_params,
            rules: Vec::new(),
        }
    }

    /// Append a capability link (emitted in insertion order)
    pub fn link(mut self, rule: LinkRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Link policy for collections of one resource kind
#[derive(Debug, Clone)]
pub struct CollectionLinkPolicy {
    /// Route of the collection itself
    pub route: &'static str,

    /// Name of the page number query parameter
    pub page_parameter: &'static str,
}

impl CollectionLinkPolicy {
    pub fn new(route: &'static str) -> Self {
        Self {
            route,
            page_parameter: "pageNumber",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_id(ctx: &LinkContext) -> RouteParams {
        RouteParams::new().with("id", ctx.id)
    }

    fn has_parent(ctx: &LinkContext) -> bool {
        ctx.parent_id.is_some()
    }

    #[test]
    fn test_context_drops_blank_fields() {
        let ctx = LinkContext::new(Uuid::nil()).with_fields(Some("  "));
        assert!(ctx.fields.is_none());
        let ctx = LinkContext::new(Uuid::nil()).with_fields(Some(" id "));
        assert_eq!(ctx.fields.as_deref(), Some("id"));
    }

    #[test]
    fn test_rules_keep_insertion_order() {
        let policy = ItemLinkPolicy::new("GetThing", by_id)
            .link(LinkRule::new("delete", "DeleteThing", Method::DELETE, by_id))
            .link(LinkRule::new("parent", "GetParent", Method::GET, by_id).when(has_parent));
        let rels: Vec<_> = policy.rules.iter().map(|r| r.rel).collect();
        assert_eq!(rels, vec!["delete", "parent"]);
        assert!((policy.rules[0].condition)(&LinkContext::default()));
        assert!(!(policy.rules[1].condition)(&LinkContext::default()));
    }

    #[test]
    fn test_collection_policy_defaults_page_parameter() {
        assert_eq!(CollectionLinkPolicy::new("GetThings").page_parameter, "pageNumber");
    }
}
