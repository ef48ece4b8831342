//! Generic link builder interpreting link policies

use crate::core::error::LinkError;
use crate::core::link::Link;
use crate::links::policy::{CollectionLinkPolicy, ItemLinkPolicy, LinkContext};
use crate::links::routes::{RouteParams, UrlResolver};
use axum::http::Method;

/// Builds link sets from policies and a route resolver
///
/// Decides which links to emit and which parameters each carries; URI
/// formatting is left to the [`UrlResolver`]. A link whose target cannot
/// be resolved fails the whole set.
pub struct LinkBuilder<'a> {
    resolver: &'a dyn UrlResolver,
}

impl<'a> LinkBuilder<'a> {
    pub fn new(resolver: &'a dyn UrlResolver) -> Self {
        Self { resolver }
    }

    /// Links for a single item: `self` first, then the policy's rules
    pub fn links_for_item(
        &self,
        policy: &ItemLinkPolicy,
        ctx: &LinkContext,
    ) -> Result<Vec<Link>, LinkError> {
        let mut links = Vec::with_capacity(policy.rules.len() + 1);

        let self_params = (policy.self_params)(ctx).with_opt("fields", ctx.fields.as_deref());
        links.push(self.link(policy.self_route, &self_params, "self", &Method::GET)?);

        for rule in &policy.rules {
            if !(rule.condition)(ctx) {
                continue;
            }
            let params = (rule.params)(ctx);
            links.push(self.link(rule.route, &params, rule.rel, &rule.method)?);
        }

        Ok(links)
    }

    /// Links for a collection page
    ///
    /// `self` keeps every query parameter; `nextPage` / `previousPage`
    /// copy them with the page number moved by one. Order is self, next,
    /// previous. Without a page number only `self` is emitted.
    pub fn links_for_collection(
        &self,
        policy: &CollectionLinkPolicy,
        query: &RouteParams,
        page_number: Option<usize>,
        has_next: bool,
        has_previous: bool,
    ) -> Result<Vec<Link>, LinkError> {
        let Some(page_number) = page_number else {
            return Ok(vec![self.link(policy.route, query, "self", &Method::GET)?]);
        };

        let at_page = |page: usize| query.clone().with(policy.page_parameter, page);

        let mut links = vec![self.link(policy.route, &at_page(page_number), "self", &Method::GET)?];

        if has_next {
            links.push(self.link(
                policy.route,
                &at_page(page_number + 1),
                "nextPage",
                &Method::GET,
            )?);
        }

        if has_previous {
            links.push(self.link(
                policy.route,
                &at_page(page_number.saturating_sub(1)),
                "previousPage",
                &Method::GET,
            )?);
        }

        Ok(links)
    }

    fn link(
        &self,
        route: &str,
        params: &RouteParams,
        rel: &str,
        method: &Method,
    ) -> Result<Link, LinkError> {
        let href = self
            .resolver
            .resolve(route, params)
            .map_err(|source| LinkError::Resolution {
                rel: rel.to_string(),
                source,
            })?;
        Ok(Link::new(href, rel, method.as_str()))
    }
}
