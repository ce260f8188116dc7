//! Link resolution
//!
//! Turns the rules registered for one instance into its `_links` block.

use crate::core::node::{LinkDescriptor, Links};
use crate::core::url::UrlContext;
use crate::links::rule::LinkRule;
use std::any::Any;

/// Relation whose templated links are rendered as curies
const CURIES_RELATION: &str = "curies";

/// Builds `_links` blocks against the current request
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    url: &'a UrlContext,
}

impl<'a> LinkResolver<'a> {
    /// Create a resolver for the given request context
    pub fn new(url: &'a UrlContext) -> Self {
        Self { url }
    }

    /// Resolve the links of `obj`
    ///
    /// Returns `None` when `rules` is `None` (no rules for the type).
    /// Ineligible rules are skipped, and computed links with an empty route are
    /// dropped. `paged` selects paged hrefs for computed links.
    pub fn resolve<'r, I>(&self, obj: &dyn Any, paged: bool, rules: Option<I>) -> Option<Links>
    where
        I: IntoIterator<Item = &'r LinkRule>,
    {
        let rules = rules?;
        let mut links = Links::new();

        for rule in rules.into_iter().filter(|rule| rule.can_create(obj)) {
            if let Some(descriptor) = self.describe(obj, paged, rule) {
                links.insert(rule.relation().to_string(), descriptor);
            }
        }

        Some(links)
    }

    fn describe(&self, obj: &dyn Any, paged: bool, rule: &LinkRule) -> Option<LinkDescriptor> {
        if rule.is_template() {
            let href = self.url.uri_for(rule.relation(), &rule.link_template(obj));

            return Some(if rule.relation().eq_ignore_ascii_case(CURIES_RELATION) {
                LinkDescriptor::curie(href, rule.name().map(str::to_string))
            } else {
                LinkDescriptor::templated(href)
            });
        }

        let route = rule.route_values(obj);
        if route.trim().is_empty() {
            tracing::trace!(relation = rule.relation(), "Link dropped: empty route");
            return None;
        }

        Some(LinkDescriptor::href(if paged {
            self.url.paged_uri_for(&route)
        } else {
            self.url.uri_for(rule.relation(), &route)
        }))
    }
}
