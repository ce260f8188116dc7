//! Link registry
//!
//! Maps each resource type to its relation-named link rules. The registry has
//! two phases: a mutable [`LinkRegistry`] filled at startup (by hand or by
//! merging the registries of independent modules), then an immutable
//! [`SealedRegistry`] shared by every projection.

use crate::core::resource::{Resource, ResourceType};
use crate::links::rule::LinkRule;
use indexmap::IndexMap;
use std::sync::Arc;

/// Registry of link rules, per resource type and relation
///
/// Registering an existing (type, relation) pair replaces the previous rule;
/// the relation keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct LinkRegistry {
    /// Maps resource type -> relation -> rule
    links: IndexMap<ResourceType, IndexMap<String, LinkRule>>,
}

impl LinkRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            links: IndexMap::new(),
        }
    }

    /// Store a rule for `resource_type`
    pub fn insert(&mut self, resource_type: ResourceType, rule: LinkRule) -> &mut Self {
        let relations = self.links.entry(resource_type).or_default();
        let relation = rule.relation().to_string();

        if relations.insert(relation.clone(), rule).is_some() {
            tracing::debug!(
                resource_type = %resource_type,
                relation = %relation,
                "Link rule replaced by a later registration"
            );
        }

        self
    }

    /// Register a computed link for `T`
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// registry.add_link::<Order, _, _>(
    ///     "self",
    ///     "get_order",
    ///     |o| format!("/orders/{}", o.id),
    ///     |_| true,
    /// );
    /// ```
    pub fn add_link<T, R, C>(
        &mut self,
        relation: impl Into<String>,
        route_name: impl Into<String>,
        route_values: R,
        can_create: C,
    ) -> &mut Self
    where
        T: Resource,
        R: Fn(&T) -> String + Send + Sync + 'static,
        C: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.insert(
            ResourceType::of::<T>(),
            LinkRule::computed(relation, route_name, route_values, can_create),
        )
    }

    /// Register a templated link for `T`
    pub fn add_link_template<T, G, C>(
        &mut self,
        relation: impl Into<String>,
        route_name: impl Into<String>,
        name: impl Into<String>,
        template: impl Into<String>,
        template_values: G,
        can_create: C,
    ) -> &mut Self
    where
        T: Resource,
        G: Fn(&T, &str) -> String + Send + Sync + 'static,
        C: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.insert(
            ResourceType::of::<T>(),
            LinkRule::templated(
                relation,
                route_name,
                name,
                template,
                template_values,
                can_create,
            ),
        )
    }

    /// Register a link carrying both producers for `T`
    ///
    /// The link is templated when `template` is non-empty.
    #[allow(clippy::too_many_arguments)]
    pub fn add_full_link<T, R, G, C>(
        &mut self,
        relation: impl Into<String>,
        route_name: impl Into<String>,
        name: Option<String>,
        template: impl Into<String>,
        route_values: R,
        template_values: G,
        can_create: C,
    ) -> &mut Self
    where
        T: Resource,
        R: Fn(&T) -> String + Send + Sync + 'static,
        G: Fn(&T, &str) -> String + Send + Sync + 'static,
        C: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.insert(
            ResourceType::of::<T>(),
            LinkRule::full(
                relation,
                route_name,
                name,
                template,
                route_values,
                template_values,
                can_create,
            ),
        )
    }

    /// Merge a child registry into this one
    ///
    /// Entries of `other` replace colliding (type, relation) pairs.
    pub fn register(&mut self, other: LinkRegistry) -> &mut Self {
        for (resource_type, relations) in other.links {
            for (_, rule) in relations {
                self.insert(resource_type, rule);
            }
        }
        self
    }

    /// Whether at least one rule is registered for `resource_type`
    pub fn has_rules(&self, resource_type: ResourceType) -> bool {
        self.links
            .get(&resource_type)
            .is_some_and(|relations| !relations.is_empty())
    }

    /// Rules registered for `resource_type`, in registration order
    ///
    /// Returns `None` when [`has_rules`](Self::has_rules) is false.
    pub fn rules_for(&self, resource_type: ResourceType) -> Option<Vec<&LinkRule>> {
        if !self.has_rules(resource_type) {
            return None;
        }
        self.links
            .get(&resource_type)
            .map(|relations| relations.values().collect())
    }

    /// Relation names registered for `resource_type`
    pub fn relations_for(&self, resource_type: ResourceType) -> Vec<&str> {
        self.links
            .get(&resource_type)
            .map(|relations| relations.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All resource types with rules
    pub fn resource_types(&self) -> Vec<ResourceType> {
        self.links.keys().copied().collect()
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.links.values().map(IndexMap::len).sum()
    }

    /// Whether no rule is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the registry for concurrent, read-only use
    pub fn seal(self) -> SealedRegistry {
        tracing::debug!(
            resource_types = self.links.len(),
            rules = self.len(),
            "Link registry sealed"
        );
        SealedRegistry {
            inner: Arc::new(self),
        }
    }
}

/// Immutable, cheaply clonable view of a [`LinkRegistry`]
///
/// Only read operations are available; it can be shared across threads and
/// requests without locking.
#[derive(Debug, Clone, Default)]
pub struct SealedRegistry {
    inner: Arc<LinkRegistry>,
}

impl SealedRegistry {
    /// Whether at least one rule is registered for `resource_type`
    pub fn has_rules(&self, resource_type: ResourceType) -> bool {
        self.inner.has_rules(resource_type)
    }

    /// Rules registered for `resource_type`, in registration order
    pub fn rules_for(&self, resource_type: ResourceType) -> Option<Vec<&LinkRule>> {
        self.inner.rules_for(resource_type)
    }

    /// Relation names registered for `resource_type`
    pub fn relations_for(&self, resource_type: ResourceType) -> Vec<&str> {
        self.inner.relations_for(resource_type)
    }

    /// All resource types with rules
    pub fn resource_types(&self) -> Vec<ResourceType> {
        self.inner.resource_types()
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no rule is registered
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
