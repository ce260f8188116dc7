//! Link rules
//!
//! A [`LinkRule`] describes one relation of one resource type. Its producer
//! closures are written against the concrete type `T` at registration time
//! and stored type-erased; at resolution time the instance is downcast back
//! to `T` before the closure runs.

use crate::core::resource::Resource;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

type RouteValuesFn = Arc<dyn Fn(&dyn Any) -> String + Send + Sync>;
type TemplateFn = Arc<dyn Fn(&dyn Any, &str) -> String + Send + Sync>;
type CanCreateFn = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;

/// One relation of one resource type
#[derive(Clone)]
pub struct LinkRule {
    relation: String,
    route_name: String,
    name: Option<String>,
    template: String,
    route_values: RouteValuesFn,
    template_values: TemplateFn,
    can_create: CanCreateFn,
}

impl LinkRule {
    /// A computed link: the href is built from the route fragment returned
    /// by `route_values`
    pub fn computed<T, R, C>(
        relation: impl Into<String>,
        route_name: impl Into<String>,
        route_values: R,
        can_create: C,
    ) -> Self
    where
        T: Resource,
        R: Fn(&T) -> String + Send + Sync + 'static,
        C: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::full::<T, _, _, _>(
            relation,
            route_name,
            None,
            String::new(),
            route_values,
            |_: &T, template: &str| template.to_string(),
            can_create,
        )
    }

    /// A templated link: the href is the expansion of `template`
    pub fn templated<T, G, C>(
        relation: impl Into<String>,
        route_name: impl Into<String>,
        name: impl Into<String>,
        template: impl Into<String>,
        template_values: G,
        can_create: C,
    ) -> Self
    where
        T: Resource,
        G: Fn(&T, &str) -> String + Send + Sync + 'static,
        C: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::full::<T, _, _, _>(
            relation,
            route_name,
            Some(name.into()),
            template,
            |_: &T| String::new(),
            template_values,
            can_create,
        )
    }

    /// A rule carrying both producers
    ///
    /// The rule behaves as a templated link when `template` is non-empty and
    /// as a computed link otherwise.
    pub fn full<T, R, G, C>(
        relation: impl Into<String>,
        route_name: impl Into<String>,
        name: Option<String>,
        template: impl Into<String>,
        route_values: R,
        template_values: G,
        can_create: C,
    ) -> Self
    where
        T: Resource,
        R: Fn(&T) -> String + Send + Sync + 'static,
        G: Fn(&T, &str) -> String + Send + Sync + 'static,
        C: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            relation: relation.into(),
            route_name: route_name.into(),
            name,
            template: template.into(),
            route_values: Arc::new(move |obj: &dyn Any| {
                obj.downcast_ref::<T>().map(&route_values).unwrap_or_default()
            }),
            template_values: Arc::new(move |obj: &dyn Any, template: &str| {
                obj.downcast_ref::<T>()
                    .map(|t| template_values(t, template))
                    .unwrap_or_default()
            }),
            can_create: Arc::new(move |obj: &dyn Any| {
                obj.downcast_ref::<T>().is_some_and(&can_create)
            }),
        }
    }

    /// Relation name (e.g. `self`, `next`, `curies`)
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Opaque identifier of the target endpoint
    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    /// Display name, used by curie links
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Template string; empty for computed links
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the rule produces a templated link
    pub fn is_template(&self) -> bool {
        !self.template.is_empty()
    }

    /// Route fragment for a computed link
    ///
    /// Empty when `obj` is not of the registered type.
    pub fn route_values(&self, obj: &dyn Any) -> String {
        (self.route_values)(obj)
    }

    /// Expanded template for a templated link
    pub fn link_template(&self, obj: &dyn Any) -> String {
        (self.template_values)(obj, &self.template)
    }

    /// Whether the rule applies to `obj`
    pub fn can_create(&self, obj: &dyn Any) -> bool {
        (self.can_create)(obj)
    }
}

impl fmt::Debug for LinkRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkRule")
            .field("relation", &self.relation)
            .field("route_name", &self.route_name)
            .field("name", &self.name)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
