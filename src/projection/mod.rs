//! Resource projection
//!
//! Walks a resource graph and produces its HAL representation. For every
//! field of every visited object the projector decides, against the sealed
//! link registry, whether the value is a plain property or an embedded
//! sub-resource, then resolves the object's own `_links`.
//!
//! The walk is synchronous and allocation-only: no I/O, no locking. Many
//! projections can run concurrently over one [`SealedRegistry`].

use crate::core::bag::ResourceBag;
use crate::core::error::HalError;
use crate::core::node::{Embedded, HalResource};
use crate::core::resource::{AsAny, FieldValue, Resource, ResourceType};
use crate::core::url::UrlContext;
use crate::links::registry::SealedRegistry;
use crate::links::resolver::LinkResolver;
use serde_json::Value;
use std::borrow::Cow;

/// Default maximum nesting depth of a projection
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Lower-case the first character of a property name
///
/// `OrderLines` becomes `orderLines`; the rest of the name is untouched.
pub fn lower_first(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            Cow::Owned(first.to_lowercase().chain(chars).collect())
        }
        _ => Cow::Borrowed(name),
    }
}

/// Whether plain data is a non-empty sequence of objects
fn is_object_sequence(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_object)
}

/// An object on the path from the root to the node being projected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Visit {
    address: usize,
    resource_type: ResourceType,
}

impl Visit {
    fn of(resource: &dyn Resource) -> Option<Self> {
        // Zero-sized values share addresses; they cannot own a cycle
        if std::mem::size_of_val(resource) == 0 {
            return None;
        }
        Some(Self {
            address: resource as *const dyn Resource as *const () as usize,
            resource_type: ResourceType::of_val(resource),
        })
    }
}

/// Projects resources into HAL documents
///
/// # Example
///
/// ```rust,ignore
/// let registry = links.seal();
/// let url = UrlContext::new("https", "api.example.com", "");
///
/// let hal = ResourceProjector::new(&registry, &url).project_resource(&order)?;
/// let body = hal.to_json()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResourceProjector<'a> {
    registry: &'a SealedRegistry,
    url: &'a UrlContext,
    max_depth: usize,
}

impl<'a> ResourceProjector<'a> {
    /// Create a projector with the default depth limit
    pub fn new(registry: &'a SealedRegistry, url: &'a UrlContext) -> Self {
        Self {
            registry,
            url,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deep the walk may nest
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Project an optional root; `None` projects to `None`
    pub fn project(&self, root: Option<&dyn Resource>) -> Result<Option<HalResource>, HalError> {
        root.map(|resource| self.project_resource(resource))
            .transpose()
    }

    /// Project a root resource
    pub fn project_resource(&self, root: &dyn Resource) -> Result<HalResource, HalError> {
        let mut trail = Vec::new();
        self.project_node(root, 0, &mut trail)
    }

    fn project_node(
        &self,
        resource: &dyn Resource,
        depth: usize,
        trail: &mut Vec<Visit>,
    ) -> Result<HalResource, HalError> {
        let resource_type = ResourceType::of_val(resource);

        // Counted separately from the trail, which skips zero-sized values
        if depth >= self.max_depth {
            tracing::warn!(
                resource_type = %resource_type,
                max_depth = self.max_depth,
                "Projection exceeded the maximum depth"
            );
            return Err(HalError::DepthExceeded {
                resource_type: resource_type.name().to_string(),
                max_depth: self.max_depth,
            });
        }

        let visit = Visit::of(resource);
        if let Some(visit) = visit {
            if trail.contains(&visit) {
                tracing::warn!(resource_type = %resource_type, "Cycle detected in resource graph");
                return Err(HalError::CycleDetected {
                    resource_type: resource_type.name().to_string(),
                });
            }
            trail.push(visit);
        }

        tracing::trace!(resource_type = %resource_type, depth, "Projecting resource");

        let result = self.project_fields(resource, resource_type, depth + 1, trail);

        if visit.is_some() {
            trail.pop();
        }

        result
    }

    fn project_fields(
        &self,
        resource: &dyn Resource,
        resource_type: ResourceType,
        depth: usize,
        trail: &mut Vec<Visit>,
    ) -> Result<HalResource, HalError> {
        let shape = resource.shape();
        let paged = shape.is_paged();
        let mut output = HalResource::new();

        for field in shape.into_fields() {
            let name = lower_first(&field.name).into_owned();

            match field.value {
                FieldValue::Null | FieldValue::Value(Value::Null) => continue,
                FieldValue::Value(Value::Array(items)) if is_object_sequence(&items) => {
                    let projected = items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::Object(map) => Some(map),
                            _ => None,
                        })
                        .map(|map| {
                            let bag: ResourceBag = map.into_iter().collect();
                            self.project_node(&bag, depth, trail)
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    output.embedded.insert(name, Embedded::Many(projected));
                }
                FieldValue::Value(value) => {
                    output.properties.insert(name, value);
                }
                FieldValue::Resource(child) => {
                    if self.registry.has_rules(ResourceType::of_val(child)) {
                        let projected = self.project_node(child, depth, trail)?;
                        output.embedded.insert(name, Embedded::One(projected));
                    } else {
                        output.properties.insert(name, child.to_value());
                    }
                }
                FieldValue::Resources(items) => {
                    let projected = items
                        .into_iter()
                        .map(|item| self.project_node(item, depth, trail))
                        .collect::<Result<Vec<_>, _>>()?;
                    output.embedded.insert(name, Embedded::Many(projected));
                }
            }
        }

        output.links = LinkResolver::new(self.url).resolve(
            AsAny::as_any(resource),
            paged,
            self.registry.rules_for(resource_type),
        );

        Ok(output)
    }
}
