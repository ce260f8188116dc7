//! Resource abstraction walked by the projector
//!
//! Rust has no runtime reflection, so every type that takes part in a HAL
//! projection describes itself through [`Resource::shape`]. The shape is a
//! tagged variant: a fixed record, a generic paged collection, or an open bag
//! of key/value pairs. Each field carries enough information for the projector
//! to decide between a plain property and an embedded sub-resource.

use serde::Serialize;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable, comparable identity of a resource type
///
/// Two generic instantiations (`Page<Order>` and `Page<Invoice>`) are two
/// different keys. Equality and hashing only look at the [`TypeId`]; the type
/// name is kept for diagnostics.
#[derive(Clone, Copy)]
pub struct ResourceType {
    id: TypeId,
    name: &'static str,
}

impl ResourceType {
    /// Identity of the concrete type `T`
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Runtime identity of a type-erased resource
    pub fn of_val(resource: &dyn Resource) -> Self {
        Self {
            id: AsAny::as_any(resource).type_id(),
            name: AsAny::type_name(resource),
        }
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ResourceType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResourceType {}

impl Hash for ResourceType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceType({})", self.name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Access to the concrete type behind a `dyn Resource`
///
/// Implemented for every sized `'static` type, so resource authors never
/// write it by hand.
pub trait AsAny: Any {
    /// The value as `&dyn Any`, for downcasting to the registered type
    fn as_any(&self) -> &dyn Any;

    /// Name of the concrete type
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A domain object that can be projected into a HAL resource
///
/// Most types get this through [`impl_resource!`](crate::impl_resource).
///
/// # Example
///
/// ```rust,ignore
/// impl Resource for Order {
///     fn shape(&self) -> Shape<'_> {
///         Shape::Record(
///             Fields::new()
///                 .value("id", &self.id)
///                 .optional("customer", self.customer.as_ref())
///                 .resources("lines", &self.lines),
///         )
///     }
///
///     fn to_value(&self) -> serde_json::Value {
///         serde_json::to_value(self).unwrap_or_default()
///     }
/// }
/// ```
pub trait Resource: AsAny + Send + Sync {
    /// Describe the readable fields of this instance
    fn shape(&self) -> Shape<'_>;

    /// Plain JSON form, used when the resource lands in plain properties
    fn to_value(&self) -> Value;
}

/// Tagged description of how an instance is walked
pub enum Shape<'a> {
    /// A fixed, declared record type
    Record(Fields<'a>),

    /// A generic paged-collection instantiation
    ///
    /// Computed links of paged resources are merged with the current
    /// request query string.
    Paged(Fields<'a>),

    /// An open property bag walked by its key/value pairs
    Bag(Fields<'a>),
}

impl<'a> Shape<'a> {
    /// Whether computed links are built as paged links
    pub fn is_paged(&self) -> bool {
        matches!(self, Shape::Paged(_))
    }

    /// Consume the shape and return its fields
    pub fn into_fields(self) -> Fields<'a> {
        match self {
            Shape::Record(fields) | Shape::Paged(fields) | Shape::Bag(fields) => fields,
        }
    }
}

/// Value of one field at projection time
pub enum FieldValue<'a> {
    /// Absent value; the field is skipped
    Null,

    /// Scalar or plain data; never embedded
    Value(Value),

    /// An object, embedded when its type has link rules
    Resource(&'a dyn Resource),

    /// A sequence of objects; always embedded
    Resources(Vec<&'a dyn Resource>),
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("Null"),
            FieldValue::Value(v) => f.debug_tuple("Value").field(v).finish(),
            FieldValue::Resource(r) => f.debug_tuple("Resource").field(&AsAny::type_name(*r)).finish(),
            FieldValue::Resources(items) => f.debug_tuple("Resources").field(&items.len()).finish(),
        }
    }
}

/// A named field
#[derive(Debug)]
pub struct Field<'a> {
    pub name: Cow<'a, str>,
    pub value: FieldValue<'a>,
}

/// Ordered list of fields, built fluently
#[derive(Debug, Default)]
pub struct Fields<'a> {
    entries: Vec<Field<'a>>,
}

impl<'a> Fields<'a> {
    /// Create an empty field list
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a field with an explicit [`FieldValue`]
    pub fn push(mut self, name: impl Into<Cow<'a, str>>, value: FieldValue<'a>) -> Self {
        self.entries.push(Field {
            name: name.into(),
            value,
        });
        self
    }

    /// Add a plain serializable value
    ///
    /// Values that serialize to `null` (e.g. `None`) are skipped by the
    /// projector.
    pub fn value<V: Serialize + ?Sized>(self, name: impl Into<Cow<'a, str>>, value: &V) -> Self {
        let name = name.into();
        let value = match serde_json::to_value(value) {
            Ok(v) => FieldValue::Value(v),
            Err(e) => {
                tracing::warn!(field = %name, error = %e, "Field could not be serialized, skipping");
                FieldValue::Null
            }
        };
        self.push(name, value)
    }

    /// Add an object field
    pub fn resource<R: Resource>(self, name: impl Into<Cow<'a, str>>, value: &'a R) -> Self {
        self.push(name, FieldValue::Resource(value))
    }

    /// Add an optional object field
    pub fn optional<R: Resource>(
        self,
        name: impl Into<Cow<'a, str>>,
        value: Option<&'a R>,
    ) -> Self {
        let value = match value {
            Some(r) => FieldValue::Resource(r),
            None => FieldValue::Null,
        };
        self.push(name, value)
    }

    /// Add a sequence of objects
    pub fn resources<R: Resource>(self, name: impl Into<Cow<'a, str>>, items: &'a [R]) -> Self {
        let items = items.iter().map(|r| r as &dyn Resource).collect();
        self.push(name, FieldValue::Resources(items))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field was added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the fields
    pub fn iter(&self) -> std::slice::Iter<'_, Field<'a>> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for Fields<'a> {
    type Item = Field<'a>;
    type IntoIter = std::vec::IntoIter<Field<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Tag {
        label: String,
    }

    impl Resource for Tag {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(Fields::new().value("label", &self.label))
        }

        fn to_value(&self) -> Value {
            serde_json::to_value(self).unwrap_or_default()
        }
    }

    struct Wrapper<T>(T);

    impl<T: Resource> Resource for Wrapper<T> {
        fn shape(&self) -> Shape<'_> {
            Shape::Paged(Fields::new().resource("inner", &self.0))
        }

        fn to_value(&self) -> Value {
            self.0.to_value()
        }
    }

    #[test]
    fn test_resource_type_of_matches_runtime_type() {
        let tag = Tag {
            label: "red".to_string(),
        };
        assert_eq!(ResourceType::of::<Tag>(), ResourceType::of_val(&tag));
        assert!(ResourceType::of::<Tag>().name().ends_with("Tag"));
    }

    #[test]
    fn test_generic_instantiations_are_distinct() {
        assert_ne!(
            ResourceType::of::<Wrapper<Tag>>(),
            ResourceType::of::<Wrapper<Wrapper<Tag>>>()
        );

        let wrapped = Wrapper(Tag {
            label: "x".to_string(),
        });
        assert_eq!(ResourceType::of_val(&wrapped), ResourceType::of::<Wrapper<Tag>>());
    }

    #[test]
    fn test_fields_builder_keeps_order() {
        let tag = Tag {
            label: "blue".to_string(),
        };
        let tags = vec![tag];
        let missing: Option<&Tag> = None;

        let fields = Fields::new()
            .value("id", &7)
            .optional("parent", missing)
            .resources("tags", &tags);

        let names: Vec<_> = fields.iter().map(|f| f.name.as_ref()).collect();
        assert_eq!(names, vec!["id", "parent", "tags"]);

        let values: Vec<_> = fields.into_iter().map(|f| f.value).collect();
        assert!(matches!(&values[0], FieldValue::Value(v) if *v == json!(7)));
        assert!(matches!(values[1], FieldValue::Null));
        assert!(matches!(&values[2], FieldValue::Resources(items) if items.len() == 1));
    }

    #[test]
    fn test_shape_is_paged() {
        let wrapped = Wrapper(Tag {
            label: "x".to_string(),
        });
        assert!(wrapped.shape().is_paged());
        assert!(!wrapped.0.shape().is_paged());
        assert_eq!(wrapped.shape().into_fields().len(), 1);
    }
}
