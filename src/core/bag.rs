//! Open property bags
//!
//! A [`ResourceBag`] has no declared shape: handlers build it at runtime from
//! key/value pairs. The projector walks its entries in insertion order and
//! classifies each value exactly like a record field.

use crate::core::error::HalError;
use crate::core::resource::{AsAny, FieldValue, Fields, Resource, Shape};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One entry of a [`ResourceBag`]
#[derive(Clone)]
pub enum BagValue {
    /// Plain data
    Value(Value),

    /// A nested object
    Resource(Arc<dyn Resource>),

    /// A sequence of nested objects
    Resources(Vec<Arc<dyn Resource>>),
}

impl BagValue {
    fn to_value(&self) -> Value {
        match self {
            BagValue::Value(v) => v.clone(),
            BagValue::Resource(r) => r.to_value(),
            BagValue::Resources(items) => Value::Array(items.iter().map(|r| r.to_value()).collect()),
        }
    }
}

impl fmt::Debug for BagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BagValue::Value(v) => f.debug_tuple("Value").field(v).finish(),
            BagValue::Resource(r) => f.debug_tuple("Resource").field(&AsAny::type_name(&**r)).finish(),
            BagValue::Resources(items) => f.debug_tuple("Resources").field(&items.len()).finish(),
        }
    }
}

/// Dynamically shaped resource
///
/// # Example
///
/// ```rust,ignore
/// let mut bag = ResourceBag::new();
/// bag.insert_value("Count", 3)?;
/// bag.insert_resource("owner", owner);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceBag {
    entries: IndexMap<String, BagValue>,
}

impl ResourceBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert a raw entry, replacing any previous value under `key`
    pub fn insert(&mut self, key: impl Into<String>, value: BagValue) -> &mut Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// Insert plain data
    pub fn insert_value<V: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: V,
    ) -> Result<&mut Self, HalError> {
        let value = serde_json::to_value(value)?;
        Ok(self.insert(key, BagValue::Value(value)))
    }

    /// Insert a nested object
    pub fn insert_resource<R: Resource>(&mut self, key: impl Into<String>, value: R) -> &mut Self {
        self.insert(key, BagValue::Resource(Arc::new(value)))
    }

    /// Insert a sequence of nested objects
    pub fn insert_resources<R, I>(&mut self, key: impl Into<String>, items: I) -> &mut Self
    where
        R: Resource,
        I: IntoIterator<Item = R>,
    {
        let items = items
            .into_iter()
            .map(|r| Arc::new(r) as Arc<dyn Resource>)
            .collect();
        self.insert(key, BagValue::Resources(items))
    }

    /// Look up an entry
    pub fn get(&self, key: &str) -> Option<&BagValue> {
        self.entries.get(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for ResourceBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key, BagValue::Value(value)))
                .collect(),
        }
    }
}

impl Resource for ResourceBag {
    fn shape(&self) -> Shape<'_> {
        let fields = self
            .entries
            .iter()
            .fold(Fields::new(), |fields, (key, value)| {
                let value = match value {
                    BagValue::Value(v) => FieldValue::Value(v.clone()),
                    BagValue::Resource(r) => FieldValue::Resource(&**r),
                    BagValue::Resources(items) => {
                        FieldValue::Resources(items.iter().map(|r| &**r).collect())
                    }
                };
                fields.push(key.as_str(), value)
            });

        Shape::Bag(fields)
    }

    fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}
