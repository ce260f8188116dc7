//! Projection output
//!
//! A [`HalResource`] serializes to the familiar HAL layout: plain properties
//! first, then `_embedded`, then `_links`.

use crate::core::error::HalError;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Relation name → link descriptor, in rule order
pub type Links = IndexMap<String, LinkDescriptor>;

/// One entry of a `_links` block
///
/// Serializes to `{href}`, `{href, templated: true}` or, for curies,
/// `{href, name, templated: true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkDescriptor {
    pub href: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,
}

impl LinkDescriptor {
    /// A plain link
    pub fn href(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            name: None,
            templated: false,
        }
    }

    /// A templated link
    pub fn templated(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            name: None,
            templated: true,
        }
    }

    /// A curie: a named, templated link
    pub fn curie(href: impl Into<String>, name: Option<String>) -> Self {
        Self {
            href: href.into(),
            name,
            templated: true,
        }
    }
}

/// Content of one `_embedded` entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Embedded {
    One(HalResource),
    Many(Vec<HalResource>),
}

/// A projected resource
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HalResource {
    /// Plain properties, keyed by lower-camel name
    #[serde(flatten)]
    pub properties: IndexMap<String, Value>,

    /// Embedded sub-resources
    #[serde(rename = "_embedded", skip_serializing_if = "IndexMap::is_empty")]
    pub embedded: IndexMap<String, Embedded>,

    /// Navigational links, absent when the type has no link rules
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl HalResource {
    /// Create an empty resource
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a plain property
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Look up a single embedded resource
    pub fn embedded_one(&self, name: &str) -> Option<&HalResource> {
        match self.embedded.get(name) {
            Some(Embedded::One(resource)) => Some(resource),
            _ => None,
        }
    }

    /// Look up an embedded collection
    pub fn embedded_many(&self, name: &str) -> Option<&[HalResource]> {
        match self.embedded.get(name) {
            Some(Embedded::Many(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Look up a link by relation
    pub fn link(&self, relation: &str) -> Option<&LinkDescriptor> {
        self.links.as_ref().and_then(|links| links.get(relation))
    }

    /// Serialize into a JSON value
    pub fn to_json(&self) -> Result<Value, HalError> {
        Ok(serde_json::to_value(self)?)
    }
}
