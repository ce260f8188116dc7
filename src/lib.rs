//! # This-HAL
//!
//! A HAL (Hypertext Application Language) projection engine for RESTful APIs
//! in Rust.
//!
//! ## Features
//!
//! - **Type-Keyed Link Rules**: Register `self`, `next`, `curies`, ... per resource type
//! - **Automatic Embedding**: Sub-resources with rules go to `_embedded`, the rest stay properties
//! - **Conditional Links**: Each rule decides per instance whether it applies
//! - **Paged Collections**: Paging links keep the caller's query clauses
//! - **Composable**: Independent modules contribute their own rules
//! - **Content Negotiation**: `application/hal.v1+json` opts into projection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hal::prelude::*;
//!
//! #[derive(Serialize)]
//! struct Order {
//!     id: u32,
//!     customer: Customer,
//!     lines: Vec<OrderLine>,
//! }
//!
//! impl_resource!(Order { id, customer: resource, lines: resources });
//!
//! let mut links = LinkRegistry::new();
//! links.add_link(
//!     "self",
//!     "get_order",
//!     |o: &Order| format!("/orders/{}", o.id),
//!     |_: &Order| true,
//! );
//!
//! let host = HalBuilder::new().register_links(links).build()?;
//! let url = UrlContext::new("https", "shop.example.com", "");
//!
//! let hal = host.projector(&url).project_resource(&order)?;
//! // {"id": 1, "_embedded": {...}, "_links": {"self": {"href": "https://shop.example.com/orders/1"}}}
//! ```

pub mod config;
pub mod core;
pub mod links;
pub mod projection;
pub mod resources;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        bag::{BagValue, ResourceBag},
        error::{ErrorResponse, HalError},
        module::HalModule,
        node::{Embedded, HalResource, LinkDescriptor, Links},
        page::Page,
        resource::{FieldValue, Fields, Resource, ResourceType, Shape},
        url::UrlContext,
    };

    // === Macros ===
    pub use crate::{impl_paged_resource, impl_resource};

    // === Links ===
    pub use crate::links::{LinkRegistry, LinkResolver, LinkRule, SealedRegistry};

    // === Projection ===
    pub use crate::projection::ResourceProjector;

    // === Config ===
    pub use crate::config::HalConfig;

    // === Server ===
    pub use crate::server::{HalBuilder, HalContext, HalHost, MediaStyle};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
}
