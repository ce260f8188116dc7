//! Frozen projection state
//!
//! A `HalHost` is built once at startup by the [`HalBuilder`](super::HalBuilder)
//! and then shared, usually as `Arc<HalHost>` in the axum state, by every
//! request. It holds no mutable state.

use crate::config::HalConfig;
use crate::core::url::UrlContext;
use crate::links::registry::SealedRegistry;
use crate::projection::ResourceProjector;
use crate::server::negotiation::MediaStyle;
use std::sync::Arc;

/// Host context containing the sealed link registry and settings
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(
///     HalBuilder::new()
///         .register_module(OrdersModule)?
///         .build()?,
/// );
///
/// let app = Router::new()
///     .route("/orders/{id}", get(get_order))
///     .with_state(host);
/// ```
#[derive(Debug, Clone)]
pub struct HalHost {
    /// Validated settings
    pub config: Arc<HalConfig>,

    /// Link rules of every registered resource type
    pub registry: SealedRegistry,
}

impl HalHost {
    /// Assemble a host from a validated config and a sealed registry
    pub fn new(config: HalConfig, registry: SealedRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry,
        }
    }

    /// A projector for one request
    pub fn projector<'a>(&'a self, url: &'a UrlContext) -> ResourceProjector<'a> {
        ResourceProjector::new(&self.registry, url).with_max_depth(self.config.max_depth)
    }

    /// Whether responses in `style` are projected
    pub fn accepts(&self, style: &MediaStyle) -> bool {
        style.is_style(&self.config.style)
    }
}
