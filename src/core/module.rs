//! Module system for HAL link configuration
//!
//! Independently developed modules each contribute the link rules of their
//! own resource types. The builder merges them into one registry.

use crate::links::registry::LinkRegistry;
use anyhow::Result;

/// A unit of link configuration
///
/// # Example
///
/// ```rust,ignore
/// struct OrdersModule;
///
/// impl HalModule for OrdersModule {
///     fn name(&self) -> &str {
///         "orders"
///     }
///
///     fn links(&self) -> Result<LinkRegistry> {
///         let mut links = LinkRegistry::new();
///         links.add_link("self", "get_order", |o: &Order| format!("/orders/{}", o.id), |_: &Order| true);
///         Ok(links)
///     }
/// }
/// ```
pub trait HalModule: Send + Sync {
    /// Unique module name
    fn name(&self) -> &str;

    /// Module version
    fn version(&self) -> &str {
        "1.0.0"
    }

    /// Build the link rules contributed by this module
    fn links(&self) -> Result<LinkRegistry>;
}
