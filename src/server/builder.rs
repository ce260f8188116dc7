//! HalBuilder for composing link configuration

use super::host::HalHost;
use crate::config::HalConfig;
use crate::core::module::HalModule;
use crate::links::registry::LinkRegistry;
use anyhow::Result;

/// Builder collecting link rules before they are sealed
///
/// Registries are merged in registration order; a later (type, relation)
/// pair replaces an earlier one.
///
/// # Example
///
/// ```ignore
/// let host = HalBuilder::new()
///     .with_config(HalConfig::from_yaml_file("config/hal.yaml")?)
///     .register_module(OrdersModule)?
///     .register_module(InvoicesModule)?
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct HalBuilder {
    config: HalConfig,
    registry: LinkRegistry,
    modules: Vec<String>,
}

impl HalBuilder {
    /// Create a new HalBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the settings
    pub fn with_config(mut self, config: HalConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a module
    ///
    /// Fails when the module cannot build its link rules.
    pub fn register_module(mut self, module: impl HalModule + 'static) -> Result<Self> {
        let links = module.links()?;

        tracing::debug!(
            module = module.name(),
            version = module.version(),
            rules = links.len(),
            "Registering HAL module"
        );

        self.registry.register(links);
        self.modules.push(module.name().to_string());

        Ok(self)
    }

    /// Merge a hand-built registry
    pub fn register_links(mut self, links: LinkRegistry) -> Self {
        tracing::debug!(rules = links.len(), "Registering link rules");
        self.registry.register(links);
        self
    }

    /// Names of the registered modules, in order
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Validate the settings and seal the registry
    pub fn build(self) -> Result<HalHost> {
        self.config.validate()?;

        tracing::info!(
            modules = self.modules.len(),
            rules = self.registry.len(),
            style = %self.config.style,
            "HAL host built"
        );

        Ok(HalHost::new(self.config, self.registry.seal()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resource::{Fields, Resource, ResourceType, Shape};
    use serde_json::Value;

    struct Order {
        id: u32,
    }

    impl Resource for Order {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(Fields::new().value("id", &self.id))
        }

        fn to_value(&self) -> Value {
            serde_json::json!({ "id": self.id })
        }
    }

    struct OrdersModule;

    impl HalModule for OrdersModule {
        fn name(&self) -> &str {
            "orders"
        }

        fn links(&self) -> Result<LinkRegistry> {
            let mut links = LinkRegistry::new();
            links.add_link(
                "self",
                "get_order",
                |o: &Order| format!("/orders/{}", o.id),
                |_: &Order| true,
            );
            Ok(links)
        }
    }

    struct BrokenModule;

    impl HalModule for BrokenModule {
        fn name(&self) -> &str {
            "broken"
        }

        fn links(&self) -> Result<LinkRegistry> {
            anyhow::bail!("route table missing")
        }
    }

    #[test]
    fn test_build_seals_module_links() {
        let host = HalBuilder::new()
            .register_module(OrdersModule)
            .unwrap()
            .build()
            .unwrap();

        assert!(host.registry.has_rules(ResourceType::of::<Order>()));
        assert_eq!(host.config.style, "hal");
    }

    #[test]
    fn test_later_registration_wins() {
        let mut override_links = LinkRegistry::new();
        override_links.add_link(
            "self",
            "get_order_v2",
            |o: &Order| format!("/v2/orders/{}", o.id),
            |_: &Order| true,
        );

        let host = HalBuilder::new()
            .register_module(OrdersModule)
            .unwrap()
            .register_links(override_links)
            .build()
            .unwrap();

        let rules = host.registry.rules_for(ResourceType::of::<Order>()).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].route_values(&Order { id: 3 }), "/v2/orders/3");
    }

    #[test]
    fn test_failing_module_is_reported() {
        let err = HalBuilder::new().register_module(BrokenModule).unwrap_err();
        assert!(err.to_string().contains("route table missing"));
    }

    #[test]
    fn test_invalid_config_fails_build() {
        let config = HalConfig {
            style: String::new(),
            ..HalConfig::default()
        };
        assert!(HalBuilder::new().with_config(config).build().is_err());
    }

    #[test]
    fn test_modules_are_listed() {
        let builder = HalBuilder::new().register_module(OrdersModule).unwrap();
        assert_eq!(builder.modules(), ["orders".to_string()]);
    }
}
