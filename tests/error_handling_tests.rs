//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Unbounded resource graphs fail with typed errors
//! - Error responses are properly formatted
//! - Error conversions work correctly

use axum::http::StatusCode;
use axum::response::IntoResponse;
use hal::prelude::*;
use serde_json::{Value, json};
use std::sync::{Arc, OnceLock};

struct Node {
    id: u32,
    next: OnceLock<Arc<Node>>,
}

impl Node {
    fn new(id: u32) -> Arc<Self> {
        Arc::new(Self {
            id,
            next: OnceLock::new(),
        })
    }
}

impl Resource for Node {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(
            Fields::new()
                .value("id", &self.id)
                .optional("next", self.next.get().map(Arc::as_ref)),
        )
    }

    fn to_value(&self) -> Value {
        json!({ "id": self.id })
    }
}

fn node_links() -> LinkRegistry {
    let mut links = LinkRegistry::new();
    links.add_link(
        "self",
        "get_node",
        |n: &Node| format!("/nodes/{}", n.id),
        |_: &Node| true,
    );
    links
}

fn cycle() -> Arc<Node> {
    let a = Node::new(1);
    let b = Node::new(2);
    let _ = b.next.set(a.clone());
    let _ = a.next.set(b);
    a
}

// =============================================================================
// Projection Errors
// =============================================================================

mod projection_error_tests {
    use super::*;

    #[test]
    fn test_cycle_returns_cycle_detected() {
        let registry = node_links().seal();
        let url = UrlContext::new("http", "host", "");
        let root = cycle();

        let err = ResourceProjector::new(&registry, &url)
            .project_resource(root.as_ref())
            .unwrap_err();

        match err {
            HalError::CycleDetected { resource_type } => {
                assert!(resource_type.ends_with("Node"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_deep_graph_returns_depth_exceeded() {
        let registry = node_links().seal();
        let url = UrlContext::new("http", "host", "");

        let root = Node::new(1);
        let mut tail = root.clone();
        for id in 2..=10 {
            let next = Node::new(id);
            let _ = tail.next.set(next.clone());
            tail = next;
        }

        let err = ResourceProjector::new(&registry, &url)
            .with_max_depth(4)
            .project_resource(root.as_ref())
            .unwrap_err();
        assert!(matches!(err, HalError::DepthExceeded { max_depth: 4, .. }));

        assert!(
            ResourceProjector::new(&registry, &url)
                .project_resource(root.as_ref())
                .is_ok()
        );
    }

    #[test]
    fn test_unlinked_cycle_is_never_walked() {
        // Without rules, children are rendered through `to_value`
        let registry = LinkRegistry::new().seal();
        let url = UrlContext::new("http", "host", "");
        let root = cycle();

        let hal = ResourceProjector::new(&registry, &url)
            .project_resource(root.as_ref())
            .unwrap();
        assert_eq!(hal.property("next"), Some(&json!({ "id": 2 })));
    }
}

// =============================================================================
// HTTP Responses
// =============================================================================

mod response_tests {
    use super::*;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_cycle_error_response() {
        let response = HalError::CycleDetected {
            resource_type: "Node".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "HAL_CYCLE_DETECTED");
        assert_eq!(body["details"]["resource_type"], "Node");
    }

    #[tokio::test]
    async fn test_projection_failure_in_response_gate() {
        let host = Arc::new(HalBuilder::new().register_links(node_links()).build().unwrap());
        let ctx = HalContext::new(
            host,
            UrlContext::new("http", "host", ""),
            MediaStyle::parse("application/hal.v1+json"),
        );
        let root = cycle();

        let response = ctx.respond(StatusCode::OK, root.as_ref());

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "HAL_CYCLE_DETECTED");
    }

    #[tokio::test]
    async fn test_config_error_response_has_no_details() {
        let err = HalConfig::from_yaml_str("style: \"\"\n").unwrap_err();
        let err = err.downcast::<HalError>().unwrap();

        let body = body_json(err.into_response()).await;
        assert_eq!(body["code"], "CONFIG_ERROR");
        assert_eq!(body["message"], "Configuration error: style must not be empty");
        assert!(body.get("details").is_none());
    }
}

// =============================================================================
// Error Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_bag_serialization_failure_is_typed() {
        let mut grid = std::collections::BTreeMap::new();
        grid.insert((1, 2), "x");

        let err = ResourceBag::new().insert_value("grid", grid).unwrap_err();

        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_builder_reports_invalid_config() {
        let config = HalConfig {
            style: String::new(),
            ..HalConfig::default()
        };

        let err = HalBuilder::new().with_config(config).build().unwrap_err();
        assert!(matches!(err.downcast_ref::<HalError>(), Some(HalError::Config(_))));
    }
}
