//! Response gate for axum handlers
//!
//! [`HalContext`] is extracted from each request. Handlers hand it their
//! status and resource; it decides between a plain JSON body and a projected
//! HAL body.

use super::host::HalHost;
use super::negotiation::MediaStyle;
use crate::core::resource::Resource;
use crate::core::url::UrlContext;
use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Per-request projection context
///
/// # Example
///
/// ```rust,ignore
/// async fn get_order(hal: HalContext, Path(id): Path<u32>) -> Response {
///     match find_order(id) {
///         Some(order) => hal.respond(StatusCode::OK, &order),
///         None => StatusCode::NOT_FOUND.into_response(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HalContext {
    host: Arc<HalHost>,
    url: UrlContext,
    style: Option<MediaStyle>,
}

impl HalContext {
    /// Build a context by hand
    pub fn new(host: Arc<HalHost>, url: UrlContext, style: Option<MediaStyle>) -> Self {
        Self { host, url, style }
    }

    /// URL context of the request
    pub fn url(&self) -> &UrlContext {
        &self.url
    }

    /// Media style requested in `Accept`, if any
    pub fn style(&self) -> Option<&MediaStyle> {
        self.style.as_ref()
    }

    /// Whether the client asked for the configured projection style
    pub fn wants_hal(&self) -> bool {
        self.style
            .as_ref()
            .is_some_and(|style| self.host.accepts(style))
    }

    /// Render `resource` with `status`
    ///
    /// Error and redirect statuses (300 and above) and requests without the
    /// configured style get the resource's plain JSON form. Otherwise the
    /// body is the projected document, labelled with the negotiated media
    /// type.
    pub fn respond(&self, status: StatusCode, resource: &dyn Resource) -> Response {
        let style = match &self.style {
            Some(style) if status.as_u16() < 300 && self.host.accepts(style) => style,
            _ => return (status, Json(resource.to_value())).into_response(),
        };

        match self.host.projector(&self.url).project_resource(resource) {
            Ok(hal) => {
                let mut response = (status, Json(hal)).into_response();
                match HeaderValue::from_str(&style.content_type()) {
                    Ok(content_type) => {
                        response.headers_mut().insert(CONTENT_TYPE, content_type);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Negotiated media type is not a valid header value");
                    }
                }
                response
            }
            Err(e) => {
                tracing::error!(error = %e, "HAL projection failed");
                e.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for HalContext
where
    Arc<HalHost>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let host = Arc::<HalHost>::from_ref(state);
        let url = UrlContext::from_parts(parts);
        let style = MediaStyle::from_headers(&parts.headers);

        tracing::trace!(
            host = %url.host(),
            style = ?style.as_ref().map(|s| s.style.as_str()),
            "HAL context extracted"
        );

        Ok(Self::new(host, url, style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HalConfig;
    use crate::core::resource::{Fields, Shape};
    use crate::links::registry::LinkRegistry;
    use serde_json::{Value, json};

    struct Item {
        id: u32,
    }

    impl Resource for Item {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(Fields::new().value("id", &self.id))
        }

        fn to_value(&self) -> Value {
            json!({ "id": self.id })
        }
    }

    fn host() -> Arc<HalHost> {
        let mut links = LinkRegistry::new();
        links.add_link(
            "self",
            "get_item",
            |i: &Item| format!("/items/{}", i.id),
            |_: &Item| true,
        );
        Arc::new(HalHost::new(HalConfig::default(), links.seal()))
    }

    fn context(accept: Option<&str>) -> HalContext {
        HalContext::new(
            host(),
            UrlContext::new("http", "host", ""),
            accept.and_then(MediaStyle::parse),
        )
    }

    fn content_type(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_matching_style_is_projected() {
        let ctx = context(Some("application/hal.v1+json"));
        assert!(ctx.wants_hal());

        let response = ctx.respond(StatusCode::OK, &Item { id: 1 });
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_type(&response), Some("application/hal.v1+json"));
    }

    #[test]
    fn test_plain_request_gets_plain_json() {
        let ctx = context(None);
        assert!(!ctx.wants_hal());

        let response = ctx.respond(StatusCode::OK, &Item { id: 1 });
        assert_eq!(content_type(&response), Some("application/json"));
    }

    #[test]
    fn test_other_style_gets_plain_json() {
        let ctx = context(Some("application/acme.v1+json"));
        let response = ctx.respond(StatusCode::CREATED, &Item { id: 1 });

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(content_type(&response), Some("application/json"));
    }

    #[test]
    fn test_error_status_bypasses_projection() {
        let ctx = context(Some("application/hal.v1+json"));
        let response = ctx.respond(StatusCode::NOT_FOUND, &Item { id: 1 });

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(content_type(&response), Some("application/json"));
    }
}
