//! Request URL context
//!
//! The projector never parses HTTP requests itself; it receives the scheme,
//! host and raw query string of the current request through [`UrlContext`].

use crate::links::paging::compose_paged_uri;
use axum::http::header::HOST;
use axum::http::request::Parts;

/// Forwarded scheme header set by reverse proxies
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Scheme, host and query string of the current external request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlContext {
    scheme: String,
    host: String,
    query: String,
}

impl UrlContext {
    /// Create a context
    ///
    /// `query` is the raw, URL-encoded query string (without or with a
    /// leading `?`), possibly empty.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            query: query.into(),
        }
    }

    /// Build the context of an incoming axum request
    ///
    /// The scheme comes from the request URI, then `X-Forwarded-Proto`, and
    /// defaults to `http`. The host comes from the URI authority, then the
    /// `Host` header.
    pub fn from_parts(parts: &Parts) -> Self {
        let scheme = parts
            .uri
            .scheme_str()
            .map(str::to_string)
            .or_else(|| {
                parts
                    .headers
                    .get(X_FORWARDED_PROTO)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.trim().to_string())
            })
            .unwrap_or_else(|| "http".to_string());

        let host = parts
            .uri
            .authority()
            .map(|a| a.as_str().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get(HOST)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        let query = parts.uri.query().unwrap_or_default().to_string();

        Self::new(scheme, host, query)
    }

    /// Request scheme (e.g. `https`)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Request host, including the port if any
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Raw query string of the request
    pub fn query(&self) -> &str {
        &self.query
    }

    /// `scheme://host`
    pub fn base(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Href of a link for `relation`
    ///
    /// Curie-qualified relations (`ns:rel`) keep the route fragment as is;
    /// every other relation gets an absolute URL.
    pub fn uri_for(&self, relation: &str, route: &str) -> String {
        if relation.contains(':') {
            route.to_string()
        } else {
            format!("{}{}", self.base(), route)
        }
    }

    /// Href of a computed link on a paged resource
    pub fn paged_uri_for(&self, route: &str) -> String {
        compose_paged_uri(&self.base(), route, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_uri_for_plain_relation_is_absolute() {
        let ctx = UrlContext::new("http", "host", "");
        assert_eq!(ctx.uri_for("self", "/items/42"), "http://host/items/42");
    }

    #[test]
    fn test_uri_for_curie_relation_is_verbatim() {
        let ctx = UrlContext::new("https", "api.example.com", "");
        assert_eq!(ctx.uri_for("doc:orders", "/docs/orders"), "/docs/orders");
    }

    #[test]
    fn test_paged_uri_uses_query() {
        let ctx = UrlContext::new("http", "host", "filter(x)&limit(0,10)");
        assert_eq!(
            ctx.paged_uri_for("/items?skip=10"),
            "http://host/items?skip=10&filter(x)"
        );
    }

    #[test]
    fn test_from_parts_with_host_header() {
        let request = Request::builder()
            .uri("/orders?limit(0,5)")
            .header("host", "shop.local:8080")
            .body(())
            .unwrap();

        let ctx = UrlContext::from_parts(&parts(request));
        assert_eq!(ctx.scheme(), "http");
        assert_eq!(ctx.host(), "shop.local:8080");
        assert_eq!(ctx.query(), "limit(0,5)");
    }

    #[test]
    fn test_from_parts_prefers_absolute_uri_and_forwarded_proto() {
        let absolute = Request::builder()
            .uri("https://api.example.com/orders")
            .header("host", "ignored")
            .body(())
            .unwrap();
        let ctx = UrlContext::from_parts(&parts(absolute));
        assert_eq!(ctx.base(), "https://api.example.com");
        assert_eq!(ctx.query(), "");

        let proxied = Request::builder()
            .uri("/orders")
            .header("host", "api.example.com")
            .header("x-forwarded-proto", "https")
            .body(())
            .unwrap();
        let ctx = UrlContext::from_parts(&parts(proxied));
        assert_eq!(ctx.base(), "https://api.example.com");
    }
}
