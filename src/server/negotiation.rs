//! Media style negotiation
//!
//! Clients opt into projected responses with a vendor media type of the form
//! `application/<style>.v<version>+<media>`, e.g. `application/hal.v1+json`.

use axum::http::HeaderMap;
use axum::http::header::ACCEPT;
use regex::Regex;
use std::sync::OnceLock;

fn media_style_regex() -> &'static Regex {
    static MEDIA_STYLE: OnceLock<Regex> = OnceLock::new();
    MEDIA_STYLE.get_or_init(|| {
        Regex::new(r"(?i)application/(?<style>[a-z0-9-]+)\.v(?<version>[0-9]+)\+(?<media>.*)")
            .expect("media style pattern is valid")
    })
}

/// A negotiated `application/<style>.v<version>+<media>` media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStyle {
    pub style: String,
    pub version: u32,
    pub media: String,
}

impl MediaStyle {
    /// Parse one media range
    ///
    /// Media type parameters (`;q=0.9`) are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.split(';').next().unwrap_or_default().trim();
        let captures = media_style_regex().captures(value)?;

        let media = captures["media"].trim();
        if media.is_empty() {
            return None;
        }

        Some(Self {
            style: captures["style"].to_string(),
            version: captures["version"].parse().ok()?,
            media: media.to_string(),
        })
    }

    /// First matching media range of the `Accept` headers
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .find_map(Self::parse)
    }

    /// Whether this is the given style, ignoring case
    pub fn is_style(&self, style: &str) -> bool {
        self.style.eq_ignore_ascii_case(style)
    }

    /// `Content-Type` value of a response in this style
    pub fn content_type(&self) -> String {
        format!("application/{}.v{}+{}", self.style, self.version, self.media)
    }
}
