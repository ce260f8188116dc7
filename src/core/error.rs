//! Typed error handling for projections
//!
//! Normal configuration variance (missing rules, ineligible links, empty
//! routes) is never an error. [`HalError`] covers what remains: unbounded
//! resource graphs, invalid settings and serialization failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use hal::prelude::*;
//!
//! match projector.project_resource(&order) {
//!     Ok(hal) => Json(hal).into_response(),
//!     Err(HalError::CycleDetected { resource_type }) => {
//!         tracing::error!("{} references itself", resource_type);
//!         StatusCode::INTERNAL_SERVER_ERROR.into_response()
//!     }
//!     Err(e) => e.into_response(),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The error type of the projection engine
#[derive(Debug, thiserror::Error)]
pub enum HalError {
    /// An object is reachable from itself through its own fields
    #[error("Cycle detected while projecting '{resource_type}'")]
    CycleDetected { resource_type: String },

    /// The resource graph nests deeper than allowed
    #[error("Projection of '{resource_type}' exceeds the maximum depth of {max_depth}")]
    DepthExceeded {
        resource_type: String,
        max_depth: usize,
    },

    /// Invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// A projected document could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl HalError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HalError::CycleDetected { .. } => "HAL_CYCLE_DETECTED",
            HalError::DepthExceeded { .. } => "HAL_DEPTH_EXCEEDED",
            HalError::Config(_) => "CONFIG_ERROR",
            HalError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            HalError::CycleDetected { resource_type } => Some(serde_json::json!({
                "resource_type": resource_type
            })),
            HalError::DepthExceeded {
                resource_type,
                max_depth,
            } => Some(serde_json::json!({
                "resource_type": resource_type,
                "max_depth": max_depth
            })),
            _ => None,
        }
    }
}

impl IntoResponse for HalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
