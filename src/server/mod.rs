//! Server module for serving projected resources over axum
//!
//! This module provides:
//! - `HalBuilder` to compose link rules from modules
//! - `HalHost`, the frozen state shared by requests
//! - `HalContext`, the per-request extractor and response gate

pub mod builder;
pub mod host;
pub mod negotiation;
pub mod response;

pub use builder::HalBuilder;
pub use host::HalHost;
pub use negotiation::MediaStyle;
pub use response::HalContext;
