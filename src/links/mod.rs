//! Link management module
//!
//! This module provides the link rule registry, the resolver that turns rules
//! into `_links` blocks and the paging URL composer.

pub mod paging;
pub mod registry;
pub mod resolver;
pub mod rule;

pub use registry::{LinkRegistry, SealedRegistry};
pub use resolver::LinkResolver;
pub use rule::LinkRule;
