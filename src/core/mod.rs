//! Core module containing the resource model and projection output types

pub mod bag;
pub mod error;
pub mod module;
pub mod node;
pub mod page;
pub mod resource;
pub mod url;

pub use bag::{BagValue, ResourceBag};
pub use error::{ErrorResponse, HalError};
pub use module::HalModule;
pub use node::{Embedded, HalResource, LinkDescriptor, Links};
pub use page::Page;
pub use resource::{AsAny, Field, FieldValue, Fields, Resource, ResourceType, Shape};
pub use url::UrlContext;
