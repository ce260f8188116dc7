//! Helpers for declaring resource types

pub mod macros;

use serde::Serialize;
#[doc(hidden)]
pub use serde_json::Value;

/// Plain JSON form of a serializable resource
///
/// Used by the generated `Resource::to_value`. A value that fails to
/// serialize is logged and rendered as `null`.
pub fn plain_value<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!(
            resource_type = std::any::type_name::<T>(),
            error = %e,
            "Resource could not be serialized"
        );
        Value::Null
    })
}
