//! Macros for reducing boilerplate when declaring resources
//!
//! Each listed field becomes one entry of the resource's shape. A field is a
//! plain value unless tagged with its kind:
//!
//! - `field` or `field: value`: serialized as is, never embedded
//! - `field: resource`: a nested resource (`R: Resource`)
//! - `field: optional`: an `Option<R>` of a nested resource
//! - `field: resources`: a `Vec<R>` of resources, always embedded
//!
//! `field = "name"` overrides the property name.

/// Implement `Resource` for a `Serialize` struct with a fixed shape
///
/// # Example
/// ```rust,ignore
/// #[derive(Serialize)]
/// struct Order {
///     id: u32,
///     customer: Customer,
///     invoice: Option<Invoice>,
///     lines: Vec<OrderLine>,
///     created_by: String,
/// }
///
/// impl_resource!(Order {
///     id,
///     customer: resource,
///     invoice: optional,
///     lines: resources,
///     created_by = "createdBy",
/// });
/// ```
#[macro_export]
macro_rules! impl_resource {
    (@impl $shape:ident, $type:ty { $($field:ident $(: $kind:ident)? $(= $rename:literal)?),* }) => {
        impl $crate::core::resource::Resource for $type {
            fn shape(&self) -> $crate::core::resource::Shape<'_> {
                let fields = $crate::core::resource::Fields::new();
                $(
                    let fields = $crate::__hal_field!(
                        fields,
                        $crate::__hal_name!($field $(, $rename)?),
                        &self.$field
                        $(, $kind)?
                    );
                )*
                $crate::core::resource::Shape::$shape(fields)
            }

            fn to_value(&self) -> $crate::resources::Value {
                $crate::resources::plain_value(self)
            }
        }
    };
    ($type:ty { $($field:ident $(: $kind:ident)? $(= $rename:literal)?),* $(,)? }) => {
        $crate::impl_resource!(@impl Record, $type { $($field $(: $kind)? $(= $rename)?),* });
    };
}

/// Implement `Resource` for a paged collection type
///
/// Computed links of the type are built as paged hrefs: the clauses of the
/// current query string, minus its `limit(...)` clause, are appended.
///
/// # Example
/// ```rust,ignore
/// #[derive(Serialize)]
/// struct OrderPage {
///     items: Vec<Order>,
///     offset: usize,
///     limit: usize,
/// }
///
/// impl_paged_resource!(OrderPage { items: resources, offset, limit });
/// ```
#[macro_export]
macro_rules! impl_paged_resource {
    ($type:ty { $($field:ident $(: $kind:ident)? $(= $rename:literal)?),* $(,)? }) => {
        $crate::impl_resource!(@impl Paged, $type { $($field $(: $kind)? $(= $rename)?),* });
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __hal_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $rename:literal) => {
        $rename
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __hal_field {
    ($fields:expr, $name:expr, $value:expr) => {
        $fields.value($name, $value)
    };
    ($fields:expr, $name:expr, $value:expr, value) => {
        $fields.value($name, $value)
    };
    ($fields:expr, $name:expr, $value:expr, resource) => {
        $fields.resource($name, $value)
    };
    ($fields:expr, $name:expr, $value:expr, optional) => {
        $fields.optional($name, ::core::option::Option::as_ref($value))
    };
    ($fields:expr, $name:expr, $value:expr, resources) => {
        $fields.resources($name, $value)
    };
}
