//! Payload schemas for widget types.
//!
//! A schema is registered alongside a handler; payloads are checked before the handler runs.

pub(crate) mod validate;

pub use validate::{FieldKind, SchemaError, SchemaErrors, SchemaPathElem, WidgetSchema};
