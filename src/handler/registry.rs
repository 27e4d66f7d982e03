use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::foundation::error::{TsgError, TsgResult};
use crate::handler::request::Handler;
use crate::schema::WidgetSchema;

/// Builds a ready-to-run handler from a widget's parsed payload.
pub type HandlerFactory = Arc<dyn Fn(&Value) -> Result<Arc<dyn Handler>, String> + Send + Sync>;

/// Handler factory and optional payload schema for one widget type.
#[derive(Clone)]
pub struct Registration {
    pub(crate) schema: Option<Arc<WidgetSchema>>,
    pub(crate) factory: HandlerFactory,
}

impl Registration {
    /// Payload schema, if one was registered.
    pub fn schema(&self) -> Option<&WidgetSchema> {
        self.schema.as_deref()
    }

    /// Build a handler for `payload`.
    pub fn instantiate(&self, payload: &Value) -> Result<Arc<dyn Handler>, String> {
        (self.factory)(payload)
    }
}

/// Widget type name to handler mapping, populated before any frame runs.
#[derive(Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, Registration>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in widgets.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        crate::widgets::register_builtins(&mut reg);
        reg
    }

    /// Register `W` for `widget_type`; each invocation deserialises a fresh `W` from the payload.
    pub fn register<W>(&mut self, widget_type: &str, schema: Option<WidgetSchema>) -> TsgResult<()>
    where
        W: Handler + DeserializeOwned + 'static,
    {
        self.register_factory(
            widget_type,
            schema,
            Arc::new(|payload: &Value| -> Result<Arc<dyn Handler>, String> {
                let w: W = serde_json::from_value(payload.clone()).map_err(|e| e.to_string())?;
                Ok(Arc::new(w))
            }),
        )
    }

    /// Register a custom factory for `widget_type`.
    pub fn register_factory(
        &mut self,
        widget_type: &str,
        schema: Option<WidgetSchema>,
        factory: HandlerFactory,
    ) -> TsgResult<()> {
        if widget_type.trim().is_empty() {
            return Err(TsgError::registration("widget type must be non-empty"));
        }
        if self.entries.contains_key(widget_type) {
            return Err(TsgError::registration(format!(
                "widget type '{widget_type}' is already registered"
            )));
        }
        self.entries.insert(
            widget_type.to_string(),
            Registration {
                schema: schema.map(Arc::new),
                factory,
            },
        );
        Ok(())
    }

    /// Registration for `widget_type`.
    pub fn get(&self, widget_type: &str) -> Option<&Registration> {
        self.entries.get(widget_type)
    }

    /// Return `true` when `widget_type` is registered.
    pub fn contains(&self, widget_type: &str) -> bool {
        self.entries.contains_key(widget_type)
    }

    /// Registered type names in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/handler/registry.rs"]
mod tests;
