use serde_json::Value;

use crate::config::lines::SourceLocation;
use crate::foundation::core::ColourSpace;
use crate::foundation::error::{TsgError, TsgResult};
use crate::geometry::LocationSpec;

/// One widget of a frame, immutable once the frame starts.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetDescriptor {
    /// Widget identity within the frame.
    pub alias: String,
    /// Registered widget type.
    pub widget_type: String,
    /// Draw priority; dense and unique within a frame (`0..N`).
    pub z: usize,
    /// Where the widget draws.
    pub location: LocationSpec,
    /// Declared colour space, passed through to the handler.
    pub colour_space: ColourSpace,
    /// Configuration payload as declared (JSON bytes).
    pub raw: Vec<u8>,
    /// Declaration site, for diagnostics.
    pub source: Option<SourceLocation>,
}

impl WidgetDescriptor {
    /// Descriptor whose payload is `props` serialised to JSON.
    pub fn new(
        alias: impl Into<String>,
        widget_type: impl Into<String>,
        z: usize,
        location: LocationSpec,
        props: &Value,
    ) -> Self {
        Self {
            alias: alias.into(),
            widget_type: widget_type.into(),
            z,
            location,
            colour_space: ColourSpace::default(),
            raw: props.to_string().into_bytes(),
            source: None,
        }
    }

    /// Replace the declared colour space.
    pub fn with_colour_space(mut self, colour_space: ColourSpace) -> Self {
        self.colour_space = colour_space;
        self
    }

    /// Replace the payload with raw bytes, which need not be valid JSON.
    pub fn with_raw(mut self, raw: impl Into<Vec<u8>>) -> Self {
        self.raw = raw.into();
        self
    }

    /// Attach the declaration site.
    pub fn with_source(mut self, source: Option<SourceLocation>) -> Self {
        self.source = source;
        self
    }

    /// Parse the payload; an empty payload is an empty object.
    pub fn parse_props(&self) -> Result<Value, String> {
        if self.raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_slice(&self.raw).map_err(|e| e.to_string())
    }
}

/// Check that the z-positions of `widgets` are exactly `0..widgets.len()`.
pub fn check_descriptor_set(widgets: &[WidgetDescriptor]) -> TsgResult<()> {
    let mut seen = vec![false; widgets.len()];
    for w in widgets {
        match seen.get_mut(w.z) {
            Some(s) if !*s => *s = true,
            Some(_) => {
                return Err(TsgError::validation(format!(
                    "z-position {} is used by more than one widget ('{}')",
                    w.z, w.alias
                )));
            }
            None => {
                return Err(TsgError::validation(format!(
                    "widget '{}' has z-position {} but the frame has {} widgets",
                    w.alias,
                    w.z,
                    widgets.len()
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/descriptor.rs"]
mod tests;
