use std::collections::BTreeSet;

use serde_json::Value;

use crate::foundation::core::{ColourSpace, Rgba8};
use crate::foundation::error::{TsgError, TsgResult};
use crate::geometry::LocationSpec;

/// A test-card document: one canvas layout and the frames drawn on it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TestCardConfig {
    pub canvas: CanvasSpec,
    pub frames: Vec<FrameSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<SchedulerSection>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub grid: GridSpec,
    #[serde(default = "default_background")]
    pub background: Rgba8,
    #[serde(default = "default_colour_space")]
    pub colour_space: ColourSpace,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct GridSpec {
    pub rows: u32,
    pub columns: u32,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FrameSpec {
    pub name: String,
    pub widgets: Vec<WidgetSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct WidgetSpec {
    pub alias: String,
    #[serde(rename = "type")]
    pub widget_type: String,
    pub location: LocationSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour_space: Option<ColourSpace>,
    #[serde(default = "empty_object")]
    pub props: Value,
}

/// Optional scheduler overrides carried in the document.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SchedulerSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner_slots: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_deadline_ms: Option<u64>,
}

fn default_background() -> Rgba8 {
    Rgba8::BLACK
}

fn default_colour_space() -> ColourSpace {
    ColourSpace("rec709".to_string())
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl TestCardConfig {
    pub fn validate(&self) -> TsgResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(TsgError::validation("canvas width/height must be > 0"));
        }
        if self.canvas.grid.rows == 0 || self.canvas.grid.columns == 0 {
            return Err(TsgError::validation("canvas grid rows/columns must be > 0"));
        }
        if self.frames.is_empty() {
            return Err(TsgError::validation("test card must declare at least one frame"));
        }
        if let Some(s) = &self.scheduler
            && s.runner_slots == Some(0)
        {
            return Err(TsgError::validation("scheduler runner_slots must be > 0"));
        }

        let mut names = BTreeSet::new();
        for frame in &self.frames {
            frame.validate()?;
            if !names.insert(frame.name.as_str()) {
                return Err(TsgError::validation(format!(
                    "frame name '{}' is used more than once",
                    frame.name
                )));
            }
        }
        Ok(())
    }
}

impl FrameSpec {
    pub fn validate(&self) -> TsgResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TsgError::validation("frame name must be non-empty"));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(TsgError::validation(format!(
                "frame name '{}' must be usable as a file name",
                self.name
            )));
        }

        let mut aliases = BTreeSet::new();
        for w in &self.widgets {
            if w.alias.trim().is_empty() {
                return Err(TsgError::validation(format!(
                    "frame '{}' has a widget with an empty alias",
                    self.name
                )));
            }
            if w.widget_type.trim().is_empty() {
                return Err(TsgError::validation(format!(
                    "widget '{}' in frame '{}' has an empty type",
                    w.alias, self.name
                )));
            }
            if !aliases.insert(w.alias.as_str()) {
                return Err(TsgError::validation(format!(
                    "alias '{}' is used more than once in frame '{}'",
                    w.alias, self.name
                )));
            }
        }
        Ok(())
    }
}
