//! Test-card documents: JSON model, validation and widget descriptor generation.

pub(crate) mod document;
pub(crate) mod lines;
pub(crate) mod model;

pub use document::TestCard;
pub use lines::{SourceLines, SourceLocation};
pub use model::{CanvasSpec, FrameSpec, GridSpec, SchedulerSection, TestCardConfig, WidgetSpec};
