//! OpenTSG generates broadcast test-card frames from a declarative widget configuration.
//!
//! Each frame is a list of widgets (bars, ramps, noise, shapes...) drawn onto a shared
//! canvas in declared z order. Widget handlers run concurrently on private scratch canvases;
//! the per-frame scheduler lets a widget composite ahead of its turn only when its area is
//! disjoint from every pending predecessor, so the result is pixel-identical to a sequential
//! run.
//!
//! - Load a [`TestCard`] and build an [`OpenTsg`]
//! - Register custom [`Handler`]s and [`Middleware`]s
//! - Render single frames with [`OpenTsg::render_frame`] or everything with [`OpenTsg::run`]
#![forbid(unsafe_code)]

mod assets;
mod config;
mod engine;
mod foundation;
mod geometry;
mod handler;
mod render;
mod scheduler;
mod schema;
mod widgets;

pub use crate::assets::search::{AssetSearcher, LocalSearcher, normalize_rel_path};
pub use crate::config::{
    CanvasSpec, FrameSpec, GridSpec, SchedulerSection, SourceLines, SourceLocation, TestCard,
    TestCardConfig, WidgetSpec,
};
pub use crate::engine::{FrameReport, FrameSummary, OpenTsg, RunSummary, write_png};
pub use crate::foundation::core::{ColourSpace, Offset, PixelRect, Rgba8};
pub use crate::foundation::error::{TsgError, TsgResult};
pub use crate::geometry::{
    GeometryFragment, GeometryResolver, GridGeometry, LocationSpec, MaskShape, Placement,
};
pub use crate::handler::middleware::{
    LoggingMiddleware, Middleware, ProfilingMiddleware, TracingMiddleware, WidgetTiming, chain,
};
pub use crate::handler::registry::{HandlerFactory, Registration, Registry};
pub use crate::handler::request::{Handler, Request, Response};
pub use crate::handler::status::{Severity, StatusCode};
pub use crate::render::canvas::{Mask, Rgba8Canvas};
pub use crate::render::compositor::{BlendOp, Compositor, OverCompositor};
pub use crate::scheduler::backoff::PollBackoff;
pub use crate::scheduler::descriptor::{WidgetDescriptor, check_descriptor_set};
pub use crate::scheduler::frame::{FrameEnv, FrameScheduler, SchedulerOpts};
pub use crate::scheduler::ledger::{DrawLedger, LedgerEntry};
pub use crate::scheduler::metadata::MetadataStore;
pub use crate::scheduler::pipeline::{CANVAS_WIDGET_TYPE, WidgetOutcome};
pub use crate::scheduler::pool::{ResourcePool, RunnerSlot};
pub use crate::schema::{FieldKind, SchemaError, SchemaErrors, SchemaPathElem, WidgetSchema};
pub use crate::widgets::{Fill, Noise, Ramp, RampDirection, Shape, ShapeKind, Swatch};
