use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::assets::search::{AssetSearcher, LocalSearcher};
use crate::config::TestCard;
use crate::foundation::error::{TsgError, TsgResult};
use crate::geometry::{GeometryResolver, GridGeometry};
use crate::handler::middleware::{LoggingMiddleware, Middleware};
use crate::handler::registry::{HandlerFactory, Registry};
use crate::handler::request::Handler;
use crate::render::canvas::Rgba8Canvas;
use crate::render::compositor::{Compositor, OverCompositor};
use crate::scheduler::frame::{FrameEnv, FrameScheduler, SchedulerOpts};
use crate::scheduler::pipeline::WidgetOutcome;
use crate::schema::WidgetSchema;

/// Result of rendering one frame.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FrameReport {
    /// Frame name from the document.
    pub name: String,
    /// Composited canvas (premultiplied).
    #[serde(skip)]
    pub canvas: Rgba8Canvas,
    /// Widgets that failed (placeholders excluded).
    pub error_count: usize,
    /// Per-widget outcomes in z order.
    pub outcomes: Vec<WidgetOutcome>,
}

/// One written frame in a [`RunSummary`].
#[derive(Clone, Debug, serde::Serialize)]
pub struct FrameSummary {
    pub name: String,
    pub output: PathBuf,
    pub error_count: usize,
    pub outcomes: Vec<WidgetOutcome>,
}

/// Everything [`OpenTsg::run`] wrote; serialised as `report.json`.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct RunSummary {
    pub frames: Vec<FrameSummary>,
    pub total_errors: usize,
}

/// Test-card generator: a document plus the handlers, middlewares and collaborators used to
/// render it.
pub struct OpenTsg {
    card: TestCard,
    registry: Registry,
    middlewares: Vec<Arc<dyn Middleware>>,
    geometry: Arc<dyn GeometryResolver>,
    compositor: Arc<dyn Compositor>,
    searcher: Arc<dyn AssetSearcher>,
    opts: SchedulerOpts,
}

impl OpenTsg {
    /// Generator for `card` with the built-in widgets, grid geometry, CPU compositor, a
    /// searcher rooted at the document's directory and [`LoggingMiddleware`] installed.
    pub fn new(card: TestCard) -> TsgResult<Self> {
        let c = &card.config().canvas;
        let geometry = GridGeometry::new(c.width, c.height, c.grid.rows, c.grid.columns)?;
        let searcher = LocalSearcher::new(card.base_dir().map(Path::to_path_buf));
        let opts = card.scheduler_opts(SchedulerOpts::default());
        Ok(Self {
            card,
            registry: Registry::with_builtins(),
            middlewares: vec![Arc::new(LoggingMiddleware) as Arc<dyn Middleware>],
            geometry: Arc::new(geometry),
            compositor: Arc::new(OverCompositor),
            searcher: Arc::new(searcher),
            opts,
        })
    }

    /// Load the document at `path` and build a generator for it.
    pub fn from_path(path: &Path) -> TsgResult<Self> {
        Self::new(TestCard::from_path(path)?)
    }

    /// The document being rendered.
    pub fn card(&self) -> &TestCard {
        &self.card
    }

    /// Registered widget types.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register widget type `widget_type`, deserialising a fresh `W` per invocation.
    ///
    /// Fails when the type is already registered.
    pub fn register_handler<W>(
        &mut self,
        widget_type: &str,
        schema: Option<WidgetSchema>,
    ) -> TsgResult<()>
    where
        W: Handler + DeserializeOwned + 'static,
    {
        self.registry.register::<W>(widget_type, schema)
    }

    /// Register a custom handler factory for `widget_type`.
    pub fn register_factory(
        &mut self,
        widget_type: &str,
        schema: Option<WidgetSchema>,
        factory: HandlerFactory,
    ) -> TsgResult<()> {
        self.registry.register_factory(widget_type, schema, factory)
    }

    /// Append a middleware; earlier middlewares wrap later ones, starting with the default
    /// [`LoggingMiddleware`].
    pub fn use_middleware(&mut self, mw: impl Middleware + 'static) -> &mut Self {
        self.middlewares.push(Arc::new(mw));
        self
    }

    /// Remove every middleware, the default logger included.
    pub fn clear_middlewares(&mut self) -> &mut Self {
        self.middlewares.clear();
        self
    }

    /// Replace the geometry resolver.
    pub fn with_geometry(mut self, geometry: impl GeometryResolver + 'static) -> Self {
        self.geometry = Arc::new(geometry);
        self
    }

    /// Replace the compositor.
    pub fn with_compositor(mut self, compositor: impl Compositor + 'static) -> Self {
        self.compositor = Arc::new(compositor);
        self
    }

    /// Replace the asset searcher.
    pub fn with_searcher(mut self, searcher: impl AssetSearcher + 'static) -> Self {
        self.searcher = Arc::new(searcher);
        self
    }

    /// Replace the scheduler options.
    pub fn with_opts(mut self, opts: SchedulerOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Scheduler options used for every frame.
    pub fn opts(&self) -> &SchedulerOpts {
        &self.opts
    }

    /// Render frame `index` through a fresh scheduler.
    pub fn render_frame(&self, index: usize) -> TsgResult<FrameReport> {
        let name = self.card.frame_name(index)?.to_string();
        let span = tracing::info_span!("frame", name = %name);
        let _enter = span.enter();

        let widgets = self.card.descriptors(index)?;
        let bg = self.card.frame_background(index)?;
        let c = &self.card.config().canvas;
        let canvas = Rgba8Canvas::filled(c.width, c.height, bg.premultiplied());

        let env = FrameEnv {
            registry: &self.registry,
            middlewares: &self.middlewares,
            geometry: self.geometry.as_ref(),
            compositor: self.compositor.as_ref(),
            searcher: self.searcher.as_ref(),
        };
        let scheduler = FrameScheduler::new(canvas, widgets.len(), self.opts.clone());
        let outcomes = scheduler.run(&widgets, &env)?;
        let error_count = scheduler.error_count();
        if error_count > 0 {
            tracing::warn!(errors = error_count, "frame finished with widget errors");
        } else {
            tracing::info!(widgets = outcomes.len(), "frame finished");
        }

        Ok(FrameReport {
            name,
            canvas: scheduler.into_canvas(),
            error_count,
            outcomes,
        })
    }

    /// Render every frame in order, writing `<out_dir>/<frame>.png` and
    /// `<out_dir>/report.json`.
    #[tracing::instrument(skip_all, fields(out_dir = %out_dir.display()))]
    pub fn run(&self, out_dir: &Path) -> TsgResult<RunSummary> {
        std::fs::create_dir_all(out_dir)?;

        let mut summary = RunSummary::default();
        for index in 0..self.card.frame_count() {
            let report = self.render_frame(index)?;
            let output = out_dir.join(format!("{}.png", report.name));
            write_png(&output, &report.canvas)?;
            tracing::debug!(path = %output.display(), "wrote frame");

            summary.total_errors += report.error_count;
            summary.frames.push(FrameSummary {
                name: report.name,
                output,
                error_count: report.error_count,
                outcomes: report.outcomes,
            });
        }

        let report_path = out_dir.join("report.json");
        std::fs::write(&report_path, serde_json::to_vec_pretty(&summary)?)?;
        Ok(summary)
    }
}

/// Encode `canvas` as straight-alpha RGBA8 PNG.
pub fn write_png(path: &Path, canvas: &Rgba8Canvas) -> TsgResult<()> {
    image::save_buffer_with_format(
        path,
        &canvas.to_straight_rgba8(),
        canvas.width(),
        canvas.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| TsgError::render(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
