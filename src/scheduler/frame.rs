use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;

use crate::assets::search::AssetSearcher;
use crate::foundation::error::{TsgError, TsgResult};
use crate::geometry::GeometryResolver;
use crate::handler::middleware::Middleware;
use crate::handler::registry::Registry;
use crate::render::canvas::Rgba8Canvas;
use crate::render::compositor::Compositor;
use crate::scheduler::descriptor::{WidgetDescriptor, check_descriptor_set};
use crate::scheduler::ledger::DrawLedger;
use crate::scheduler::metadata::MetadataStore;
use crate::scheduler::pipeline::{WidgetOutcome, run_widget};
use crate::scheduler::pool::ResourcePool;

static NULL_PROPS: Value = Value::Null;

/// Tuning knobs for one frame's scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerOpts {
    /// Maximum number of handlers executing at once (at least one).
    pub runner_slots: usize,
    /// First sleep of the slot and ordering polling loops.
    pub poll_initial: Duration,
    /// Cap on the polling sleep.
    pub poll_max: Duration,
    /// How long a widget may wait for ordering clearance without any predecessor logging or
    /// completing before it is failed with `SchedulerFault`; `None` waits forever.
    pub queue_deadline: Option<Duration>,
}

impl Default for SchedulerOpts {
    fn default() -> Self {
        Self {
            runner_slots: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            poll_initial: Duration::from_micros(100),
            poll_max: Duration::from_millis(5),
            queue_deadline: Some(Duration::from_secs(120)),
        }
    }
}

/// Read-only collaborators shared by every pipeline of a frame.
#[derive(Clone, Copy)]
pub struct FrameEnv<'a> {
    /// Widget type lookup.
    pub registry: &'a Registry,
    /// Caller middlewares, outermost first.
    pub middlewares: &'a [Arc<dyn Middleware>],
    /// Location resolution.
    pub geometry: &'a dyn GeometryResolver,
    /// Blend primitive used in the composite step.
    pub compositor: &'a dyn Compositor,
    /// External resource lookup exposed to handlers.
    pub searcher: &'a dyn AssetSearcher,
}

/// Scheduling state for a single frame: draw ledger, runner pool, metadata store and the
/// shared canvas.
///
/// Runs once; build a fresh scheduler per frame.
#[derive(Debug)]
pub struct FrameScheduler {
    ledger: DrawLedger,
    pool: ResourcePool,
    metadata: MetadataStore,
    canvas: Mutex<Rgba8Canvas>,
    errors: AtomicUsize,
    started: AtomicBool,
    opts: SchedulerOpts,
}

impl FrameScheduler {
    /// Scheduler for `widget_count` widgets drawing onto `canvas`.
    pub fn new(canvas: Rgba8Canvas, widget_count: usize, opts: SchedulerOpts) -> Self {
        Self {
            ledger: DrawLedger::new(widget_count),
            pool: ResourcePool::new(opts.runner_slots),
            metadata: MetadataStore::new(),
            canvas: Mutex::new(canvas),
            errors: AtomicUsize::new(0),
            started: AtomicBool::new(false),
            opts,
        }
    }

    /// Run every widget to completion and return their outcomes in z order.
    ///
    /// Widget failures are reported through the outcomes and [`FrameScheduler::error_count`];
    /// only a malformed descriptor set or a second call fail the whole frame.
    #[tracing::instrument(skip_all, fields(widgets = widgets.len(), slots = self.pool.limit()))]
    pub fn run(
        &self,
        widgets: &[WidgetDescriptor],
        env: &FrameEnv<'_>,
    ) -> TsgResult<Vec<WidgetOutcome>> {
        if widgets.len() != self.ledger.len() {
            return Err(TsgError::validation(format!(
                "frame scheduler was built for {} widgets but got {}",
                self.ledger.len(),
                widgets.len()
            )));
        }
        check_descriptor_set(widgets)?;
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(TsgError::validation("frame scheduler has already run"));
        }

        let mut ordered: Vec<&WidgetDescriptor> = widgets.iter().collect();
        ordered.sort_by_key(|w| w.z);

        // Every payload is in the metadata store before any handler runs, so cross-widget
        // lookups do not depend on thread timing.
        let parsed: Vec<Result<Value, String>> = ordered.iter().map(|w| w.parse_props()).collect();
        for (w, p) in ordered.iter().zip(&parsed) {
            if let Ok(v) = p {
                self.metadata.put(w.alias.clone(), v.clone());
            }
        }

        let span = tracing::Span::current();
        let dispatch = tracing::dispatcher::get_default(|d| d.clone());
        let mut outcomes = thread::scope(|s| {
            let mut handles = Vec::with_capacity(ordered.len());
            let mut inline = Vec::new();
            for (w, p) in ordered.iter().copied().zip(&parsed) {
                let (props, parse_error) = match p {
                    Ok(v) => (v, None),
                    Err(e) => (&NULL_PROPS, Some(e.as_str())),
                };
                let span = span.clone();
                let dispatch = dispatch.clone();
                let spawned = thread::Builder::new()
                    .name(format!("tsg-z{}", w.z))
                    .spawn_scoped(s, move || {
                        tracing::dispatcher::with_default(&dispatch, || {
                            let _enter = span.enter();
                            run_widget(self, env, w, props, parse_error)
                        })
                    });
                match spawned {
                    Ok(h) => handles.push(h),
                    Err(e) => {
                        // Lower z-positions are already running, so running inline still
                        // makes progress.
                        tracing::warn!(alias = %w.alias, "could not spawn pipeline thread: {e}");
                        inline.push(run_widget(self, env, w, props, parse_error));
                    }
                }
            }
            let mut out = inline;
            for h in handles {
                match h.join() {
                    Ok(o) => out.push(o),
                    Err(p) => std::panic::resume_unwind(p),
                }
            }
            out
        });
        outcomes.sort_by_key(|o| o.z);

        tracing::debug!(
            errors = self.error_count(),
            current_z = self.ledger.current_z(),
            "frame complete"
        );
        Ok(outcomes)
    }

    /// Widgets that ended with a failure status (placeholders excluded).
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Acquire)
    }

    /// Per-z draw ledger.
    pub fn ledger(&self) -> &DrawLedger {
        &self.ledger
    }

    /// Runner slot pool.
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Parsed widget configurations of this frame.
    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    /// Options the scheduler was built with.
    pub fn opts(&self) -> &SchedulerOpts {
        &self.opts
    }

    /// Copy of the shared canvas in its current state.
    pub fn snapshot(&self) -> Rgba8Canvas {
        self.canvas.lock().clone()
    }

    /// Consume the scheduler and return the composited canvas.
    pub fn into_canvas(self) -> Rgba8Canvas {
        self.canvas.into_inner()
    }

    pub(crate) fn canvas(&self) -> &Mutex<Rgba8Canvas> {
        &self.canvas
    }

    pub(crate) fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/frame.rs"]
mod tests;
