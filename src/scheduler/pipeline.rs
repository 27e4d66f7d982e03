//! The per-widget state machine: resolve, materialize, log, invoke, queue, composite,
//! complete.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::foundation::core::{Offset, PixelRect};
use crate::geometry::GeometryFragment;
use crate::handler::middleware::{Middleware, ValidationMiddleware, chain};
use crate::handler::request::{
    Handler, Request, RequestParts, RequestServices, Response, StatusHandler,
};
use crate::handler::status::StatusCode;
use crate::render::canvas::{Mask, Rgba8Canvas};
use crate::render::compositor::BlendOp;
use crate::scheduler::backoff::PollBackoff;
use crate::scheduler::descriptor::WidgetDescriptor;
use crate::scheduler::frame::{FrameEnv, FrameScheduler};
use crate::schema::WidgetSchema;

/// Widget type of the no-op canvas placeholder.
///
/// Never dispatched to a handler, never composited and never counted as an error.
pub const CANVAS_WIDGET_TYPE: &str = "builtin.canvas";

/// What happened to one widget of a frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct WidgetOutcome {
    /// Widget identity.
    pub alias: String,
    /// Widget type.
    pub widget_type: String,
    /// Draw priority.
    pub z: usize,
    /// Final status.
    pub status: StatusCode,
    /// Message written with the status.
    pub message: String,
    /// Area logged in the draw ledger.
    pub area: PixelRect,
    /// Whether the widget's output reached the shared canvas.
    pub composited: bool,
}

struct Materialized {
    canvas: Rgba8Canvas,
    offset: Offset,
    mask: Option<Mask>,
    fragments: Vec<GeometryFragment>,
}

impl Materialized {
    fn failed() -> Self {
        Self {
            canvas: Rgba8Canvas::new(0, 0),
            offset: Offset::default(),
            mask: None,
            fragments: Vec::new(),
        }
    }

    fn area(&self) -> PixelRect {
        PixelRect::at(self.offset, self.canvas.width(), self.canvas.height())
    }
}

/// Drive one widget from resolution to completion.
///
/// Per-widget failures end up in the returned status; only scheduler invariant violations
/// panic.
pub(crate) fn run_widget(
    frame: &FrameScheduler,
    env: &FrameEnv<'_>,
    desc: &WidgetDescriptor,
    props: &Value,
    parse_error: Option<&str>,
) -> WidgetOutcome {
    let z = desc.z;
    let opts = frame.opts();

    // Resolve.
    let (terminal, schema) = resolve(env, desc, props, parse_error);

    // Materialize.
    let (terminal, mat) = match materialize(env, desc) {
        Ok(mat) => (terminal, mat),
        Err(msg) => {
            tracing::debug!(alias = %desc.alias, z, "location did not resolve: {msg}");
            let bad: Arc<dyn Handler> = Arc::new(StatusHandler::new(StatusCode::BadRequest, msg));
            (bad, Materialized::failed())
        }
    };

    // Log intent before any handler runs.
    let area = mat.area();
    frame.ledger().log_area(z, area);
    tracing::debug!(alias = %desc.alias, z, %area, "logged intended area");

    let mut middlewares: Vec<Arc<dyn Middleware>> = env.middlewares.to_vec();
    if let Some(schema) = schema {
        middlewares.push(Arc::new(ValidationMiddleware::new(schema)));
    }
    let handler = chain(&middlewares, terminal);

    // Invoke.
    let mut backoff = PollBackoff::new(opts.poll_initial, opts.poll_max);
    let slot = frame.pool().acquire(&mut backoff);
    let Materialized {
        canvas,
        offset,
        mask,
        fragments,
    } = mat;
    let mut resp = Response::new(canvas);
    {
        let req = Request::new(
            RequestParts {
                widget_type: &desc.widget_type,
                alias: &desc.alias,
                z,
                width: resp.canvas().width(),
                height: resp.canvas().height(),
                offset,
                fragments: &fragments,
                colour_space: &desc.colour_space,
                props,
                raw: &desc.raw,
                source: desc.source.as_ref(),
            },
            RequestServices {
                metadata: frame.metadata(),
                searcher: env.searcher,
            },
        );
        let invoked = catch_unwind(AssertUnwindSafe(|| handler.handle(&mut resp, &req)));
        if let Err(payload) = invoked {
            let msg = panic_message(payload.as_ref());
            tracing::error!(alias = %desc.alias, z, "widget handler panicked: {msg}");
            resp.write(
                StatusCode::HandlerError,
                format!("widget handler panicked: {msg}"),
            );
        }
    }
    frame.pool().release(slot);

    // Queue without holding a slot.
    let mut status = resp.status();
    let mut message = resp.message().to_string();
    let cleared = wait_until_clear(frame, z, area, &mut backoff, opts.queue_deadline);
    if !cleared {
        status = StatusCode::SchedulerFault;
        message = format!(
            "ordering wait for z-position {z} saw no progress for {:?} (current z-position {})",
            opts.queue_deadline.unwrap_or_default(),
            frame.ledger().current_z()
        );
        tracing::error!(alias = %desc.alias, z, "{message}");
    }

    // Composite.
    let slot = frame.pool().acquire(&mut backoff);
    let mut composited = false;
    if cleared && status.should_composite() && !area.is_empty() {
        let scratch = resp.into_canvas();
        let blended = {
            let mut shared = frame.canvas().lock();
            env.compositor.blend(
                &mut shared,
                area,
                &scratch,
                Offset::default(),
                mask.as_ref(),
                Offset::default(),
                BlendOp::Over,
            )
        };
        match blended {
            Ok(()) => composited = true,
            Err(e) => {
                status = StatusCode::HandlerError;
                message = format!("composite failed: {e}");
                tracing::error!(alias = %desc.alias, z, "{message}");
            }
        }
    }

    if !status.is_success() && desc.widget_type != CANVAS_WIDGET_TYPE {
        frame.record_error();
    }

    // Complete.
    frame.ledger().complete(z);
    frame.pool().release(slot);
    tracing::debug!(alias = %desc.alias, z, status = status.code(), composited, "widget complete");

    WidgetOutcome {
        alias: desc.alias.clone(),
        widget_type: desc.widget_type.clone(),
        z,
        status,
        message,
        area,
        composited,
    }
}

type Resolved = (Arc<dyn Handler>, Option<Arc<WidgetSchema>>);

fn resolve(
    env: &FrameEnv<'_>,
    desc: &WidgetDescriptor,
    props: &Value,
    parse_error: Option<&str>,
) -> Resolved {
    if desc.widget_type == CANVAS_WIDGET_TYPE {
        return (
            Arc::new(StatusHandler::new(StatusCode::Skipped, "canvas placeholder")),
            None,
        );
    }

    let Some(reg) = env.registry.get(&desc.widget_type) else {
        return (
            Arc::new(StatusHandler::new(
                StatusCode::WidgetNotFound,
                format!(
                    "no handler registered for widget type '{}' (widget '{}')",
                    desc.widget_type, desc.alias
                ),
            )),
            None,
        );
    };

    let schema = reg.schema.clone();
    if let Some(err) = parse_error {
        let bad = StatusHandler::new(
            StatusCode::BadRequest,
            format!("payload of '{}' is not valid JSON: {err}", desc.alias),
        );
        return (Arc::new(bad), None);
    }

    match reg.instantiate(props) {
        Ok(handler) => (handler, schema),
        Err(err) => {
            let bad = StatusHandler::new(
                StatusCode::BadRequest,
                format!("payload of '{}' is invalid: {err}", desc.alias),
            );
            (Arc::new(bad), schema)
        }
    }
}

fn materialize(env: &FrameEnv<'_>, desc: &WidgetDescriptor) -> Result<Materialized, String> {
    let placement = env
        .geometry
        .resolve_location(&desc.location)
        .map_err(|e| format!("location of '{}' is invalid: {e}", desc.alias))?;
    let fragments = env
        .geometry
        .resolve_geometry(&desc.location)
        .map_err(|e| format!("geometry of '{}' is invalid: {e}", desc.alias))?;
    Ok(Materialized {
        canvas: placement.canvas,
        offset: placement.offset,
        mask: placement.mask,
        fragments,
    })
}

/// Poll until `z` may composite. The deadline restarts whenever the ledger changes, so it only
/// fires after `deadline` with no area logged and no z-position completed.
fn wait_until_clear(
    frame: &FrameScheduler,
    z: usize,
    area: PixelRect,
    backoff: &mut PollBackoff,
    deadline: Option<Duration>,
) -> bool {
    let expiry = || deadline.and_then(|d| Instant::now().checked_add(d));
    let mut seen = frame.ledger().changes();
    let mut expires = expiry();
    backoff.reset();
    loop {
        if frame.ledger().is_clear(z, area) {
            return true;
        }
        let changes = frame.ledger().changes();
        if changes != seen {
            seen = changes;
            expires = expiry();
        } else if let Some(at) = expires
            && Instant::now() >= at
        {
            return false;
        }
        backoff.wait();
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
