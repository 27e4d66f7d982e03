use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::handler::request::{Handler, Request, Response};
use crate::handler::status::{Severity, StatusCode};
use crate::schema::WidgetSchema;

/// Decorator around a [`Handler`].
pub trait Middleware: Send + Sync {
    /// Wrap `next`, returning the decorated handler.
    fn wrap(&self, next: Arc<dyn Handler>) -> Arc<dyn Handler>;
}

impl<F> Middleware for F
where
    F: Fn(Arc<dyn Handler>) -> Arc<dyn Handler> + Send + Sync,
{
    fn wrap(&self, next: Arc<dyn Handler>) -> Arc<dyn Handler> {
        self(next)
    }
}

/// Compose `middlewares` around `terminal`; the first middleware is the outermost.
pub fn chain(middlewares: &[Arc<dyn Middleware>], terminal: Arc<dyn Handler>) -> Arc<dyn Handler> {
    middlewares
        .iter()
        .rev()
        .fold(terminal, |next, mw| mw.wrap(next))
}

/// Checks the payload against the widget type's schema before the handler runs.
///
/// Emits one warning per violation and short-circuits with
/// [`StatusCode::ValidationFailed`].
pub(crate) struct ValidationMiddleware {
    schema: Arc<WidgetSchema>,
}

impl ValidationMiddleware {
    pub(crate) fn new(schema: Arc<WidgetSchema>) -> Self {
        Self { schema }
    }
}

impl Middleware for ValidationMiddleware {
    fn wrap(&self, next: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(Validated {
            schema: Arc::clone(&self.schema),
            next,
        })
    }
}

struct Validated {
    schema: Arc<WidgetSchema>,
    next: Arc<dyn Handler>,
}

impl Handler for Validated {
    fn handle(&self, resp: &mut Response, req: &Request<'_>) {
        let Err(errs) = self.schema.validate(req.props) else {
            self.next.handle(resp, req);
            return;
        };
        let at = req
            .source
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown location".to_string());
        for e in &errs.errors {
            tracing::warn!(
                alias = req.alias,
                widget_type = req.widget_type,
                at = %at,
                "schema violation: {e}"
            );
        }
        let details: Vec<String> = errs.errors.iter().map(|e| e.to_string()).collect();
        resp.write(
            StatusCode::ValidationFailed,
            format!("{} (declared at {at}): {}", req.alias, details.join("; ")),
        );
    }
}

/// Logs one line per widget once its handler returns, at the status' severity.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn wrap(&self, next: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(Logged { next })
    }
}

struct Logged {
    next: Arc<dyn Handler>,
}

impl Handler for Logged {
    fn handle(&self, resp: &mut Response, req: &Request<'_>) {
        self.next.handle(resp, req);
        let status = resp.status();
        let code = status.code();
        match status.severity() {
            Severity::Info => tracing::info!(
                alias = req.alias,
                widget_type = req.widget_type,
                z = req.z,
                status = code,
                "{}",
                resp.message()
            ),
            Severity::Warn => tracing::warn!(
                alias = req.alias,
                widget_type = req.widget_type,
                z = req.z,
                status = code,
                "{}",
                resp.message()
            ),
            Severity::Error => tracing::error!(
                alias = req.alias,
                widget_type = req.widget_type,
                z = req.z,
                status = code,
                "{}",
                resp.message()
            ),
        }
    }
}

/// Runs the inner handler inside a `widget` span.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn wrap(&self, next: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(Traced { next })
    }
}

struct Traced {
    next: Arc<dyn Handler>,
}

impl Handler for Traced {
    fn handle(&self, resp: &mut Response, req: &Request<'_>) {
        let span = tracing::info_span!(
            "widget",
            alias = req.alias,
            widget_type = req.widget_type,
            z = req.z
        );
        let _enter = span.enter();
        self.next.handle(resp, req);
    }
}

/// Wall time spent in one widget's handler.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct WidgetTiming {
    /// Widget identity.
    pub alias: String,
    /// Widget type.
    pub widget_type: String,
    /// Time spent inside the wrapped handler.
    pub elapsed: Duration,
}

/// Records how long each wrapped handler takes.
///
/// Clones share the same timing list.
#[derive(Clone, Debug, Default)]
pub struct ProfilingMiddleware {
    timings: Arc<Mutex<Vec<WidgetTiming>>>,
}

impl ProfilingMiddleware {
    /// Middleware with an empty timing list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timings recorded so far, in completion order.
    pub fn timings(&self) -> Vec<WidgetTiming> {
        self.timings.lock().clone()
    }

    /// Clear recorded timings.
    pub fn reset(&self) {
        self.timings.lock().clear();
    }
}

impl Middleware for ProfilingMiddleware {
    fn wrap(&self, next: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(Profiled {
            next,
            timings: Arc::clone(&self.timings),
        })
    }
}

struct Profiled {
    next: Arc<dyn Handler>,
    timings: Arc<Mutex<Vec<WidgetTiming>>>,
}

impl Handler for Profiled {
    fn handle(&self, resp: &mut Response, req: &Request<'_>) {
        let start = Instant::now();
        self.next.handle(resp, req);
        let elapsed = start.elapsed();
        tracing::debug!(alias = req.alias, ?elapsed, "widget handler finished");
        self.timings.lock().push(WidgetTiming {
            alias: req.alias.to_string(),
            widget_type: req.widget_type.to_string(),
            elapsed,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/handler/middleware.rs"]
mod tests;
