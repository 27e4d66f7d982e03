use serde_json::Value;

use crate::assets::search::AssetSearcher;
use crate::config::lines::SourceLocation;
use crate::foundation::core::{ColourSpace, Offset};
use crate::foundation::error::TsgResult;
use crate::geometry::GeometryFragment;
use crate::handler::status::StatusCode;
use crate::render::canvas::Rgba8Canvas;
use crate::scheduler::metadata::MetadataStore;

/// Everything a widget handler may read about the invocation.
///
/// Built fresh for each pipeline; borrows frame-level state for the duration of the call.
pub struct Request<'a> {
    /// Registered widget type, e.g. `"builtin.ramp"`.
    pub widget_type: &'a str,
    /// Widget identity within the frame.
    pub alias: &'a str,
    /// Draw priority; lower values are composited first.
    pub z: usize,
    /// Assigned width of the scratch canvas.
    pub width: u32,
    /// Assigned height of the scratch canvas.
    pub height: u32,
    /// Placement of the scratch canvas on the frame.
    pub offset: Offset,
    /// Grid cells covered by the widget, relative to its scratch canvas.
    pub fragments: &'a [GeometryFragment],
    /// Declared colour space of the widget.
    pub colour_space: &'a ColourSpace,
    /// Parsed payload (`Value::Null` when it could not be parsed).
    pub props: &'a Value,
    /// Payload bytes as declared.
    pub raw: &'a [u8],
    /// Declaration site, for diagnostics.
    pub source: Option<&'a SourceLocation>,
    metadata: &'a MetadataStore,
    searcher: &'a dyn AssetSearcher,
}

/// Frame-scoped services a request gives access to.
#[derive(Clone, Copy)]
pub(crate) struct RequestServices<'a> {
    pub(crate) metadata: &'a MetadataStore,
    pub(crate) searcher: &'a dyn AssetSearcher,
}

/// Per-widget fields of a request.
pub(crate) struct RequestParts<'a> {
    pub(crate) widget_type: &'a str,
    pub(crate) alias: &'a str,
    pub(crate) z: usize,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) offset: Offset,
    pub(crate) fragments: &'a [GeometryFragment],
    pub(crate) colour_space: &'a ColourSpace,
    pub(crate) props: &'a Value,
    pub(crate) raw: &'a [u8],
    pub(crate) source: Option<&'a SourceLocation>,
}

impl<'a> Request<'a> {
    pub(crate) fn new(parts: RequestParts<'a>, services: RequestServices<'a>) -> Self {
        Self {
            widget_type: parts.widget_type,
            alias: parts.alias,
            z: parts.z,
            width: parts.width,
            height: parts.height,
            offset: parts.offset,
            fragments: parts.fragments,
            colour_space: parts.colour_space,
            props: parts.props,
            raw: parts.raw,
            source: parts.source,
            metadata: services.metadata,
            searcher: services.searcher,
        }
    }

    /// Look up `dot_path` in another widget's parsed configuration.
    pub fn metadata(&self, identity: &str, dot_path: &str) -> Option<Value> {
        self.metadata.get(identity, dot_path)
    }

    /// Fetch an external resource referenced by the widget.
    pub fn search(&self, uri: &str) -> TsgResult<Vec<u8>> {
        self.searcher.search(uri)
    }
}

/// Status sink and private scratch canvas for one invocation.
#[derive(Debug)]
pub struct Response {
    status: Option<StatusCode>,
    message: String,
    canvas: Rgba8Canvas,
}

impl Response {
    /// Response drawing into `canvas`.
    pub fn new(canvas: Rgba8Canvas) -> Self {
        Self {
            status: None,
            message: String::new(),
            canvas,
        }
    }

    /// Record the outcome; a later write replaces an earlier one.
    pub fn write(&mut self, status: StatusCode, message: impl Into<String>) {
        self.status = Some(status);
        self.message = message.into();
    }

    /// Recorded status; a handler that returns without writing one succeeded.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::Success)
    }

    /// Return `true` once a status has been written.
    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }

    /// Message written with the status.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Scratch canvas.
    pub fn canvas(&self) -> &Rgba8Canvas {
        &self.canvas
    }

    /// Mutable scratch canvas.
    pub fn canvas_mut(&mut self) -> &mut Rgba8Canvas {
        &mut self.canvas
    }

    pub(crate) fn into_canvas(self) -> Rgba8Canvas {
        self.canvas
    }
}

/// Widget business logic: draws into the response canvas and reports a status.
pub trait Handler: Send + Sync {
    /// Run the widget.
    fn handle(&self, resp: &mut Response, req: &Request<'_>);
}

impl<F> Handler for F
where
    F: Fn(&mut Response, &Request<'_>) + Send + Sync,
{
    fn handle(&self, resp: &mut Response, req: &Request<'_>) {
        self(resp, req)
    }
}

/// Terminal handler that only writes a fixed status.
///
/// Stands in for widgets that cannot run (unknown type, bad payload or location) and for
/// placeholder widgets.
#[derive(Clone, Debug)]
pub(crate) struct StatusHandler {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl StatusHandler {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl Handler for StatusHandler {
    fn handle(&self, resp: &mut Response, _req: &Request<'_>) {
        resp.write(self.status, self.message.clone());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/handler/request.rs"]
mod tests;
