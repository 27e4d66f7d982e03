use crate::foundation::core::Rgba8;
use crate::handler::request::{Handler, Request, Response};
use crate::handler::status::StatusCode;
use crate::schema::{FieldKind, WidgetSchema};

/// Fills its area with a colour read from another widget's configuration.
///
/// `source` names the other widget and `path` the dotted path to a colour inside its props,
/// e.g. `{"source": "bars", "path": "colour"}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Swatch {
    pub source: String,
    pub path: String,
}

impl Handler for Swatch {
    fn handle(&self, resp: &mut Response, req: &Request<'_>) {
        let Some(value) = req.metadata(&self.source, &self.path) else {
            resp.write(
                StatusCode::BadRequest,
                format!("widget '{}' has no value at '{}'", self.source, self.path),
            );
            return;
        };
        let colour: Rgba8 = match serde_json::from_value(value) {
            Ok(c) => c,
            Err(e) => {
                resp.write(
                    StatusCode::BadRequest,
                    format!("'{}' of widget '{}' is not a colour: {e}", self.path, self.source),
                );
                return;
            }
        };
        resp.canvas_mut().fill(colour.premultiplied());
    }
}

pub(crate) fn schema() -> WidgetSchema {
    WidgetSchema::new()
        .required("source", FieldKind::String)
        .required("path", FieldKind::String)
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/swatch.rs"]
mod tests;
