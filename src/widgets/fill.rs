use crate::foundation::core::Rgba8;
use crate::handler::request::{Handler, Request, Response};
use crate::schema::{FieldKind, WidgetSchema};

/// Solid colour over the whole widget area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Fill {
    pub colour: Rgba8,
}

impl Handler for Fill {
    fn handle(&self, resp: &mut Response, _req: &Request<'_>) {
        resp.canvas_mut().fill(self.colour.premultiplied());
    }
}

pub(crate) fn schema() -> WidgetSchema {
    WidgetSchema::new().required("colour", FieldKind::Colour)
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/fill.rs"]
mod tests;
