use kurbo::{BezPath, Ellipse, PathEl, Rect, Shape as _};

use crate::foundation::core::Rgba8;
use crate::handler::request::{Handler, Request, Response};
use crate::handler::status::StatusCode;
use crate::schema::{FieldKind, WidgetSchema};

/// Outline of a [`Shape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Ellipse inscribed in the (inset) widget area.
    Ellipse,
    /// Rectangle covering the (inset) widget area.
    Rect,
}

/// Anti-aliased filled shape rasterised with `vello_cpu`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub colour: Rgba8,
    /// Distance in pixels between the widget edge and the shape.
    #[serde(default)]
    pub inset: f64,
}

impl Handler for Shape {
    fn handle(&self, resp: &mut Response, _req: &Request<'_>) {
        let (w, h) = (resp.canvas().width(), resp.canvas().height());
        if w == 0 || h == 0 {
            return;
        }
        let (Ok(width_u16), Ok(height_u16)) = (u16::try_from(w), u16::try_from(h)) else {
            resp.write(
                StatusCode::HandlerError,
                format!("shape area {w}x{h} exceeds the rasteriser limit"),
            );
            return;
        };
        if !self.inset.is_finite() || self.inset < 0.0 {
            resp.write(
                StatusCode::BadRequest,
                format!("shape inset must be a non-negative number, got {}", self.inset),
            );
            return;
        }

        let inset = self.inset.min(f64::from(w.min(h)) / 2.0);
        let rect = Rect::new(inset, inset, f64::from(w) - inset, f64::from(h) - inset);

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        let c = self.colour;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        let outline = match self.kind {
            ShapeKind::Rect => rect.to_path(0.1),
            ShapeKind::Ellipse => Ellipse::from_rect(rect).to_path(0.1),
        };
        ctx.fill_path(&bezpath_to_cpu(&outline));
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.render_to_pixmap(&mut pixmap);
        resp.canvas_mut()
            .data_mut()
            .copy_from_slice(pixmap.data_as_u8_slice());
    }
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3))
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn schema() -> WidgetSchema {
    WidgetSchema::new()
        .required("kind", FieldKind::String)
        .required("colour", FieldKind::Colour)
        .optional("inset", FieldKind::Number)
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/shape.rs"]
mod tests;
