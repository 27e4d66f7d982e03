use crate::foundation::core::Rgba8;
use crate::foundation::math::lerp_u8;
use crate::handler::request::{Handler, Request, Response};
use crate::handler::status::StatusCode;
use crate::schema::{FieldKind, WidgetSchema};

/// Axis a ramp runs along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RampDirection {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// Linear gradient from `from` to `to`, optionally quantised into `steps` flat bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Ramp {
    pub from: Rgba8,
    pub to: Rgba8,
    #[serde(default)]
    pub direction: RampDirection,
    #[serde(default)]
    pub steps: Option<u32>,
}

impl Ramp {
    /// Colour at position `pos` of `len`; the first and last positions hit `from` and `to`.
    pub fn colour_at(&self, pos: u32, len: u32) -> Rgba8 {
        let t = match self.steps {
            Some(steps) if steps >= 2 => {
                let band = (u64::from(pos) * u64::from(steps) / u64::from(len.max(1)))
                    .min(u64::from(steps - 1));
                band as f64 / f64::from(steps - 1)
            }
            _ if len <= 1 => 0.0,
            _ => f64::from(pos) / f64::from(len - 1),
        };
        Rgba8::new(
            lerp_u8(self.from.r, self.to.r, t),
            lerp_u8(self.from.g, self.to.g, t),
            lerp_u8(self.from.b, self.to.b, t),
            lerp_u8(self.from.a, self.to.a, t),
        )
    }
}

impl Handler for Ramp {
    fn handle(&self, resp: &mut Response, _req: &Request<'_>) {
        if let Some(steps) = self.steps
            && steps < 2
        {
            resp.write(
                StatusCode::BadRequest,
                format!("ramp needs at least 2 steps, got {steps}"),
            );
            return;
        }

        let canvas = resp.canvas_mut();
        let (w, h) = (canvas.width(), canvas.height());
        let len = match self.direction {
            RampDirection::Horizontal => w,
            RampDirection::Vertical => h,
        };
        let colours: Vec<[u8; 4]> = (0..len)
            .map(|p| self.colour_at(p, len).premultiplied())
            .collect();
        for y in 0..h {
            for x in 0..w {
                let p = match self.direction {
                    RampDirection::Horizontal => x,
                    RampDirection::Vertical => y,
                };
                canvas.put_pixel(x, y, colours[p as usize]);
            }
        }
    }
}

pub(crate) fn schema() -> WidgetSchema {
    WidgetSchema::new()
        .required("from", FieldKind::Colour)
        .required("to", FieldKind::Colour)
        .optional("direction", FieldKind::String)
        .optional("steps", FieldKind::Integer)
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/ramp.rs"]
mod tests;
