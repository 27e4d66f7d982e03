use crate::foundation::math::mix64;
use crate::handler::request::{Handler, Request, Response};
use crate::handler::status::StatusCode;
use crate::schema::{FieldKind, WidgetSchema};

/// Greyscale white noise with levels in `min..=max`.
///
/// Deterministic: the same seed and widget size always give the same pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Noise {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub min: u8,
    #[serde(default = "full_level")]
    pub max: u8,
}

fn full_level() -> u8 {
    255
}

impl Noise {
    /// Grey level of pixel `(x, y)` in a widget `width` pixels wide.
    pub fn level(&self, x: u32, y: u32, width: u32) -> u8 {
        let span = u64::from(self.max.saturating_sub(self.min)) + 1;
        let idx = u64::from(y) * u64::from(width) + u64::from(x);
        let h = mix64(self.seed ^ mix64(idx));
        self.min + (h % span) as u8
    }
}

impl Handler for Noise {
    fn handle(&self, resp: &mut Response, _req: &Request<'_>) {
        if self.min > self.max {
            resp.write(
                StatusCode::BadRequest,
                format!("noise min {} is above max {}", self.min, self.max),
            );
            return;
        }
        let canvas = resp.canvas_mut();
        let (w, h) = (canvas.width(), canvas.height());
        for y in 0..h {
            for x in 0..w {
                let v = self.level(x, y, w);
                canvas.put_pixel(x, y, [v, v, v, 255]);
            }
        }
    }
}

pub(crate) fn schema() -> WidgetSchema {
    WidgetSchema::new()
        .optional("seed", FieldKind::Integer)
        .optional("min", FieldKind::Integer)
        .optional("max", FieldKind::Integer)
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/noise.rs"]
mod tests;
