use crate::foundation::core::{Offset, PixelRect};
use crate::foundation::error::TsgResult;
use crate::render::canvas::{Mask, Rgba8Canvas};
use crate::render::composite::{over, replace};

/// How source pixels combine with the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendOp {
    /// Premultiplied source-over.
    #[default]
    Over,
    /// Destination replaced by the (masked) source.
    Replace,
}

/// Blends one image onto another.
///
/// An implementation must only write pixels inside `dest_rect` (clipped to `dst`); the frame
/// scheduler relies on this to let widgets with disjoint areas composite out of order.
pub trait Compositor: Send + Sync {
    /// Blend `src` onto `dst`.
    ///
    /// Destination pixel `(dest_rect.x + i, dest_rect.y + j)` reads source pixel
    /// `(src_offset.x + i, src_offset.y + j)` and mask coverage at
    /// `(mask_offset.x + i, mask_offset.y + j)`.
    #[allow(clippy::too_many_arguments)]
    fn blend(
        &self,
        dst: &mut Rgba8Canvas,
        dest_rect: PixelRect,
        src: &Rgba8Canvas,
        src_offset: Offset,
        mask: Option<&Mask>,
        mask_offset: Offset,
        op: BlendOp,
    ) -> TsgResult<()>;
}

/// CPU compositor over premultiplied RGBA8.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverCompositor;

impl Compositor for OverCompositor {
    fn blend(
        &self,
        dst: &mut Rgba8Canvas,
        dest_rect: PixelRect,
        src: &Rgba8Canvas,
        src_offset: Offset,
        mask: Option<&Mask>,
        mask_offset: Offset,
        op: BlendOp,
    ) -> TsgResult<()> {
        let Some(clip) = dest_rect.intersect(dst.bounds()) else {
            return Ok(());
        };

        for dy in clip.y..(clip.y + clip.height as i32) {
            let j = i64::from(dy) - i64::from(dest_rect.y);
            let sy = j + i64::from(src_offset.y);
            if sy < 0 || sy >= i64::from(src.height()) {
                continue;
            }
            for dx in clip.x..(clip.x + clip.width as i32) {
                let i = i64::from(dx) - i64::from(dest_rect.x);
                let sx = i + i64::from(src_offset.x);
                if sx < 0 || sx >= i64::from(src.width()) {
                    continue;
                }
                let coverage = match mask {
                    Some(m) => m.coverage(
                        i + i64::from(mask_offset.x),
                        j + i64::from(mask_offset.y),
                    ),
                    None => 255,
                };
                let Some(s) = src.pixel(sx as u32, sy as u32) else {
                    continue;
                };
                let (x, y) = (dx as u32, dy as u32);
                let out = match op {
                    BlendOp::Over => match dst.pixel(x, y) {
                        Some(d) => over(d, s, coverage),
                        None => continue,
                    },
                    BlendOp::Replace => replace(s, coverage),
                };
                dst.put_pixel(x, y, out);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
