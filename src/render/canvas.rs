use crate::foundation::core::{Offset, PixelRect};
use crate::foundation::error::{TsgError, TsgResult};

/// Premultiplied RGBA8 pixel buffer, row-major, 4 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rgba8Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Rgba8Canvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Canvas with every pixel set to `premul_rgba`.
    pub fn filled(width: u32, height: u32, premul_rgba: [u8; 4]) -> Self {
        let px = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(px * 4);
        for _ in 0..px {
            data.extend_from_slice(&premul_rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing premultiplied buffer.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> TsgResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| TsgError::render("canvas buffer size overflow"))?;
        if data.len() != expected {
            return Err(TsgError::render(format!(
                "canvas buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rectangle covering the whole canvas at the origin.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::at(Offset::default(), self.width, self.height)
    }

    /// Raw premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw premultiplied bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the canvas and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Pixel at `(x, y)`, `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrite pixel `(x, y)`; writes outside the canvas are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, premul_rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&premul_rgba);
    }

    /// Set every pixel to `premul_rgba`.
    pub fn fill(&mut self, premul_rgba: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&premul_rgba);
        }
    }

    /// Convert to straight-alpha RGBA8 bytes for encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let a = px[3];
            if a == 0 || a == 255 {
                out.extend_from_slice(px);
                continue;
            }
            let un = |c: u8| -> u8 {
                ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8
            };
            out.extend_from_slice(&[un(px[0]), un(px[1]), un(px[2]), a]);
        }
        out
    }
}

/// 8-bit coverage mask for non-rectangular widget areas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl Mask {
    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut alpha = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                alpha.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            alpha,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at `(x, y)`; pixels outside the mask are fully masked out.
    pub fn coverage(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return 0;
        }
        self.alpha[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
