use std::fmt;

/// Integer pixel offset (top-left placement of a widget on the shared canvas).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Offset {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl Offset {
    /// Create an offset.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle `[x, x + width) x [y, y + height)`.
///
/// A rectangle with zero width or height covers no pixels and never overlaps anything.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Create a rectangle from its origin and size.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The zero-area rectangle at the origin.
    pub const fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Rectangle covering a `width x height` buffer placed at `offset`.
    pub const fn at(offset: Offset, width: u32, height: u32) -> Self {
        Self::new(offset.x, offset.y, width, height)
    }

    /// Return `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    pub fn right(self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Move the rectangle by `offset`.
    pub fn translate(self, offset: Offset) -> Self {
        Self {
            x: self.x.saturating_add(offset.x),
            y: self.y.saturating_add(offset.y),
            ..self
        }
    }

    /// Return `true` when both rectangles share at least one pixel.
    pub fn overlaps(self, other: Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        i64::from(self.x) < other.right()
            && i64::from(other.x) < self.right()
            && i64::from(self.y) < other.bottom()
            && i64::from(other.y) < self.bottom()
    }

    /// Pixel intersection of both rectangles, `None` when they do not overlap.
    pub fn intersect(self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Some(Self {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Return `true` when pixel `(px, py)` lies inside the rectangle.
    pub fn contains(self, px: i64, py: i64) -> bool {
        px >= i64::from(self.x) && px < self.right() && py >= i64::from(self.y) && py < self.bottom()
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Declared colour space of a widget or canvas.
///
/// The scheduler passes it through untouched; interpretation belongs to the compositor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColourSpace(pub String);

impl ColourSpace {
    /// Colour space name as declared in the configuration.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Straight-alpha RGBA8 colour as written in configuration documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (straight).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a colour.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Convert to premultiplied RGBA8 bytes.
    pub fn premultiplied(self) -> [u8; 4] {
        let m = |c: u8| crate::foundation::math::mul_div255_u8(u16::from(c), u16::from(self.a));
        [m(self.r), m(self.g), m(self.b), self.a]
    }
}

impl TryFrom<Vec<u8>> for Rgba8 {
    type Error = String;

    fn try_from(v: Vec<u8>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [r, g, b] => Ok(Self::opaque(*r, *g, *b)),
            [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
            _ => Err(format!("colour must have 3 or 4 components, got {}", v.len())),
        }
    }
}

impl From<Rgba8> for Vec<u8> {
    fn from(c: Rgba8) -> Self {
        vec![c.r, c.g, c.b, c.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
