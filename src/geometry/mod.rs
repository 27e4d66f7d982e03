//! Location resolution: turns a widget's declared location into a scratch canvas, placement
//! offset, optional mask and the grid fragments it covers.

pub(crate) mod grid;
pub(crate) mod location;

use crate::foundation::core::{Offset, PixelRect};
use crate::foundation::error::TsgResult;
use crate::render::canvas::{Mask, Rgba8Canvas};

pub use location::{LocationSpec, MaskShape};

/// Private drawing target for one widget plus where it lands on the frame.
#[derive(Clone, Debug)]
pub struct Placement {
    /// Transparent scratch canvas sized to the widget's area.
    pub canvas: Rgba8Canvas,
    /// Top-left of the scratch canvas on the shared canvas.
    pub offset: Offset,
    /// Coverage mask for non-rectangular areas.
    pub mask: Option<Mask>,
}

impl Placement {
    /// Area on the shared canvas this placement writes to.
    pub fn area(&self) -> PixelRect {
        PixelRect::at(self.offset, self.canvas.width(), self.canvas.height())
    }
}

/// A named piece of geometry inside a widget's area, relative to its scratch canvas.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GeometryFragment {
    /// Grid cell identifier, e.g. `"B2"`.
    pub id: String,
    /// Cell area clipped to the widget, in scratch-canvas coordinates.
    pub area: PixelRect,
}

/// Resolves locations against a frame's layout.
pub trait GeometryResolver: Send + Sync {
    /// Allocate the scratch canvas for `loc` and compute its placement.
    fn resolve_location(&self, loc: &LocationSpec) -> TsgResult<Placement>;

    /// Grid fragments covered by `loc`.
    fn resolve_geometry(&self, loc: &LocationSpec) -> TsgResult<Vec<GeometryFragment>>;
}

pub use grid::GridGeometry;
