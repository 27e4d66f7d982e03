use kurbo::{Ellipse, Point, Rect, Shape as _};

use crate::foundation::core::{Offset, PixelRect};
use crate::foundation::error::{TsgError, TsgResult};
use crate::geometry::location::{CellRef, MaskShape, parse_grid_range};
use crate::geometry::{GeometryFragment, GeometryResolver, LocationSpec, Placement};
use crate::render::canvas::{Mask, Rgba8Canvas};

/// Uniform `rows x columns` grid laid over a `width x height` canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    width: u32,
    height: u32,
    rows: u32,
    columns: u32,
}

impl GridGeometry {
    /// Create a grid; all dimensions must be non-zero.
    pub fn new(width: u32, height: u32, rows: u32, columns: u32) -> TsgResult<Self> {
        if width == 0 || height == 0 {
            return Err(TsgError::validation("grid canvas width/height must be > 0"));
        }
        if rows == 0 || columns == 0 {
            return Err(TsgError::validation("grid rows/columns must be > 0"));
        }
        Ok(Self {
            width,
            height,
            rows,
            columns,
        })
    }

    fn canvas_rect(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    /// Pixel rectangle spanning cells `a..=b`.
    fn cells_rect(&self, a: CellRef, b: CellRef) -> PixelRect {
        let cw = f64::from(self.width) / f64::from(self.columns);
        let ch = f64::from(self.height) / f64::from(self.rows);
        let r = Rect::new(
            f64::from(a.col) * cw,
            f64::from(a.row) * ch,
            f64::from(b.col + 1) * cw,
            f64::from(b.row + 1) * ch,
        )
        .round();
        PixelRect::new(
            r.x0 as i32,
            r.y0 as i32,
            (r.x1 - r.x0).max(0.0) as u32,
            (r.y1 - r.y0).max(0.0) as u32,
        )
    }

    fn area_of(&self, loc: &LocationSpec) -> TsgResult<PixelRect> {
        match loc {
            LocationSpec::Grid(s) => {
                let (a, b) = parse_grid_range(s).map_err(TsgError::geometry)?;
                if b.col >= self.columns || b.row >= self.rows {
                    return Err(TsgError::geometry(format!(
                        "location '{s}' is outside the {}x{} grid",
                        self.columns, self.rows
                    )));
                }
                Ok(self.cells_rect(a, b))
            }
            LocationSpec::Pixels { x, y, w, h, .. } => {
                let r = PixelRect::new(*x, *y, *w, *h);
                if r.is_empty() {
                    return Err(TsgError::geometry(format!("location {loc} has zero area")));
                }
                if r.intersect(self.canvas_rect()) != Some(r) {
                    return Err(TsgError::geometry(format!(
                        "location {loc} is outside the {}x{} canvas",
                        self.width, self.height
                    )));
                }
                Ok(r)
            }
        }
    }
}

impl GeometryResolver for GridGeometry {
    fn resolve_location(&self, loc: &LocationSpec) -> TsgResult<Placement> {
        let area = self.area_of(loc)?;
        let mask = match loc {
            LocationSpec::Pixels {
                mask: Some(MaskShape::Ellipse),
                ..
            } => Some(ellipse_mask(area.width, area.height)),
            _ => None,
        };
        Ok(Placement {
            canvas: Rgba8Canvas::new(area.width, area.height),
            offset: Offset::new(area.x, area.y),
            mask,
        })
    }

    fn resolve_geometry(&self, loc: &LocationSpec) -> TsgResult<Vec<GeometryFragment>> {
        let area = self.area_of(loc)?;
        let origin = Offset::new(-area.x, -area.y);
        let mut out = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.columns {
                let cell = CellRef { col, row };
                let rect = self.cells_rect(cell, cell);
                if let Some(clipped) = rect.intersect(area) {
                    out.push(GeometryFragment {
                        id: cell.label(),
                        area: clipped.translate(origin),
                    });
                }
            }
        }
        Ok(out)
    }
}

fn ellipse_mask(width: u32, height: u32) -> Mask {
    let ellipse = Ellipse::from_rect(Rect::new(0.0, 0.0, f64::from(width), f64::from(height)));
    Mask::from_fn(width, height, |x, y| {
        let centre = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        if ellipse.contains(centre) { 255 } else { 0 }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/grid.rs"]
mod tests;
