use std::fmt;

/// Where a widget is drawn.
///
/// Either a grid reference (`"A0"`, `"B1:D3"`) or an explicit pixel box.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum LocationSpec {
    /// Grid cell or inclusive cell range.
    Grid(String),
    /// Pixel box on the canvas.
    Pixels {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// Width.
        w: u32,
        /// Height.
        h: u32,
        /// Optional non-rectangular mask over the box.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mask: Option<MaskShape>,
    },
}

/// Mask shapes supported for pixel boxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskShape {
    /// Ellipse inscribed in the box.
    Ellipse,
}

impl fmt::Display for LocationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(s) => write!(f, "{s}"),
            Self::Pixels { x, y, w, h, mask } => {
                write!(f, "{w}x{h}+{x}+{y}")?;
                if let Some(m) = mask {
                    write!(f, " ({m:?})")?;
                }
                Ok(())
            }
        }
    }
}

/// Zero-based `(column, row)` of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CellRef {
    pub(crate) col: u32,
    pub(crate) row: u32,
}

impl CellRef {
    pub(crate) fn label(self) -> String {
        format!("{}{}", column_letters(self.col), self.row)
    }
}

/// Parse `"A0"` or `"A0:C2"` into an inclusive, normalised cell range.
pub(crate) fn parse_grid_range(s: &str) -> Result<(CellRef, CellRef), String> {
    let s = s.trim();
    let (a, b) = match s.split_once(':') {
        Some((a, b)) => (parse_cell(a)?, parse_cell(b)?),
        None => {
            let c = parse_cell(s)?;
            (c, c)
        }
    };
    Ok((
        CellRef {
            col: a.col.min(b.col),
            row: a.row.min(b.row),
        },
        CellRef {
            col: a.col.max(b.col),
            row: a.row.max(b.row),
        },
    ))
}

fn parse_cell(s: &str) -> Result<CellRef, String> {
    let s = s.trim();
    let split = s
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| format!("grid cell '{s}' is missing a row number"))?;
    let (letters, digits) = s.split_at(split);
    if letters.is_empty() {
        return Err(format!("grid cell '{s}' is missing a column letter"));
    }

    let mut col = 0u32;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(format!("grid cell '{s}' has invalid column '{letters}'"));
        }
        let v = u32::from(ch.to_ascii_uppercase() as u8 - b'A') + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(v))
            .ok_or_else(|| format!("grid column '{letters}' is too large"))?;
    }

    let row = digits
        .parse::<u32>()
        .map_err(|_| format!("grid cell '{s}' has invalid row '{digits}'"))?;

    Ok(CellRef { col: col - 1, row })
}

/// Bijective base-26 column name: 0 -> `A`, 25 -> `Z`, 26 -> `AA`.
pub(crate) fn column_letters(mut col: u32) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/location.rs"]
mod tests;
