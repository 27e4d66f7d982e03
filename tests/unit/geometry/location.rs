use super::*;

#[test]
fn parses_single_cell_and_ranges() {
    let (a, b) = parse_grid_range("B3").unwrap();
    assert_eq!(a, CellRef { col: 1, row: 3 });
    assert_eq!(a, b);

    let (a, b) = parse_grid_range("c2:a0").unwrap();
    assert_eq!(a, CellRef { col: 0, row: 0 });
    assert_eq!(b, CellRef { col: 2, row: 2 });
}

#[test]
fn multi_letter_columns() {
    let (a, _) = parse_grid_range("AA0").unwrap();
    assert_eq!(a.col, 26);
    assert_eq!(column_letters(26), "AA");
    assert_eq!(column_letters(0), "A");
    assert_eq!(column_letters(25), "Z");
    assert_eq!(column_letters(27), "AB");
}

#[test]
fn rejects_malformed_cells() {
    assert!(parse_grid_range("A").is_err());
    assert!(parse_grid_range("12").is_err());
    assert!(parse_grid_range("A-1").is_err());
    assert!(parse_grid_range("A1:").is_err());
}

#[test]
fn location_json_forms() {
    let grid: LocationSpec = serde_json::from_str(r#""A0:B1""#).unwrap();
    assert_eq!(grid, LocationSpec::Grid("A0:B1".to_string()));

    let px: LocationSpec =
        serde_json::from_str(r#"{"x": 1, "y": 2, "w": 3, "h": 4, "mask": "ellipse"}"#).unwrap();
    assert_eq!(
        px,
        LocationSpec::Pixels {
            x: 1,
            y: 2,
            w: 3,
            h: 4,
            mask: Some(MaskShape::Ellipse)
        }
    );
}
