use super::*;

fn grid() -> GridGeometry {
    GridGeometry::new(160, 90, 9, 16).unwrap()
}

#[test]
fn single_cell_placement() {
    let p = grid()
        .resolve_location(&LocationSpec::Grid("B1".to_string()))
        .unwrap();
    assert_eq!(p.offset, Offset::new(10, 10));
    assert_eq!(p.area(), PixelRect::new(10, 10, 10, 10));
    assert!(p.mask.is_none());
    assert!(p.canvas.data().iter().all(|&b| b == 0));
}

#[test]
fn range_placement_covers_all_cells() {
    let p = grid()
        .resolve_location(&LocationSpec::Grid("A0:P8".to_string()))
        .unwrap();
    assert_eq!(p.area(), PixelRect::new(0, 0, 160, 90));
}

#[test]
fn out_of_grid_is_an_error() {
    let err = grid()
        .resolve_location(&LocationSpec::Grid("Q0".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains("geometry error:"));
    assert!(
        grid()
            .resolve_location(&LocationSpec::Grid("A9".to_string()))
            .is_err()
    );
}

#[test]
fn pixel_box_must_fit_canvas() {
    let ok = LocationSpec::Pixels {
        x: 150,
        y: 80,
        w: 10,
        h: 10,
        mask: None,
    };
    assert!(grid().resolve_location(&ok).is_ok());

    let bad = LocationSpec::Pixels {
        x: 151,
        y: 80,
        w: 10,
        h: 10,
        mask: None,
    };
    assert!(grid().resolve_location(&bad).is_err());

    let empty = LocationSpec::Pixels {
        x: 0,
        y: 0,
        w: 0,
        h: 10,
        mask: None,
    };
    assert!(grid().resolve_location(&empty).is_err());
}

#[test]
fn ellipse_mask_covers_centre_not_corners() {
    let loc = LocationSpec::Pixels {
        x: 0,
        y: 0,
        w: 20,
        h: 10,
        mask: Some(MaskShape::Ellipse),
    };
    let p = grid().resolve_location(&loc).unwrap();
    let mask = p.mask.unwrap();
    assert_eq!(mask.coverage(10, 5), 255);
    assert_eq!(mask.coverage(0, 0), 0);
    assert_eq!(mask.coverage(19, 9), 0);
}

#[test]
fn fragments_are_relative_to_widget() {
    let frags = grid()
        .resolve_geometry(&LocationSpec::Grid("B1:C1".to_string()))
        .unwrap();
    assert_eq!(frags.len(), 2);
    assert_eq!(frags[0].id, "B1");
    assert_eq!(frags[0].area, PixelRect::new(0, 0, 10, 10));
    assert_eq!(frags[1].id, "C1");
    assert_eq!(frags[1].area, PixelRect::new(10, 0, 10, 10));
}

#[test]
fn pixel_box_fragments_clip_cells() {
    let loc = LocationSpec::Pixels {
        x: 5,
        y: 5,
        w: 10,
        h: 3,
        mask: None,
    };
    let frags = grid().resolve_geometry(&loc).unwrap();
    let ids: Vec<_> = frags.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["A0", "B0"]);
    assert_eq!(frags[0].area, PixelRect::new(0, 0, 5, 3));
    assert_eq!(frags[1].area, PixelRect::new(5, 0, 5, 3));
}
