use super::*;

#[test]
fn overlap_requires_shared_pixels() {
    let a = PixelRect::new(0, 0, 10, 10);
    let b = PixelRect::new(10, 0, 10, 10);
    let c = PixelRect::new(9, 9, 5, 5);
    assert!(!a.overlaps(b));
    assert!(!b.overlaps(a));
    assert!(a.overlaps(c));
    assert!(c.overlaps(a));
}

#[test]
fn empty_rect_never_overlaps() {
    let full = PixelRect::new(0, 0, 100, 100);
    assert!(!PixelRect::empty().overlaps(full));
    assert!(!PixelRect::new(5, 5, 0, 40).overlaps(full));
}

#[test]
fn intersect_clips_to_shared_area() {
    let a = PixelRect::new(-4, -4, 10, 10);
    let b = PixelRect::new(0, 0, 20, 20);
    assert_eq!(a.intersect(b), Some(PixelRect::new(0, 0, 6, 6)));
    assert_eq!(a.intersect(PixelRect::new(50, 50, 1, 1)), None);
}

#[test]
fn translate_moves_origin_only() {
    let r = PixelRect::new(1, 2, 3, 4).translate(Offset::new(10, -2));
    assert_eq!(r, PixelRect::new(11, 0, 3, 4));
}

#[test]
fn colour_parses_three_or_four_components() {
    let c: Rgba8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgba8::opaque(1, 2, 3));
    let c: Rgba8 = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(c, Rgba8::new(1, 2, 3, 4));
    assert!(serde_json::from_str::<Rgba8>("[1, 2]").is_err());
}

#[test]
fn premultiply_scales_by_alpha() {
    assert_eq!(Rgba8::opaque(200, 100, 0).premultiplied(), [200, 100, 0, 255]);
    assert_eq!(Rgba8::new(255, 255, 255, 0).premultiplied(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::new(255, 0, 0, 128).premultiplied(), [128, 0, 0, 128]);
}
