use super::*;

fn blend_at(dst: &mut Rgba8Canvas, src: &Rgba8Canvas, at: Offset, mask: Option<&Mask>) {
    OverCompositor
        .blend(
            dst,
            PixelRect::at(at, src.width(), src.height()),
            src,
            Offset::default(),
            mask,
            Offset::default(),
            BlendOp::Over,
        )
        .unwrap();
}

#[test]
fn blend_writes_only_inside_dest_rect() {
    let mut dst = Rgba8Canvas::filled(8, 8, [0, 0, 0, 255]);
    let src = Rgba8Canvas::filled(2, 3, [255, 255, 255, 255]);
    blend_at(&mut dst, &src, Offset::new(4, 1), None);

    for y in 0..8 {
        for x in 0..8 {
            let inside = (4..6).contains(&x) && (1..4).contains(&y);
            let expected = if inside {
                [255, 255, 255, 255]
            } else {
                [0, 0, 0, 255]
            };
            assert_eq!(dst.pixel(x, y), Some(expected), "pixel ({x},{y})");
        }
    }
}

#[test]
fn blend_clips_negative_and_overflowing_placement() {
    let mut dst = Rgba8Canvas::filled(4, 4, [0, 0, 0, 255]);
    let src = Rgba8Canvas::filled(4, 4, [10, 20, 30, 255]);
    blend_at(&mut dst, &src, Offset::new(-2, 2), None);
    assert_eq!(dst.pixel(0, 2), Some([10, 20, 30, 255]));
    assert_eq!(dst.pixel(1, 3), Some([10, 20, 30, 255]));
    assert_eq!(dst.pixel(2, 2), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 255]));
}

#[test]
fn mask_limits_coverage() {
    let mut dst = Rgba8Canvas::filled(2, 1, [0, 0, 0, 255]);
    let src = Rgba8Canvas::filled(2, 1, [255, 255, 255, 255]);
    let mask = Mask::from_fn(2, 1, |x, _| if x == 0 { 255 } else { 0 });
    blend_at(&mut dst, &src, Offset::default(), Some(&mask));
    assert_eq!(dst.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(1, 0), Some([0, 0, 0, 255]));
}

#[test]
fn replace_ignores_destination() {
    let mut dst = Rgba8Canvas::filled(1, 1, [255, 0, 0, 255]);
    let src = Rgba8Canvas::filled(1, 1, [0, 0, 0, 0]);
    OverCompositor
        .blend(
            &mut dst,
            PixelRect::new(0, 0, 1, 1),
            &src,
            Offset::default(),
            None,
            Offset::default(),
            BlendOp::Replace,
        )
        .unwrap();
    assert_eq!(dst.pixel(0, 0), Some([0, 0, 0, 0]));
}
