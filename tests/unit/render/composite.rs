use super::*;

#[test]
fn over_coverage_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 255), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 255), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 255), src);
}

#[test]
fn over_is_order_sensitive_for_translucent_sources() {
    let base = [0, 0, 0, 255];
    let red = [128, 0, 0, 128];
    let blue = [0, 0, 128, 128];
    let a = over(over(base, red, 255), blue, 255);
    let b = over(over(base, blue, 255), red, 255);
    assert_ne!(a, b);
}

#[test]
fn replace_scales_by_coverage() {
    assert_eq!(replace([200, 100, 50, 255], 255), [200, 100, 50, 255]);
    assert_eq!(replace([200, 100, 50, 255], 0), [0, 0, 0, 0]);
}
