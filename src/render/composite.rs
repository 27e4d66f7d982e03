use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for premultiplied RGBA8, with `src` scaled by `coverage / 255`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 0 || src[3] == 0 {
        return dst;
    }

    let cov = u16::from(coverage);
    let sa = mul_div255_u8(u16::from(src[3]), cov);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), cov);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Source scaled by `coverage / 255`, ignoring the destination.
pub fn replace(src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 255 {
        return src;
    }
    let cov = u16::from(coverage);
    [
        mul_div255_u8(u16::from(src[0]), cov),
        mul_div255_u8(u16::from(src[1]), cov),
        mul_div255_u8(u16::from(src[2]), cov),
        mul_div255_u8(u16::from(src[3]), cov),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
