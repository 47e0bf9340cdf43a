//! CPU compositing primitives over premultiplied RGBA8 rasters.

use image::RgbaImage;

pub type PremulRgba8 = [u8; 4];

pub const WHITE: PremulRgba8 = [255, 255, 255, 255];

/// Porter-Duff source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Porter-Duff source-out: the source survives only where the destination is
/// transparent. Blending a screenshot onto a corner-mask canvas with this
/// operator punches the mask squares out of the screenshot.
pub fn out(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if dst[3] == 0 {
        return src;
    }

    let inv = 255u16 - u16::from(dst[3]);
    let mut res = [0u8; 4];
    for i in 0..4 {
        res[i] = mul_div255(u16::from(src[i]), inv);
    }
    res
}

/// Transparent canvas of the given size.
pub fn blank(width: u32, height: u32) -> RgbaImage {
    RgbaImage::new(width, height)
}

/// Fill an axis-aligned rectangle, clipped to the canvas bounds.
pub fn fill_rect(dst: &mut RgbaImage, left: u32, top: u32, size: u32, px: PremulRgba8) {
    let x1 = left.saturating_add(size).min(dst.width());
    let y1 = top.saturating_add(size).min(dst.height());
    for y in top.min(dst.height())..y1 {
        for x in left.min(dst.width())..x1 {
            dst.put_pixel(x, y, image::Rgba(px));
        }
    }
}

/// Composite `src` over `dst` at the given offset, clipped to `dst`.
pub fn over_at(dst: &mut RgbaImage, src: &RgbaImage, left: u32, top: u32) {
    blend_at(dst, src, left, top, over);
}

/// Composite `src` onto `dst` at the given offset with the `out` operator,
/// clipped to `dst`.
pub fn out_at(dst: &mut RgbaImage, src: &RgbaImage, left: u32, top: u32) {
    blend_at(dst, src, left, top, out);
}

fn blend_at(
    dst: &mut RgbaImage,
    src: &RgbaImage,
    left: u32,
    top: u32,
    op: fn(PremulRgba8, PremulRgba8) -> PremulRgba8,
) {
    if left >= dst.width() || top >= dst.height() {
        return;
    }
    let span_w = src.width().min(dst.width() - left);
    let span_h = src.height().min(dst.height() - top);

    for y in 0..span_h {
        for x in 0..span_w {
            let s = src.get_pixel(x, y).0;
            let d = dst.get_pixel(left + x, top + y).0;
            dst.put_pixel(left + x, top + y, image::Rgba(op(d, s)));
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
