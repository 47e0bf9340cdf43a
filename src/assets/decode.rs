use std::path::Path;

use anyhow::Context as _;
use image::RgbaImage;

use crate::error::{FramefitError, FramefitResult};

/// Decode an image into premultiplied RGBA8. All compositing in this crate
/// operates on premultiplied pixels.
pub fn decode_image(bytes: &[u8]) -> FramefitResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FramefitError::decode(format!("decode image: {e}")))?;
    let mut rgba = dyn_img.to_rgba8();
    premultiply_rgba8_in_place(&mut rgba);
    Ok(rgba)
}

/// Read and decode an image file into premultiplied RGBA8.
pub fn load_image(path: &Path) -> FramefitResult<RgbaImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Write a premultiplied RGBA8 raster as a straight-alpha PNG.
pub fn write_png(path: &Path, raster: &RgbaImage) -> FramefitResult<()> {
    let mut straight = raster.clone();
    unpremultiply_rgba8_in_place(&mut straight);
    image::save_buffer_with_format(
        path,
        straight.as_raw(),
        straight.width(),
        straight.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn premultiply_rgba8_in_place(rgba: &mut RgbaImage) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut RgbaImage) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 255 || a == 0 {
            continue;
        }
        px[0] = ((px[0] as u32 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u32 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u32 * 255 + a / 2) / a).min(255) as u8;
    }
}
