//! The per-screenshot framing operation and the batch runner around it.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::RgbaImage;

use crate::assets::{FrameCache, decode::write_png, load_image};
use crate::composite;
use crate::error::{FramefitError, FramefitResult};
use crate::geometry;
use crate::geometry::FrameGeometry;
use crate::registry::Registry;

/// One successfully framed screenshot.
#[derive(Clone, Debug)]
pub struct FramedOutput {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Outcome of a batch run. Per-item failures are counted, never fatal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub framed: usize,
    pub skipped: usize,
}

/// Three-stage compositing pipeline: corner mask, screenshot cutout, bezel
/// overlay. `screenshot` and `bezel` are premultiplied RGBA8; the bezel is at
/// portrait scale and gets rotated here for landscape geometry.
pub fn compose(screenshot: &RgbaImage, bezel: &RgbaImage, geo: &FrameGeometry) -> RgbaImage {
    // Stage 1: corner mask squares on a transparent inner-area canvas.
    let mut inner = composite::blank(geo.inner_width, geo.inner_height);
    if geo.corner_cut > 0 {
        let right = geo.inner_width.saturating_sub(geo.corner_cut);
        let bottom = geo.inner_height.saturating_sub(geo.corner_cut);
        composite::fill_rect(&mut inner, 0, 0, geo.corner_cut, composite::WHITE);
        composite::fill_rect(&mut inner, right, 0, geo.corner_cut, composite::WHITE);
        composite::fill_rect(&mut inner, 0, bottom, geo.corner_cut, composite::WHITE);
        composite::fill_rect(&mut inner, right, bottom, geo.corner_cut, composite::WHITE);
    }

    // Stage 2: source-out blend punches the mask squares out of the
    // screenshot. With no mask this is a plain screenshot composite.
    composite::out_at(&mut inner, screenshot, 0, 0);

    // Stage 3: place the cutout, then the bezel artwork fully on top. The
    // artwork's transparent inner region reveals the screenshot beneath it.
    let mut frame = composite::blank(geo.frame_width, geo.frame_height);
    composite::over_at(&mut frame, &inner, geo.inner_left, geo.inner_top);
    if geo.landscape {
        let rotated = image::imageops::rotate270(bezel);
        composite::over_at(&mut frame, &rotated, 0, 0);
    } else {
        composite::over_at(&mut frame, bezel, 0, 0);
    }
    frame
}

/// Frame a single screenshot and write the result to `dest_dir`.
#[tracing::instrument(skip(registry, cache, screen_path, dest_dir), fields(screen = %screen_path.display()))]
pub fn frame_one(
    registry: &Registry,
    cache: &mut FrameCache,
    platform: &str,
    screen_path: &Path,
    dest_dir: &Path,
) -> FramefitResult<FramedOutput> {
    let screenshot = load_image(screen_path)?;
    let (width, height) = screenshot.dimensions();
    let (key_w, key_h) = geometry::portrait_dims(width, height);

    let profile = registry
        .lookup(platform, key_w, key_h)
        .ok_or_else(|| FramefitError::NoProfile {
            platform: platform.to_string(),
            width: key_w,
            height: key_h,
        })?;

    let geo = geometry::resolve(profile, width, height);
    let bezel = cache.get_scaled(&profile.asset_path, geo.bezel_target_width)?;

    let framed = compose(&screenshot, &bezel, &geo);
    let out_path = dest_dir.join(framed_name(screen_path));
    write_png(&out_path, &framed)?;

    Ok(FramedOutput {
        path: out_path,
        width: framed.width(),
        height: framed.height(),
    })
}

/// Frame every screenshot in `inputs`, one at a time. A failing item is
/// logged and skipped; the rest of the batch still runs.
pub fn run_batch(
    registry: &Registry,
    cache: &mut FrameCache,
    platform: &str,
    inputs: &[PathBuf],
    dest_dir: &Path,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for input in inputs {
        match frame_one(registry, cache, platform, input, dest_dir) {
            Ok(output) => {
                tracing::info!(
                    out = %output.path.display(),
                    width = output.width,
                    height = output.height,
                    "framed {}",
                    input.display()
                );
                summary.framed += 1;
            }
            Err(err) => {
                tracing::warn!("skipping {}: {err}", input.display());
                summary.skipped += 1;
            }
        }
    }
    tracing::info!(
        framed = summary.framed,
        skipped = summary.skipped,
        "batch complete"
    );
    summary
}

/// Resolve a run's input argument: a single file as-is, a directory as every
/// `.png` file inside it, in name order.
pub fn collect_inputs(path: &Path) -> FramefitResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(FramefitError::config(format!(
            "'{}' does not exist",
            path.display()
        )));
    }

    let mut inputs = Vec::new();
    for entry in
        std::fs::read_dir(path).with_context(|| format!("read dir '{}'", path.display()))?
    {
        let entry = entry.with_context(|| format!("read dir '{}'", path.display()))?;
        let p = entry.path();
        let is_png = p
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if p.is_file() && is_png {
            inputs.push(p);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// `shot.png -> shot_framed.png`; the input's own extension is kept.
fn framed_name(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screenshot".to_string());
    match input.extension() {
        Some(ext) => PathBuf::from(format!("{stem}_framed.{}", ext.to_string_lossy())),
        None => PathBuf::from(format!("{stem}_framed")),
    }
}
