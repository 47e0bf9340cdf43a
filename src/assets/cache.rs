use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use image::imageops::FilterType;

use crate::assets::decode::load_image;
use crate::config::expand_home;
use crate::error::FramefitResult;

/// Memoization cache for scaled bezel rasters.
///
/// Several screenshots in one batch usually resolve to the same profile at the
/// same scale; each distinct `(resolved path, target width)` pair is decoded
/// and resized once and handed out as a cheap `Arc` clone afterwards. Entries
/// live for the process lifetime; the natural bound is the number of distinct
/// profiles a run touches.
pub struct FrameCache {
    root: PathBuf,
    entries: HashMap<(PathBuf, u32), Entry>,
}

struct Entry {
    raster: Arc<RgbaImage>,
    decodes: u32,
}

impl FrameCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: HashMap::new(),
        }
    }

    /// The bezel artwork at `asset_path`, resized so its width equals
    /// `target_width` (aspect ratio preserved). Decodes on first use only.
    pub fn get_scaled(&mut self, asset_path: &str, target_width: u32) -> FramefitResult<Arc<RgbaImage>> {
        let resolved = self.resolve(asset_path);
        if let Some(entry) = self.entries.get(&(resolved.clone(), target_width)) {
            return Ok(Arc::clone(&entry.raster));
        }

        let decoded = load_image(&resolved)?;
        let raster = if decoded.width() == target_width || decoded.width() == 0 {
            decoded
        } else {
            let target_height = (f64::from(decoded.height()) * f64::from(target_width)
                / f64::from(decoded.width()))
            .round() as u32;
            image::imageops::resize(&decoded, target_width, target_height, FilterType::Lanczos3)
        };

        let raster = Arc::new(raster);
        self.entries.insert(
            (resolved, target_width),
            Entry {
                raster: Arc::clone(&raster),
                decodes: 1,
            },
        );
        Ok(raster)
    }

    /// Resolve an asset path against the frames root, expanding a leading `~`.
    pub fn resolve(&self, asset_path: &str) -> PathBuf {
        let expanded = expand_home(Path::new(asset_path));
        if expanded.is_absolute() {
            expanded
        } else {
            self.root.join(expanded)
        }
    }

    /// How many times the given key has hit the decoder. Test hook.
    pub fn decode_count(&self, asset_path: &str, target_width: u32) -> u32 {
        self.entries
            .get(&(self.resolve(asset_path), target_width))
            .map_or(0, |e| e.decodes)
    }
}
