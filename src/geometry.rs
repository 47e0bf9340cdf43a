//! Orientation handling and the proportional scaling of a device profile to a
//! measured screenshot.
//!
//! Profiles are authored in portrait. A landscape screenshot resolves to the
//! same profile as the portrait capture of the same device; only the rendering
//! geometry is rotated.

use crate::registry::DeviceProfile;

/// Resolved geometry for one screenshot, in render orientation. Every field is
/// already swapped/rotated for landscape where that applies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    /// Proportional scale applied to the profile's native measurements.
    pub ratio: f64,
    pub landscape: bool,
    /// Output canvas size.
    pub frame_width: u32,
    pub frame_height: u32,
    /// Active screen area size.
    pub inner_width: u32,
    pub inner_height: u32,
    /// Placement of the inner area within the output canvas.
    pub inner_left: u32,
    pub inner_top: u32,
    /// Side of the square corner notch, 0 disables masking.
    pub corner_cut: u32,
    /// Width the portrait bezel artwork is resized to, before any rotation.
    pub bezel_target_width: u32,
}

pub fn is_landscape(width: u32, height: u32) -> bool {
    width > height
}

/// Swap measured dimensions into portrait order, the order registry keys use.
pub fn portrait_dims(width: u32, height: u32) -> (u32, u32) {
    if is_landscape(width, height) {
        (height, width)
    } else {
        (width, height)
    }
}

/// Scale factor adapting the profile's native measurements to a screenshot of
/// (portrait-normalized) width `abs_width`.
///
/// Exactly 1 when the widths already agree, otherwise `(inner - abs) / inner`
/// (one minus the relative shrink), not the naive `abs / inner` division. A
/// profile narrower than the screenshot produces a negative ratio and a
/// degenerate result downstream, which is intentionally not guarded here.
pub fn scale_ratio(profile: &DeviceProfile, abs_width: u32) -> f64 {
    if profile.inner_width == abs_width {
        1.0
    } else {
        (f64::from(profile.inner_width) - f64::from(abs_width)) / f64::from(profile.inner_width)
    }
}

/// Resolve the full render geometry for a screenshot measured at
/// `screen_width x screen_height`.
pub fn resolve(profile: &DeviceProfile, screen_width: u32, screen_height: u32) -> FrameGeometry {
    let landscape = is_landscape(screen_width, screen_height);
    let (abs_width, _abs_height) = portrait_dims(screen_width, screen_height);

    let ratio = scale_ratio(profile, abs_width);

    // Portrait-scale quantities. The inner width is pinned to the screenshot's
    // own measured width; everything else scales by ratio.
    let inner_w = f64::from(abs_width);
    let inner_h = f64::from(profile.inner_height) * ratio;
    let frame_w = f64::from(profile.frame_width) * ratio;
    let frame_h = f64::from(profile.frame_height) * ratio;
    let left = f64::from(profile.inner_left) * ratio;
    let top = f64::from(profile.inner_top) * ratio;
    let corner = f64::from(profile.corner_cut_size) * ratio;

    if landscape {
        // 90 degree rotation of the placement coordinate system, not merely
        // swapped dimensions.
        FrameGeometry {
            ratio,
            landscape,
            frame_width: px(frame_h),
            frame_height: px(frame_w),
            inner_width: px(inner_h),
            inner_height: px(inner_w),
            inner_left: px(top),
            inner_top: px(frame_w - inner_w - left),
            corner_cut: px(corner),
            bezel_target_width: px(frame_w),
        }
    } else {
        FrameGeometry {
            ratio,
            landscape,
            frame_width: px(frame_w),
            frame_height: px(frame_h),
            inner_width: px(inner_w),
            inner_height: px(inner_h),
            inner_left: px(left),
            inner_top: px(top),
            corner_cut: px(corner),
            bezel_target_width: px(frame_w),
        }
    }
}

// Negative intermediates (degenerate ratio) saturate to 0 here.
fn px(v: f64) -> u32 {
    v.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DeviceProfile;

    fn profile() -> DeviceProfile {
        DeviceProfile {
            frame_width: 1480,
            frame_height: 2740,
            screenshot_width: 1080,
            screenshot_height: 2340,
            inner_left: 200,
            inner_top: 200,
            inner_width: 1080,
            inner_height: 2340,
            corner_cut_size: 0,
            asset_path: "android/pixel_5.png".to_string(),
            inch: 6.0,
            devices: vec!["pixel_5".to_string()],
        }
    }

    #[test]
    fn equal_widths_give_exact_identity() {
        let p = profile();
        let geo = resolve(&p, 1080, 2340);
        assert_eq!(geo.ratio, 1.0);
        assert!(!geo.landscape);
        assert_eq!((geo.frame_width, geo.frame_height), (1480, 2740));
        assert_eq!((geo.inner_width, geo.inner_height), (1080, 2340));
        assert_eq!((geo.inner_left, geo.inner_top), (200, 200));
        assert_eq!(geo.corner_cut, 0);
        assert_eq!(geo.bezel_target_width, 1480);
    }

    #[test]
    fn narrower_screenshot_scales_proportionally() {
        let mut p = profile();
        p.inner_width = 1000;
        p.inner_height = 2000;
        p.corner_cut_size = 100;
        let geo = resolve(&p, 900, 1800);
        assert!((geo.ratio - 0.1).abs() < 1e-12);
        assert_eq!(geo.inner_width, 900);
        assert_eq!(geo.inner_height, 200); // 2000 * 0.1
        assert_eq!(geo.corner_cut, 10);
        assert_eq!(geo.frame_width, 148); // 1480 * 0.1
    }

    #[test]
    fn landscape_normalizes_to_portrait_key_dimensions() {
        assert_eq!(portrait_dims(2340, 1080), (1080, 2340));
        assert_eq!(portrait_dims(1080, 2340), (1080, 2340));
        assert_eq!(portrait_dims(500, 500), (500, 500));
    }

    #[test]
    fn landscape_rotates_placement() {
        let p = profile();
        let geo = resolve(&p, 2340, 1080);
        assert!(geo.landscape);
        assert_eq!((geo.frame_width, geo.frame_height), (2740, 1480));
        assert_eq!((geo.inner_width, geo.inner_height), (2340, 1080));
        // left <- top, top <- frame_w - inner_w - left, all at portrait scale
        assert_eq!(geo.inner_left, 200);
        assert_eq!(geo.inner_top, 1480 - 1080 - 200);
        // the bezel raster itself is resized at portrait scale
        assert_eq!(geo.bezel_target_width, 1480);
    }

    #[test]
    fn degenerate_ratio_saturates_to_empty_geometry() {
        let mut p = profile();
        p.inner_width = 500; // narrower than the screenshot
        let geo = resolve(&p, 1080, 2340);
        assert!(geo.ratio < 0.0);
        assert_eq!(geo.frame_width, 0);
        assert_eq!(geo.frame_height, 0);
    }
}
