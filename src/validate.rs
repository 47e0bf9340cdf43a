//! Registry diagnostic sweep: checks every profile against its bezel asset.
//! Findings are collected, never thrown; the sweep always covers the whole
//! registry.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::expand_home;
use crate::registry::{Registry, parse_resolution_key, resolution_key};

/// Result of checking one registry entry.
#[derive(Clone, Debug)]
pub struct ValidationReport {
    pub platform: String,
    pub key: String,
    pub asset: PathBuf,
    /// Marketing names covered by the profile, from the registry metadata.
    pub devices: Vec<String>,
    /// Display diagonal in inches, 0 when the registry does not declare one.
    pub inch: f64,
    pub findings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.findings.is_empty()
    }

    fn metadata(&self) -> String {
        let mut meta = self.devices.join(", ");
        if self.inch > 0.0 {
            if !meta.is_empty() {
                meta.push_str(", ");
            }
            meta.push_str(&format!("{}\"", self.inch));
        }
        meta
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.platform, self.key)?;
        let meta = self.metadata();
        if !meta.is_empty() {
            write!(f, " [{meta}]")?;
        }
        write!(f, ": ")?;
        if self.is_ok() {
            write!(f, "OK")
        } else {
            write!(f, "{}", self.findings.join("; "))
        }
    }
}

/// Check every profile: registry key consistency, asset presence, and that
/// the artwork decodes to the declared frame size. One report per profile.
pub fn validate_registry(registry: &Registry, frames_root: &Path) -> Vec<ValidationReport> {
    let mut reports = Vec::with_capacity(registry.len());

    for (platform, key, profile) in registry.iter() {
        let mut findings = Vec::new();

        match parse_resolution_key(key) {
            None => findings.push(format!("registry key '{key}' is not of the form WxH")),
            Some((w, h)) => {
                if (w, h) != (profile.screenshot_width, profile.screenshot_height) {
                    findings.push(format!(
                        "registry key '{key}' does not match declared screenshot {}",
                        resolution_key(profile.screenshot_width, profile.screenshot_height)
                    ));
                }
            }
        }

        let asset = resolve_asset(frames_root, &profile.asset_path);
        if !asset.is_file() {
            findings.push(format!("bezel asset '{}' does not exist", asset.display()));
        } else {
            match image::image_dimensions(&asset) {
                Err(e) => findings.push(format!(
                    "bezel asset '{}' failed to decode: {e}",
                    asset.display()
                )),
                Ok((w, h)) => {
                    if (w, h) != (profile.frame_width, profile.frame_height) {
                        findings.push(format!(
                            "bezel asset is {w}x{h}, profile declares {}x{}",
                            profile.frame_width, profile.frame_height
                        ));
                    }
                }
            }
        }

        reports.push(ValidationReport {
            platform: platform.to_string(),
            key: key.to_string(),
            asset,
            devices: profile.devices.clone(),
            inch: profile.inch,
            findings,
        });
    }

    reports
}

fn resolve_asset(frames_root: &Path, asset_path: &str) -> PathBuf {
    let expanded = expand_home(Path::new(asset_path));
    if expanded.is_absolute() {
        expanded
    } else {
        frames_root.join(expanded)
    }
}
