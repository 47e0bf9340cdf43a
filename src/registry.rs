use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::error::{FramefitError, FramefitResult};

const BUILTIN_JSON: &str = include_str!("../assets/devices.json");

/// One registry entry: how a screenshot of a given resolution maps onto one
/// device's bezel artwork. All pixel fields are authored in portrait terms at
/// the artwork's native scale.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub frame_width: u32,
    pub frame_height: u32,
    pub screenshot_width: u32,
    pub screenshot_height: u32,
    pub inner_left: u32,
    pub inner_top: u32,
    pub inner_width: u32,
    pub inner_height: u32,
    pub corner_cut_size: u32,
    /// Bezel artwork path, relative to the frames root unless absolute.
    /// A leading `~` is expanded to the home directory.
    pub asset_path: String,
    #[serde(default)]
    pub inch: f64,
    #[serde(default)]
    pub devices: Vec<String>,
}

/// Mapping `platform -> "WxH" -> DeviceProfile`. The platform set is open:
/// whatever keys the registry files declare. Built once at startup, read-only
/// during a compositing run.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Registry {
    platforms: BTreeMap<String, BTreeMap<String, DeviceProfile>>,
}

pub fn resolution_key(width: u32, height: u32) -> String {
    format!("{width}x{height}")
}

/// Parse a `"WxH"` registry key back into dimensions.
pub fn parse_resolution_key(key: &str) -> Option<(u32, u32)> {
    let (w, h) = key.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

impl Registry {
    /// The registry compiled into the binary.
    pub fn builtin() -> Self {
        serde_json::from_str(BUILTIN_JSON).expect("built-in device registry is valid JSON")
    }

    pub fn from_json_str(json: &str) -> FramefitResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FramefitError::registry(format!("invalid registry JSON: {e}")))
    }

    pub fn load_file(path: &Path) -> FramefitResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read registry '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Merge `override_reg` into `self`: same `(platform, key)` replaces,
    /// everything else is additive. No cross-field validation happens here;
    /// that is the validate sweep's job.
    pub fn merge(&mut self, override_reg: Registry) {
        for (platform, entries) in override_reg.platforms {
            let slot = self.platforms.entry(platform).or_default();
            for (key, profile) in entries {
                slot.insert(key, profile);
            }
        }
    }

    /// Look up the profile keyed for the given measured (portrait-normalized)
    /// dimensions. `None` is a normal outcome for unsupported resolutions.
    pub fn lookup(&self, platform: &str, width: u32, height: u32) -> Option<&DeviceProfile> {
        self.platforms
            .get(platform)?
            .get(&resolution_key(width, height))
    }

    pub fn contains_platform(&self, platform: &str) -> bool {
        self.platforms.contains_key(platform)
    }

    /// All `(platform, key, profile)` triples in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &DeviceProfile)> {
        self.platforms.iter().flat_map(|(platform, entries)| {
            entries
                .iter()
                .map(move |(key, profile)| (platform.as_str(), key.as_str(), profile))
        })
    }

    pub fn len(&self) -> usize {
        self.platforms.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.values().all(BTreeMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(frame_width: u32) -> DeviceProfile {
        DeviceProfile {
            frame_width,
            frame_height: 2000,
            screenshot_width: 750,
            screenshot_height: 1334,
            inner_left: 100,
            inner_top: 100,
            inner_width: 750,
            inner_height: 1334,
            corner_cut_size: 0,
            asset_path: "ios/test.png".to_string(),
            inch: 0.0,
            devices: vec![],
        }
    }

    #[test]
    fn builtin_parses_and_is_keyed_consistently() {
        let reg = Registry::builtin();
        assert!(!reg.is_empty());
        for (_, key, profile) in reg.iter() {
            assert_eq!(
                key,
                resolution_key(profile.screenshot_width, profile.screenshot_height)
            );
        }
    }

    #[test]
    fn lookup_hits_and_misses() {
        let reg = Registry::builtin();
        assert!(reg.lookup("android", 1080, 2340).is_some());
        assert!(reg.lookup("android", 1080, 2341).is_none());
        assert!(reg.lookup("tizen", 1080, 2340).is_none());
    }

    #[test]
    fn merge_replaces_matching_key_and_keeps_others() {
        let mut base = Registry::builtin();
        let before = base.len();
        let replaced = base.lookup("ios", 750, 1334).unwrap().clone();

        let mut over = Registry::default();
        over.platforms
            .entry("ios".to_string())
            .or_default()
            .insert("750x1334".to_string(), profile(9999));
        base.merge(over);

        assert_eq!(base.len(), before);
        let got = base.lookup("ios", 750, 1334).unwrap();
        assert_eq!(got.frame_width, 9999);
        assert_ne!(*got, replaced);
        // untouched sibling key
        assert!(base.lookup("ios", 1290, 2796).is_some());
    }

    #[test]
    fn merge_creates_missing_platforms() {
        let mut base = Registry::builtin();
        let mut over = Registry::default();
        over.platforms
            .entry("custom".to_string())
            .or_default()
            .insert("750x1334".to_string(), profile(1050));
        base.merge(over);

        assert!(base.contains_platform("custom"));
        assert!(base.lookup("custom", 750, 1334).is_some());
    }

    #[test]
    fn resolution_key_round_trips() {
        assert_eq!(resolution_key(1080, 2340), "1080x2340");
        assert_eq!(parse_resolution_key("1080x2340"), Some((1080, 2340)));
        assert_eq!(parse_resolution_key("1080"), None);
        assert_eq!(parse_resolution_key("ax b"), None);
    }
}
