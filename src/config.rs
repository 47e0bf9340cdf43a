//! Startup configuration: where the bezel artwork lives and which registry
//! overrides to merge. Resolution order for the frames root is CLI flag, then
//! the `FRAMEFIT_FRAMES_DIR` environment variable, then the user config file,
//! then `./frames`. The resolved root must exist; a run never starts without
//! its artwork.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::error::{FramefitError, FramefitResult};
use crate::registry::Registry;

pub const FRAMES_DIR_ENV: &str = "FRAMEFIT_FRAMES_DIR";

/// On-disk config file, `<config dir>/framefit/config.json`.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigFile {
    frames_dir: Option<PathBuf>,
    registry_path: Option<PathBuf>,
}

/// Resolved startup configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub frames_dir: PathBuf,
    /// Explicit override registry (CLI flag or config file), merged last.
    pub registry_path: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration from CLI overrides, environment, and the user
    /// config file. Fails if the frames root does not exist.
    pub fn resolve(
        frames_dir_flag: Option<PathBuf>,
        registry_flag: Option<PathBuf>,
    ) -> FramefitResult<Self> {
        let file = load_config_file()?;

        let frames_dir = frames_dir_flag
            .or_else(|| std::env::var_os(FRAMES_DIR_ENV).map(PathBuf::from))
            .or(file.frames_dir)
            .unwrap_or_else(|| PathBuf::from("frames"));
        let frames_dir = expand_home(&frames_dir);

        if !frames_dir.is_dir() {
            return Err(FramefitError::config(format!(
                "frames directory '{}' does not exist",
                frames_dir.display()
            )));
        }

        let registry_path = registry_flag
            .or(file.registry_path)
            .map(|p| expand_home(&p));

        Ok(Self {
            frames_dir,
            registry_path,
        })
    }

    /// Build the run's registry: built-in profiles, then the user override
    /// file at `<config dir>/framefit/devices.json` when present, then the
    /// explicit override registry when configured. Later merges win.
    pub fn build_registry(&self) -> FramefitResult<Registry> {
        let mut registry = Registry::builtin();

        if let Some(user) = user_registry_path()
            && user.is_file()
        {
            registry.merge(Registry::load_file(&user)?);
        }

        if let Some(path) = &self.registry_path {
            registry.merge(Registry::load_file(path)?);
        }

        Ok(registry)
    }
}

/// Expand a leading `~` or `~/` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn framefit_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("framefit"))
}

fn user_registry_path() -> Option<PathBuf> {
    framefit_config_dir().map(|d| d.join("devices.json"))
}

fn load_config_file() -> FramefitResult<ConfigFile> {
    let Some(path) = framefit_config_dir().map(|d| d.join("config.json")) else {
        return Ok(ConfigFile::default());
    };
    if !path.is_file() {
        return Ok(ConfigFile::default());
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|e| FramefitError::config(format!("invalid config '{}': {e}", path.display())))
}
