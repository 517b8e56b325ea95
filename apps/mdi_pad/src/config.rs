use std::{fs, path::Path};

use serde::Deserialize;
use shared::domain::{AxisMask, CodeFamily};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub axis_mask: AxisMask,
    pub default_family: CodeFamily,
    pub queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            axis_mask: AxisMask(0b111),
            default_family: CodeFamily::G,
            queue_capacity: 16,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaskValue {
    Number(u16),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    axis_mask: Option<MaskValue>,
    default_family: Option<String>,
    queue_capacity: Option<usize>,
}

pub fn load_settings(path: &Path) -> Settings {
    load_settings_with_env(path, |key| std::env::var(key).ok())
}

/// File values override defaults, then `MDI_AXIS_MASK`, `APP__AXIS_MASK` and
/// `APP__DEFAULT_FAMILY` override the file.
pub fn load_settings_with_env(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg, path),
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring malformed settings file"),
        }
    }

    for key in ["MDI_AXIS_MASK", "APP__AXIS_MASK"] {
        if let Some(v) = env(key) {
            match AxisMask::parse(&v) {
                Some(mask) => settings.axis_mask = mask,
                None => warn!(key, value = %v, "ignoring invalid axis mask"),
            }
        }
    }
    if let Some(v) = env("APP__DEFAULT_FAMILY") {
        match CodeFamily::from_prefix(&v) {
            Some(family) => settings.default_family = family,
            None => warn!(value = %v, "ignoring invalid default family"),
        }
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings, path: &Path) {
    match file_cfg.axis_mask {
        Some(MaskValue::Number(raw)) => settings.axis_mask = AxisMask(raw),
        Some(MaskValue::Text(raw)) => match AxisMask::parse(&raw) {
            Some(mask) => settings.axis_mask = mask,
            None => warn!(path = %path.display(), value = %raw, "ignoring invalid axis mask"),
        },
        None => {}
    }
    if let Some(raw) = file_cfg.default_family {
        match CodeFamily::from_prefix(&raw) {
            Some(family) => settings.default_family = family,
            None => warn!(path = %path.display(), value = %raw, "ignoring invalid default family"),
        }
    }
    if let Some(capacity) = file_cfg.queue_capacity.filter(|capacity| *capacity > 0) {
        settings.queue_capacity = capacity;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
