use super::{load_settings_with_env, Settings};

use std::{collections::HashMap, fs, path::Path};

use shared::domain::{AxisMask, CodeFamily};

fn no_env(_: &str) -> Option<String> {
    None
}

fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("mdi.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn missing_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_with_env(&dir.path().join("absent.toml"), no_env);
    assert_eq!(settings, Settings::default());
}

#[test]
fn reads_numeric_and_textual_masks() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "axis_mask = 3\ndefault_family = \"m\"\nqueue_capacity = 4\n");
    let settings = load_settings_with_env(&path, no_env);
    assert_eq!(settings.axis_mask, AxisMask(3));
    assert_eq!(settings.default_family, CodeFamily::M);
    assert_eq!(settings.queue_capacity, 4);

    let path = write_config(dir.path(), "axis_mask = \"0b101\"\n");
    assert_eq!(load_settings_with_env(&path, no_env).axis_mask, AxisMask(0b101));

    let path = write_config(dir.path(), "axis_mask = \"0x107\"\n");
    assert_eq!(load_settings_with_env(&path, no_env).axis_mask, AxisMask(0x107));
}

#[test]
fn malformed_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "axis_mask = [1, 2");
    assert_eq!(load_settings_with_env(&path, no_env), Settings::default());
}

#[test]
fn zero_queue_capacity_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "queue_capacity = 0\n");
    assert_eq!(load_settings_with_env(&path, no_env).queue_capacity, 16);
}

#[test]
fn environment_overrides_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "axis_mask = 7\n");
    let env: HashMap<&str, &str> = HashMap::from([
        ("APP__AXIS_MASK", "0b11"),
        ("APP__DEFAULT_FAMILY", "M"),
    ]);
    let settings = load_settings_with_env(&path, |key| env.get(key).map(|v| v.to_string()));
    assert_eq!(settings.axis_mask, AxisMask(0b11));
    assert_eq!(settings.default_family, CodeFamily::M);
}

#[test]
fn invalid_environment_values_are_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    let env: HashMap<&str, &str> = HashMap::from([("MDI_AXIS_MASK", "xyz")]);
    let settings = load_settings_with_env(&path, |key| env.get(key).map(|v| v.to_string()));
    assert_eq!(settings.axis_mask, Settings::default().axis_mask);
}
