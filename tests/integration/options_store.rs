use crate::common::*;
use ffbatch::config::{Config, OPTIONS_FILE, OptionsFile};
use ffbatch::engine::params::validate_settings;
use ffbatch::engine::{SettingValue, Settings};
use ffbatch::ui::{ScriptedConsole, edit_settings};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_options_file_is_created_from_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(OPTIONS_FILE);
    let registry = registry();

    let options = OptionsFile::load_or_create(&path, &registry).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(raw["vp9"]["crf"], 35);
    assert_eq!(raw["vp9"]["container"], "webm");
    assert_eq!(raw["svt-av1"]["preset"], 8);
    assert_eq!(raw["hevc"]["preset"], "medium");
    assert_eq!(raw["hevc"]["scale"], "don't change");
    assert_eq!(raw["hevc"]["passes"], "Two-Pass");

    for profile in registry.profiles() {
        assert_eq!(options.settings_for(profile), Settings::defaults_for(profile));
    }
}

#[test]
fn test_edited_settings_persist() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(OPTIONS_FILE);
    let registry = registry();
    let vp9 = registry.lookup("vp9").unwrap();

    let mut options = OptionsFile::load_or_create(&path, &registry).unwrap();
    let mut s = options.settings_for(vp9);
    let container = vp9.params.iter().position(|p| p.key == "container").unwrap() + 1;
    let container = container.to_string();

    let mut console = ScriptedConsole::new([container.as_str(), "2", ""]);
    edit_settings(vp9, &mut s, &mut console).unwrap();
    options.store(vp9, &s);
    options.save().unwrap();

    let reloaded = OptionsFile::load_or_create(&path, &registry).unwrap();
    assert_eq!(
        reloaded.settings_for(vp9).get("container"),
        Some(&SettingValue::text("mkv"))
    );
    assert_eq!(
        reloaded.settings_for(registry.lookup("hevc").unwrap()),
        Settings::defaults_for(registry.lookup("hevc").unwrap())
    );
}

#[test]
fn test_hand_edited_file_is_validated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(OPTIONS_FILE);
    fs::write(
        &path,
        r#"{"hevc": {"crf": 70, "preset": "warp", "fps": 29.97, "container": "mp4"}}"#,
    )
    .unwrap();

    let registry = registry();
    let hevc = registry.lookup("hevc").unwrap();
    let options = OptionsFile::load_or_create(&path, &registry).unwrap();
    let s = options.settings_for(hevc);

    assert_eq!(s.get("fps"), Some(&SettingValue::text("29.97")));
    let warnings = validate_settings(hevc, &s);
    let keys: Vec<_> = warnings.iter().map(|w| w.to_string()).collect();
    assert_eq!(keys.len(), 2, "{:?}", keys);
    assert!(keys[0].starts_with("setting 'crf'"));
    assert!(keys[1].starts_with("setting 'preset'"));
}

#[test]
fn test_config_dir_holds_both_files() {
    let dir = TempDir::new().unwrap();
    let config_dir = Config::config_dir(Some(dir.path())).unwrap();

    let config = Config::load_from(&config_dir).unwrap();
    OptionsFile::load_or_create(&config_dir.join(OPTIONS_FILE), &registry()).unwrap();

    assert!(config_dir.join("config.toml").exists());
    assert!(config_dir.join(OPTIONS_FILE).exists());
    assert_eq!(config.defaults.output_dir, std::path::PathBuf::from("output"));
}
