use crate::common::*;
use ffbatch::engine::{SettingValue, Settings};
use ffbatch::ui::{ScriptedConsole, choose_profile, edit_settings};

fn menu_entry(profile: &ffbatch::engine::params::CodecProfile, key: &str) -> String {
    let index = profile.params.iter().position(|p| p.key == key).unwrap();
    (index + 1).to_string()
}

#[test]
fn test_choose_edit_and_compile() {
    let registry = registry();
    let mut console = ScriptedConsole::new([
        "3", // hevc
    ]);
    let hevc = choose_profile(&registry, &mut console).unwrap().unwrap();
    assert_eq!(hevc.name, "hevc");

    let mut s = Settings::defaults_for(hevc);
    let crf = menu_entry(hevc, "crf");
    let passes = menu_entry(hevc, "passes");
    let scale = menu_entry(hevc, "scale");
    let fix = (hevc.params.len() + 1).to_string();

    let mut console = ScriptedConsole::new([
        crf.as_str(),
        "60", // out of range
        "20",
        passes.as_str(),
        "1",
        scale.as_str(),
        "2",
        "1280",
        fix.as_str(),
        "1",
        "",
    ]);
    edit_settings(hevc, &mut s, &mut console).unwrap();
    assert_eq!(console.remaining(), 0);

    let plan = compile_plan(hevc, &s);
    assert_eq!(plan.commands.len(), 1);
    let cmd = plan.commands[0].as_str();
    assert_cmd_has_flag_value(cmd, "-crf", "20");
    assert_cmd_contains(
        cmd,
        "-vf \"scale=1280:-1,pad=width=ceil(iw/2)*2:height=ceil(ih/2)*2\"",
    );
    assert!(plan.output_path.ends_with("holiday clip_hevc_q20_1pass.mp4"));
}

#[test]
fn test_out_of_range_leaves_store_unchanged() {
    let svt = profile("svt-av1");
    let mut s = Settings::defaults_for(&svt);
    let before = s.clone();
    let preset = menu_entry(&svt, "preset");

    let mut console = ScriptedConsole::new([preset.as_str(), "14", "", ""]);
    edit_settings(&svt, &mut s, &mut console).unwrap();

    assert_eq!(s, before);
    let prompts = console.output.matches("14 is out of range (0-13)").count();
    assert_eq!(prompts, 1);
}

#[test]
fn test_reset_then_compile_omits_parameter() {
    let vp9 = profile("vp9");
    let mut s = Settings::defaults_for(&vp9);
    s.set("cpu_used", SettingValue::Int(4));
    let cpu = menu_entry(&vp9, "cpu_used");

    let mut console = ScriptedConsole::new([cpu.as_str(), "r", ""]);
    edit_settings(&vp9, &mut s, &mut console).unwrap();
    assert_eq!(s.get("cpu_used"), Some(&SettingValue::DontChange));

    let plan = compile_plan(&vp9, &s);
    for cmd in &plan.commands {
        assert_cmd_not_contains(cmd.as_str(), "-cpu-used");
    }
}

#[test]
fn test_whitelist_rejects_unknown_values() {
    let hevc = profile("hevc");
    let mut s = Settings::new();
    let aq = menu_entry(&hevc, "aq_mode");

    let mut console = ScriptedConsole::new([aq.as_str(), "9", "2", ""]);
    edit_settings(&hevc, &mut s, &mut console).unwrap();

    assert_eq!(s.get("aq_mode"), Some(&SettingValue::Int(2)));
    assert!(console.output.contains("'9' is not one of: 0, 1, 2, 3, 4"));
}

#[test]
fn test_suffixed_audio_bitrate_is_kept_verbatim() {
    let svt = profile("svt-av1");
    let mut s = Settings::defaults_for(&svt);
    let bitrate = menu_entry(&svt, "audio_bitrate");

    let mut console = ScriptedConsole::new([bitrate.as_str(), "1M", "192k", ""]);
    edit_settings(&svt, &mut s, &mut console).unwrap();

    assert_eq!(s.get("audio_bitrate"), Some(&SettingValue::text("192k")));
    assert!(console.output.contains("Allowed: 6-510 kbps"));
    // menu, bitrate screen, menu again; the rejected value does not redraw
    assert_eq!(console.clears, 3);

    let plan = compile_plan(&svt, &s);
    let encode = plan.commands.last().unwrap();
    assert_cmd_has_flag_value(encode.as_str(), "-b:a", "192k");
}
