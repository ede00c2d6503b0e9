use crate::common::*;
use ffbatch::engine::params::{Context, PassStyle};
use ffbatch::engine::platform::null_output_target;
use ffbatch::engine::{ConfigurationError, PassMode, SettingValue, compile};
use std::path::Path;

#[test]
fn test_hevc_minimal_one_pass() {
    let hevc = profile("hevc");
    let s = settings(&[
        ("crf", SettingValue::Int(23)),
        ("scale", SettingValue::DontChange),
        ("passes", text("One-Pass")),
        ("container", text("mp4")),
    ]);

    let plan = compile_plan(&hevc, &s);
    assert_eq!(plan.commands.len(), 1);
    assert_cmd_has_flag_value(plan.commands[0].as_str(), "-crf", "23");
    assert_cmd_not_contains(plan.commands[0].as_str(), "-vf");
    assert_cmd_contains(plan.commands[0].as_str(), "-i \"/videos/holiday clip.mp4\"");
}

#[test]
fn test_pass_modes_produce_one_or_two_commands() {
    for profile in registry().profiles() {
        let mut s = settings(&[("container", text("mkv")), ("crf", SettingValue::Int(30))]);

        s.set("passes", text("One-Pass"));
        assert_eq!(compile_plan(profile, &s).commands.len(), 1);

        s.set("passes", text("Two-Pass"));
        assert_eq!(compile_plan(profile, &s).commands.len(), 2);
    }
}

#[test]
fn test_analysis_pass_has_no_audio() {
    for profile in registry().profiles() {
        let mut s = ffbatch::engine::Settings::defaults_for(profile);
        s.set("volume", text("2"));
        s.set("passes", text("Two-Pass"));

        let plan = compile_plan(profile, &s);
        let analysis = plan.commands[0].as_str();
        let encode = plan.commands[1].as_str();

        for context in [
            Context::AudioFilter,
            Context::AudioCodecSelector,
            Context::AudioCodecOption,
        ] {
            for param in profile.params_by_context(context) {
                let marker = param.marker().unwrap();
                assert_cmd_not_contains(analysis, &marker);
                assert_cmd_contains(encode, &marker);
            }
        }
        assert_cmd_contains(analysis, &format!("-an -f null {}", null_output_target()));
        assert_cmd_not_contains(analysis, "_2pass");
    }
}

#[test]
fn test_pass_markers_follow_profile_style() {
    for profile in registry().profiles() {
        let s = settings(&[("passes", text("Two-Pass")), ("container", text("mp4"))]);
        let plan = compile_plan(profile, &s);

        match profile.pass_style {
            PassStyle::PassFlag => {
                assert_cmd_contains(plan.commands[0].as_str(), "-pass 1");
                assert_cmd_contains(plan.commands[1].as_str(), "-pass 2");
            }
            PassStyle::VendorParam => {
                let flag = profile.vendor_flag.unwrap();
                assert_cmd_contains(plan.commands[0].as_str(), &format!("{} pass=1", flag));
                assert_cmd_contains(plan.commands[1].as_str(), &format!("{} pass=2", flag));
                assert_cmd_not_contains(plan.commands[1].as_str(), "-pass ");
            }
        }
    }
}

#[test]
fn test_output_names_differ_between_pass_modes() {
    for profile in registry().profiles() {
        let mut s = settings(&[("container", text("mkv")), ("crf", SettingValue::Int(31))]);

        s.set("passes", text("One-Pass"));
        let one = compile_plan(profile, &s);
        s.set("passes", text("Two-Pass"));
        let two = compile_plan(profile, &s);

        assert_ne!(one.output_path, two.output_path);
        for plan in [&one, &two] {
            let name = plan.output_path.file_name().unwrap().to_string_lossy();
            assert!(name.starts_with("holiday clip_"), "{}", name);
            assert!(name.contains(profile.name), "{}", name);
            assert!(name.contains("_q31_"), "{}", name);
        }
        assert_eq!(one.pass_mode, PassMode::OnePass);
        assert!(one.output_path.ends_with(format!(
            "holiday clip_{}_q31_1pass.mkv",
            profile.name
        )));
        assert!(two.output_path.starts_with(OUTPUT_DIR));
    }
}

#[test]
fn test_scale_without_fix_is_exact() {
    let hevc = profile("hevc");
    let s = settings(&[
        ("scale", text("1280:-1")),
        ("passes", text("One-Pass")),
        ("container", text("mp4")),
    ]);

    let plan = compile_plan(&hevc, &s);
    assert_cmd_contains(plan.commands[0].as_str(), "-vf \"scale=1280:-1\"");
}

#[test]
fn test_pad_follows_scale() {
    for profile in registry().profiles() {
        assert!(profile.requires_even_dimensions);
        let s = settings(&[
            ("scale", text("-1:720")),
            ("scale_fix", text("pad")),
            ("fps", text("23.976")),
            ("container", text("mkv")),
        ]);

        let plan = compile_plan(profile, &s);
        assert_cmd_order(plan.commands[0].as_str(), "scale=-1:720", "pad=width=");
        assert_cmd_order(plan.commands[0].as_str(), "pad=width=", "fps=23.976");
    }
}

#[test]
fn test_vendor_group_joins_with_colon() {
    let svt = profile("svt-av1");
    let s = settings(&[
        ("tune", SettingValue::Int(0)),
        ("film_grain", SettingValue::Int(8)),
        ("passes", text("One-Pass")),
        ("container", text("mkv")),
    ]);

    let plan = compile_plan(&svt, &s);
    assert_cmd_contains(plan.commands[0].as_str(), "-svtav1-params tune=0:film-grain=8");
}

#[test]
fn test_reset_parameter_is_omitted() {
    let vp9 = profile("vp9");
    let mut s = ffbatch::engine::Settings::defaults_for(&vp9);
    s.set("passes", text("One-Pass"));
    s.reset("video_bitrate");
    s.reset("pixel_format");

    let plan = compile_plan(&vp9, &s);
    assert_cmd_not_contains(plan.commands[0].as_str(), "-b:v");
    assert_cmd_not_contains(plan.commands[0].as_str(), "-pix_fmt");
    assert_cmd_has_flag_value(plan.commands[0].as_str(), "-deadline", "good");
}

#[test]
fn test_invalid_pass_mode_produces_nothing() {
    let s = settings(&[("passes", text("Both")), ("container", text("mp4"))]);
    let result = compile(
        &profile("hevc"),
        &s,
        Path::new(INPUT),
        Path::new(OUTPUT_DIR),
    );
    assert_eq!(
        result,
        Err(ConfigurationError::InvalidPassMode("Both".to_string()))
    );
}

#[test]
fn test_missing_container_is_rejected() {
    let s = settings(&[("passes", text("One-Pass"))]);
    let result = compile(&profile("vp9"), &s, Path::new(INPUT), Path::new(OUTPUT_DIR));
    assert!(matches!(result, Err(ConfigurationError::MissingContainer(_))));
}
