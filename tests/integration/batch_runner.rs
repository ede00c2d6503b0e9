use crate::common::*;
use anyhow::Result;
use ffbatch::engine::worker::{CommandRunner, DryRunner, FileOutcome, run_batch};
use ffbatch::engine::{FfmpegCommand, SettingValue, collect_inputs, compile};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fails any command that mentions the given file name
struct FailingRunner {
    needle: String,
    executed: Vec<String>,
}

impl CommandRunner for FailingRunner {
    fn run(&mut self, command: &FfmpegCommand) -> Result<()> {
        self.executed.push(command.to_string());
        if command.as_str().contains(&self.needle) {
            anyhow::bail!("ffmpeg exited with status: 1");
        }
        Ok(())
    }
}

#[test]
fn test_failing_file_does_not_stop_batch() {
    let vp9 = profile("vp9");
    let s = settings(&[
        ("crf", SettingValue::Int(33)),
        ("passes", text("Two-Pass")),
        ("container", text("webm")),
    ]);
    let inputs = vec![
        PathBuf::from("/in/a.mp4"),
        PathBuf::from("/in/broken.mp4"),
        PathBuf::from("/in/c.mp4"),
    ];
    let mut runner = FailingRunner {
        needle: "broken".to_string(),
        executed: Vec::new(),
    };

    let summary = run_batch(
        &inputs,
        |input| compile(&vp9, &s, input, Path::new("/out")),
        &mut runner,
        |_, _| {},
    )
    .unwrap();

    // a: 2 commands, broken: analysis only, c: 2 commands
    assert_eq!(runner.executed.len(), 5);
    assert!(runner.executed[2].contains("-pass 1"));
    assert!(runner.executed[3].contains("/in/c.mp4"));
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 1);
    assert_eq!(
        summary.reports[1].outcome,
        FileOutcome::Failed {
            command: 0,
            error: "ffmpeg exited with status: 1".to_string()
        }
    );
}

#[test]
fn test_dry_run_over_scanned_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("one.mkv"), b"").unwrap();
    fs::write(dir.path().join("two.mov"), b"").unwrap();
    fs::write(dir.path().join("readme.md"), b"").unwrap();

    let inputs = collect_inputs(&[dir.path().to_path_buf()]).unwrap();
    assert_eq!(inputs.files.len(), 2);

    let hevc = profile("hevc");
    let s = ffbatch::engine::Settings::defaults_for(&hevc);
    let mut runner = DryRunner::default();
    let out = dir.path().join("output");

    let summary = run_batch(
        &inputs.files,
        |input| compile(&hevc, &s, input, &out),
        &mut runner,
        |_, _| {},
    )
    .unwrap();

    assert_eq!(summary.succeeded(), 2);
    assert_eq!(runner.commands.len(), 4);
    assert!(runner.commands[1].contains("one_hevc_q23_2pass.mp4"));
    assert!(runner.commands[3].contains("two_hevc_q23_2pass.mp4"));
    assert!(!out.exists());
}

fn argv(command: &FfmpegCommand) -> Vec<String> {
    std::iter::once(command.program())
        .chain(command.args().iter().map(|a| a.as_os_str()))
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_display_form_splits_into_executed_arguments() {
    let hevc = profile("hevc");
    let s = settings(&[
        ("scale", text("1280:-1")),
        ("crf", SettingValue::Int(24)),
        ("passes", text("One-Pass")),
        ("container", text("mp4")),
    ]);
    let plan = compile_plan(&hevc, &s);
    let command = &plan.commands[0];

    let args = argv(command);
    assert_eq!(shlex::split(command.as_str()), Some(args.clone()));
    assert_eq!(&args[1..4], ["-y", "-i", INPUT]);
    assert!(args.contains(&"scale=1280:-1".to_string()));
    assert_eq!(
        args.last().map(String::as_str),
        Some("/videos/output/holiday clip_hevc_q24_1pass.mp4")
    );
}

#[test]
fn test_paths_with_quotes_and_backslashes_are_passed_verbatim() {
    let hevc = profile("hevc");
    let s = settings(&[("passes", text("Two-Pass")), ("container", text("mkv"))]);

    for input in [r#"/in/say "hi".mp4"#, r"\\nas\video\clip.mp4"] {
        let input = Path::new(input);
        let plan = compile(&hevc, &s, input, Path::new("/out")).unwrap();

        for command in &plan.commands {
            assert_eq!(command.args()[2].as_os_str(), input.as_os_str());
        }
        let encode = &plan.commands[1];
        assert_eq!(
            encode.args().last().map(|a| a.as_os_str()),
            Some(plan.output_path.as_os_str())
        );
    }

    let plan = compile(&hevc, &s, Path::new(r#"/in/say "hi".mp4"#), Path::new("/out")).unwrap();
    assert_eq!(
        plan.output_path,
        Path::new(r#"/out/say "hi"_hevc_qdefault_2pass.mkv"#)
    );
}
