use anyhow::{Context, Result};
use std::process::Command;

use super::ffmpeg_cmd::FFMPEG_BIN;

/// Check if ffmpeg is available and return its version
pub fn ffmpeg_version() -> Result<String> {
    let output = Command::new(FFMPEG_BIN)
        .arg("-version")
        .output()
        .context("Failed to execute ffmpeg. Is ffmpeg installed and in PATH?")?;

    if !output.status.success() {
        anyhow::bail!("ffmpeg command failed with status: {}", output.status);
    }

    let version_output = String::from_utf8_lossy(&output.stdout);
    Ok(parse_version_line(&version_output))
}

/// First line of `ffmpeg -version` output
fn parse_version_line(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Unknown version")
        .to_string()
}
