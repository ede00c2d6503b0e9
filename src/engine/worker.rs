// Sequential batch runner: one file at a time, one command at a time

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, error, info};

use super::core::{ConfigurationError, EncodePlan, FfmpegCommand};

/// Executes one compiled command
pub trait CommandRunner {
    fn run(&mut self, command: &FfmpegCommand) -> Result<()>;
}

/// Spawns the program directly with the compiled argument vector.
/// No shell is involved, so paths reach the program byte for byte.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &FfmpegCommand) -> Result<()> {
        let program = command.program().to_string_lossy();

        let status = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute {}", program))?;

        if !status.success() {
            anyhow::bail!("{} exited with status: {}", program, status);
        }
        Ok(())
    }
}

/// Records the display form of commands instead of executing them
#[derive(Debug, Default)]
pub struct DryRunner {
    pub commands: Vec<String>,
}

impl CommandRunner for DryRunner {
    fn run(&mut self, command: &FfmpegCommand) -> Result<()> {
        self.commands.push(command.to_string());
        Ok(())
    }
}

/// Result of one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Succeeded,
    /// Index of the failed command and its error
    Failed { command: usize, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome == FileOutcome::Succeeded)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.succeeded()
    }
}

/// Run every input through `compile` and `runner`, strictly in order.
///
/// A configuration error stops the batch before the offending file runs. A
/// failed command is recorded and skips the rest of that file's commands;
/// later files still run. `on_command` sees each command before it executes.
pub fn run_batch<C, R, F>(
    inputs: &[PathBuf],
    mut compile: C,
    runner: &mut R,
    mut on_command: F,
) -> Result<BatchSummary, ConfigurationError>
where
    C: FnMut(&Path) -> Result<EncodePlan, ConfigurationError>,
    R: CommandRunner + ?Sized,
    F: FnMut(&Path, &FfmpegCommand),
{
    let mut summary = BatchSummary::default();

    for input in inputs {
        let plan = compile(input)?;
        info!(
            "Processing {} ({}, {} command(s))",
            input.display(),
            plan.pass_mode,
            plan.commands.len()
        );

        let mut outcome = FileOutcome::Succeeded;
        for (i, command) in plan.commands.iter().enumerate() {
            on_command(input, command);
            debug!("Running: {}", command);
            if let Err(e) = runner.run(command) {
                error!("Failed to process {}: {:#}", input.display(), e);
                outcome = FileOutcome::Failed {
                    command: i,
                    error: format!("{:#}", e),
                };
                break;
            }
        }

        summary.reports.push(FileReport {
            input: input.clone(),
            output: plan.output_path,
            outcome,
        });
    }

    Ok(summary)
}
