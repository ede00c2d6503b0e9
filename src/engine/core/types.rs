use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::settings::SettingValue;

/// Settings value selecting single-pass encoding
pub const ONE_PASS: &str = "One-Pass";

/// Settings value selecting analysis + encode
pub const TWO_PASS: &str = "Two-Pass";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    OnePass,
    TwoPass,
}

impl PassMode {
    /// Interpret the stored `passes` value. Unset and "don't change" mean one pass.
    pub fn from_setting(value: Option<&SettingValue>) -> Result<Self, ConfigurationError> {
        match value {
            None | Some(SettingValue::DontChange) => Ok(PassMode::OnePass),
            Some(SettingValue::Text(s)) if s == ONE_PASS => Ok(PassMode::OnePass),
            Some(SettingValue::Text(s)) if s == TWO_PASS => Ok(PassMode::TwoPass),
            Some(other) => Err(ConfigurationError::InvalidPassMode(other.to_string())),
        }
    }

    /// Filename suffix ("1pass" / "2pass")
    pub fn suffix(&self) -> &'static str {
        match self {
            PassMode::OnePass => "1pass",
            PassMode::TwoPass => "2pass",
        }
    }

    pub fn command_count(&self) -> usize {
        match self {
            PassMode::OnePass => 1,
            PassMode::TwoPass => 2,
        }
    }
}

impl fmt::Display for PassMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassMode::OnePass => write!(f, "{}", ONE_PASS),
            PassMode::TwoPass => write!(f, "{}", TWO_PASS),
        }
    }
}

/// Post-scale filter that forces even output dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionFix {
    Pad,
    Crop,
}

impl ResolutionFix {
    pub const PAD_VALUE: &'static str = "pad";
    pub const CROP_VALUE: &'static str = "crop";

    /// Interpret the stored `scale_fix` value. Unset and "don't change" mean no fix.
    pub fn from_setting(value: Option<&SettingValue>) -> Result<Option<Self>, ConfigurationError> {
        match value {
            None | Some(SettingValue::DontChange) => Ok(None),
            Some(SettingValue::Text(s)) if s == Self::PAD_VALUE => Ok(Some(ResolutionFix::Pad)),
            Some(SettingValue::Text(s)) if s == Self::CROP_VALUE => Ok(Some(ResolutionFix::Crop)),
            Some(other) => Err(ConfigurationError::InvalidResolutionFix(other.to_string())),
        }
    }

    /// Value stored in the settings
    pub fn value(&self) -> &'static str {
        match self {
            ResolutionFix::Pad => Self::PAD_VALUE,
            ResolutionFix::Crop => Self::CROP_VALUE,
        }
    }

    /// Filter fragment inserted after the scale filter
    pub fn filter(&self) -> &'static str {
        match self {
            ResolutionFix::Pad => "pad=width=ceil(iw/2)*2:height=ceil(ih/2)*2",
            ResolutionFix::Crop => "crop=trunc(iw/2)*2:trunc(ih/2)*2",
        }
    }
}

/// One program invocation.
///
/// The argument vector is what gets executed, one element per argument, and
/// is never re-split. The display form double-quotes paths and filter chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegCommand {
    program: OsString,
    args: Vec<OsString>,
    display: String,
}

impl FfmpegCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let program = program.as_ref();
        Self {
            program: program.to_os_string(),
            args: Vec::new(),
            display: program.to_string_lossy().into_owned(),
        }
    }

    /// Append an argument shown as-is
    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.push(arg.as_ref(), false)
    }

    /// Append an argument shown in double quotes
    pub fn quoted_arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.push(arg.as_ref(), true)
    }

    pub fn extend_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.arg(arg);
        }
        self
    }

    fn push(&mut self, arg: &OsStr, quoted: bool) -> &mut Self {
        let shown = arg.to_string_lossy();
        self.display.push(' ');
        if quoted {
            self.display.push('"');
            self.display.push_str(&shown);
            self.display.push('"');
        } else {
            self.display.push_str(&shown);
        }
        self.args.push(arg.to_os_string());
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Arguments after the program, exactly as they are passed to it
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Single-line form for the console
    pub fn as_str(&self) -> &str {
        &self.display
    }
}

impl fmt::Display for FfmpegCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Commands for one input file, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodePlan {
    pub pass_mode: PassMode,
    pub output_path: PathBuf,
    /// One command for one-pass, analysis then encode for two-pass
    pub commands: Vec<FfmpegCommand>,
}

/// Settings that cannot be turned into a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Invalid pass mode '{0}', expected 'One-Pass' or 'Two-Pass'")]
    InvalidPassMode(String),

    #[error("No output container selected for profile '{0}'")]
    MissingContainer(String),

    #[error("Invalid resolution fix '{0}', expected 'pad' or 'crop'")]
    InvalidResolutionFix(String),
}
