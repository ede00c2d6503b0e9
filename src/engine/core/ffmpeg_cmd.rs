//! Command compiler: (profile, settings, input, output dir) -> ffmpeg command lines.
//!
//! Everything here is pure. Parameters are bucketed by context and rendered in
//! declaration order; no profile gets special treatment.

use std::path::{Path, PathBuf};

use super::settings::{SettingValue, Settings};
use super::types::{ConfigurationError, EncodePlan, FfmpegCommand, PassMode, ResolutionFix};
use crate::engine::params::{
    CONTAINER_KEY, CodecProfile, Context, PASSES_KEY, ParamDef, PassStyle, SCALE_FIX_KEY,
};
use crate::engine::platform::null_output_target;

/// Program name at the head of every command
pub const FFMPEG_BIN: &str = "ffmpeg";

/// Filename placeholder when the quality parameter is unset
const QUALITY_FALLBACK: &str = "default";

/// Render a stored value; bare integers get the parameter's unit suffix
fn render_value(param: &ParamDef, value: &SettingValue) -> String {
    match (value, param.unit) {
        (SettingValue::Int(n), Some(unit)) => format!("{}{}", n, unit),
        _ => value.to_string(),
    }
}

/// Arguments for one parameter, or None when it is unset or "don't change".
///
/// Option contexts yield the flag and the value as separate arguments; the
/// other contexts glue them with their separator into one token.
fn render_args(param: &ParamDef, settings: &Settings) -> Option<Vec<String>> {
    let value = render_value(param, settings.renderable(param.key)?);
    let separator = param.context.separator();
    Some(match param.flag {
        Some(flag) if separator == " " => vec![flag.to_string(), value],
        Some(flag) => vec![format!("{}{}{}", flag, separator, value)],
        None => vec![value],
    })
}

/// Fragment for one parameter as it appears in a filter chain or vendor group
fn render_fragment(param: &ParamDef, settings: &Settings) -> Option<String> {
    render_args(param, settings).map(|args| args.join(" "))
}

fn render_context(profile: &CodecProfile, settings: &Settings, context: Context) -> Vec<String> {
    profile
        .params_by_context(context)
        .filter_map(|p| render_fragment(p, settings))
        .collect()
}

fn render_context_args(
    profile: &CodecProfile,
    settings: &Settings,
    context: Context,
) -> Vec<String> {
    profile
        .params_by_context(context)
        .filter_map(|p| render_args(p, settings))
        .flatten()
        .collect()
}

/// Rendered pieces shared by every command of a plan. Option groups hold
/// individual arguments, filter and vendor groups hold joinable fragments.
#[derive(Debug, Default)]
struct Fragments {
    video_filters: Vec<String>,
    audio_filters: Vec<String>,
    video_options: Vec<String>,
    vendor: Vec<String>,
    audio_selector: Vec<String>,
    audio_options: Vec<String>,
}

impl Fragments {
    fn render(profile: &CodecProfile, settings: &Settings, fix: Option<ResolutionFix>) -> Self {
        Self {
            video_filters: video_filter_chain(profile, settings, fix),
            audio_filters: render_context(profile, settings, Context::AudioFilter),
            video_options: render_context_args(profile, settings, Context::VideoCodecOption),
            vendor: render_context(profile, settings, Context::VendorSpecialOption),
            audio_selector: render_context_args(profile, settings, Context::AudioCodecSelector),
            audio_options: render_context_args(profile, settings, Context::AudioCodecOption),
        }
    }
}

/// Video filters in declaration order. Scale parameters are appended to the
/// scale filter with ':' and the even-dimension fix follows the scale position.
fn video_filter_chain(
    profile: &CodecProfile,
    settings: &Settings,
    fix: Option<ResolutionFix>,
) -> Vec<String> {
    let mut chain = Vec::new();
    let mut fix = fix.map(|f| f.filter());

    for param in profile.params_by_context(Context::VideoFilter) {
        if !param.is_scale() {
            if let Some(fragment) = render_fragment(param, settings) {
                chain.push(fragment);
            }
            continue;
        }

        if let Some(scale) = render_fragment(param, settings) {
            let mut scale = scale;
            for scale_param in profile.params_by_context(Context::ScaleFilterParameter) {
                if let Some(fragment) = render_fragment(scale_param, settings) {
                    scale.push(':');
                    scale.push_str(&fragment);
                }
            }
            chain.push(scale);
        }
        if let Some(fix) = fix.take() {
            chain.push(fix.to_string());
        }
    }

    // No scale parameter in this profile: the fix leads the chain
    if let Some(fix) = fix {
        chain.insert(0, fix.to_string());
    }

    chain
}

/// `<output_dir>/<stem>_<profile>_q<quality>_<1pass|2pass>.<container>`
pub fn derive_output_path(
    profile: &CodecProfile,
    settings: &Settings,
    input: &Path,
    output_dir: &Path,
    pass_mode: PassMode,
    container: &str,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let quality = settings
        .renderable(profile.quality_key)
        .map(|v| v.to_string())
        .unwrap_or_else(|| QUALITY_FALLBACK.to_string());

    output_dir.join(format!(
        "{}_{}_q{}_{}.{}",
        stem,
        profile.name,
        quality,
        pass_mode.suffix(),
        container
    ))
}

/// Which side of a two-pass encode a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Single,
    Analysis,
    Encode,
}

impl Pass {
    fn number(&self) -> Option<u8> {
        match self {
            Pass::Single => None,
            Pass::Analysis => Some(1),
            Pass::Encode => Some(2),
        }
    }
}

fn build_command(
    profile: &CodecProfile,
    fragments: &Fragments,
    input: &Path,
    output: &Path,
    pass: Pass,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new(FFMPEG_BIN);
    cmd.arg("-y").arg("-i").quoted_arg(input);

    if !fragments.video_filters.is_empty() {
        cmd.arg("-vf").quoted_arg(fragments.video_filters.join(","));
    }

    cmd.arg("-c:v").arg(profile.video_codec);
    cmd.extend_args(&fragments.video_options);

    let mut vendor = fragments.vendor.clone();
    if let Some(n) = pass.number() {
        match profile.pass_style {
            PassStyle::PassFlag => {
                cmd.arg("-pass").arg(n.to_string());
            }
            PassStyle::VendorParam => vendor.push(format!("pass={}", n)),
        }
    }
    if let (Some(flag), false) = (profile.vendor_flag, vendor.is_empty()) {
        cmd.arg(flag).arg(vendor.join(":"));
    }

    if pass == Pass::Analysis {
        cmd.extend_args(["-an", "-f", "null", null_output_target()]);
        return cmd;
    }

    if !fragments.audio_filters.is_empty() {
        cmd.arg("-af").quoted_arg(fragments.audio_filters.join(","));
    }
    cmd.extend_args(&fragments.audio_selector);
    cmd.extend_args(&fragments.audio_options);
    cmd.quoted_arg(output);

    cmd
}

/// Compile the commands that transcode `input` into `output_dir`.
///
/// Fails before producing any text when the pass mode, container or
/// resolution fix cannot be interpreted.
pub fn compile(
    profile: &CodecProfile,
    settings: &Settings,
    input: &Path,
    output_dir: &Path,
) -> Result<EncodePlan, ConfigurationError> {
    let pass_mode = PassMode::from_setting(settings.get(PASSES_KEY))?;

    let container = settings
        .renderable(CONTAINER_KEY)
        .map(|v| v.to_string())
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ConfigurationError::MissingContainer(profile.name.to_string()))?;

    let fix = if profile.requires_even_dimensions {
        ResolutionFix::from_setting(settings.get(SCALE_FIX_KEY))?
    } else {
        None
    };

    let fragments = Fragments::render(profile, settings, fix);
    let output_path =
        derive_output_path(profile, settings, input, output_dir, pass_mode, &container);

    let commands = match pass_mode {
        PassMode::OnePass => vec![build_command(
            profile,
            &fragments,
            input,
            &output_path,
            Pass::Single,
        )],
        PassMode::TwoPass => vec![
            build_command(profile, &fragments, input, &output_path, Pass::Analysis),
            build_command(profile, &fragments, input, &output_path, Pass::Encode),
        ],
    };

    Ok(EncodePlan {
        pass_mode,
        output_path,
        commands,
    })
}
