/// Type definitions for the codec parameter registry.
///
/// Every profile is a static table of `ParamDef`s. The enums here are closed on
/// purpose: a descriptor cannot name a context or kind the compiler does not know.
use std::fmt;

/// Settings key holding the pass mode ("One-Pass" / "Two-Pass")
pub const PASSES_KEY: &str = "passes";

/// Settings key holding the output container (file extension)
pub const CONTAINER_KEY: &str = "container";

/// Settings key of the resolution parameter
pub const SCALE_KEY: &str = "scale";

/// Settings key of the even-dimension fix. Not a descriptor: the editor shows it
/// as an extra menu entry for profiles that require even dimensions.
pub const SCALE_FIX_KEY: &str = "scale_fix";

/// Tokens accepted by resettable parameters to store the "don't change" sentinel
pub const RESET_TOKENS: &[&str] = &["r", "reset"];

/// Valid range for a directly typed value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Range {
    /// Integer range (min, max) - inclusive
    Int { min: i64, max: i64 },

    /// Float range (min, max) - inclusive
    Float { min: f64, max: f64 },

    /// Bitrate in kbps (min, max) - inclusive. Accepts `128`, `128k` or `1.5M`.
    Kbps { min: i64, max: i64 },

    /// Value must be one of these literals
    Enum { values: &'static [&'static str] },

    /// Any non-empty value
    Any,
}

impl Range {
    /// Check if an integer value is within this range
    pub fn contains_int(&self, value: i64) -> bool {
        match self {
            Range::Int { min, max } | Range::Kbps { min, max } => value >= *min && value <= *max,
            Range::Float { min, max } => (value as f64) >= *min && (value as f64) <= *max,
            Range::Any => true,
            Range::Enum { .. } => false,
        }
    }

    /// Check if a float value is within this range
    pub fn contains_float(&self, value: f64) -> bool {
        match self {
            Range::Float { min, max } => value >= *min && value <= *max,
            Range::Kbps { min, max } => value >= *min as f64 && value <= *max as f64,
            Range::Any => true,
            _ => false,
        }
    }

    /// Check if a string value is valid for this range
    pub fn contains_str(&self, value: &str) -> bool {
        match self {
            Range::Enum { values } => values.iter().any(|v| *v == value),
            Range::Any => true,
            _ => false,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range::Int { min, max } => write!(f, "{}-{}", min, max),
            Range::Float { min, max } => write!(f, "{}-{}", min, max),
            Range::Kbps { min, max } => write!(f, "{}-{} kbps (k or M suffix allowed)", min, max),
            Range::Enum { values } => write!(f, "{}", values.join(", ")),
            Range::Any => write!(f, "any"),
        }
    }
}

/// One entry of a `Choice` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceDef {
    /// Text shown in the numbered list
    pub label: &'static str,
    /// Value stored in the settings and rendered into the command
    pub value: &'static str,
}

/// Specialized editor sub-flows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Resolution: height, width, or explicit W:H
    Scale,
}

/// How a parameter is edited
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    /// Free-form value checked against a range
    DirectInput { range: Range },

    /// Fixed list of (label, value) pairs
    Choice { choices: &'static [ChoiceDef] },

    /// Delegated to a dedicated sub-flow
    Handled(Handler),
}

/// Command segment a rendered fragment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    VideoFilter,
    AudioFilter,
    VideoCodecOption,
    AudioCodecOption,
    AudioCodecSelector,
    VendorSpecialOption,
    ScaleFilterParameter,
    /// Affects file naming and pass count, never rendered as a flag
    Meta,
}

impl Context {
    /// Separator placed between a flag and its value
    pub fn separator(&self) -> &'static str {
        match self {
            Context::VideoFilter
            | Context::AudioFilter
            | Context::VendorSpecialOption
            | Context::ScaleFilterParameter => "=",
            Context::VideoCodecOption
            | Context::AudioCodecOption
            | Context::AudioCodecSelector
            | Context::Meta => " ",
        }
    }

    /// Whether fragments of this context belong to the audio side of the command
    pub fn is_audio(&self) -> bool {
        matches!(
            self,
            Context::AudioFilter | Context::AudioCodecOption | Context::AudioCodecSelector
        )
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Context::VideoFilter => "video-filter",
            Context::AudioFilter => "audio-filter",
            Context::VideoCodecOption => "video-codec-option",
            Context::AudioCodecOption => "audio-codec-option",
            Context::AudioCodecSelector => "audio-codec-selector",
            Context::VendorSpecialOption => "vendor-special-option",
            Context::ScaleFilterParameter => "scale-filter-parameter",
            Context::Meta => "meta",
        };
        write!(f, "{}", name)
    }
}

/// Value written to a fresh settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Unset,
    DontChange,
    Int(i64),
    Text(&'static str),
}

/// How a two-pass encode tells the encoder which pass is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStyle {
    /// `-pass 1` / `-pass 2`
    PassFlag,
    /// `pass=1` / `pass=2` inside the vendor parameter group
    VendorParam,
}

/// Definition of a single tunable parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDef {
    /// Settings key (e.g., "crf", "audio_bitrate")
    pub key: &'static str,

    /// Menu entry text
    pub label: &'static str,

    /// Prompt text shown while editing
    pub help: &'static str,

    pub kind: ParamKind,

    /// FFmpeg flag or filter name (e.g., "-crf", "fps"); None renders the bare value
    pub flag: Option<&'static str>,

    pub context: Context,

    /// Accepts a reset token that stores the "don't change" sentinel
    pub resettable: bool,

    /// Suffix appended to bare integer values (e.g., "k" for bitrates)
    pub unit: Option<&'static str>,

    pub default: DefaultValue,
}

impl ParamDef {
    /// The scale handler, if this is the resolution parameter
    pub fn is_scale(&self) -> bool {
        matches!(self.kind, ParamKind::Handled(Handler::Scale))
    }

    /// Text that opens this parameter's fragment in a rendered command
    /// (e.g., "-crf " or "fps="). None for positional parameters.
    pub fn marker(&self) -> Option<String> {
        self.flag
            .map(|flag| format!("{}{}", flag, self.context.separator()))
    }
}

/// Definition of one transcoding target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecProfile {
    /// Profile name (matched case-insensitively)
    pub name: &'static str,

    /// Encoder passed to `-c:v` (e.g., "libx265")
    pub video_codec: &'static str,

    /// Flag grouping all vendor-special fragments (e.g., "-x265-params")
    pub vendor_flag: Option<&'static str>,

    /// Offer the pad/crop fix for odd output dimensions
    pub requires_even_dimensions: bool,

    /// Parameter embedded in output filenames as `q<value>`
    pub quality_key: &'static str,

    pub pass_style: PassStyle,

    /// Parameters in menu order
    pub params: &'static [ParamDef],
}

impl CodecProfile {
    /// Get a parameter definition by key
    pub fn param(&self, key: &str) -> Option<&'static ParamDef> {
        self.params.iter().find(|p| p.key == key)
    }

    /// Parameters injected into the given command segment, in declaration order
    pub fn params_by_context(&self, context: Context) -> impl Iterator<Item = &'static ParamDef> {
        self.params.iter().filter(move |p| p.context == context)
    }

    /// Case-insensitive name comparison
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for CodecProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.video_codec)
    }
}
