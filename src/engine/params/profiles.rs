//! Built-in codec profiles.
//!
//! A new target is one more `CodecProfile` literal in `builtin_profiles`; the
//! editor and the command compiler read everything they need from here.

use super::types::{
    ChoiceDef, CodecProfile, Context, DefaultValue, Handler, ParamDef, ParamKind, PassStyle, Range,
};

// ============================================================================
// Shared parameters
// ============================================================================

const SCALE: ParamDef = ParamDef {
    key: "scale",
    label: "Scale",
    help: "Resize video.",
    kind: ParamKind::Handled(Handler::Scale),
    flag: Some("scale"),
    context: Context::VideoFilter,
    resettable: true,
    unit: None,
    default: DefaultValue::DontChange,
};

const SCALE_FLAGS: ParamDef = ParamDef {
    key: "scale_flags",
    label: "Scaling algorithm",
    help: "Scaling algorithm used when resizing (bicubic, bilinear, lanczos, spline, neighbor).",
    kind: ParamKind::DirectInput {
        range: Range::Enum {
            values: &["bicubic", "bilinear", "lanczos", "spline", "neighbor", "area"],
        },
    },
    flag: Some("flags"),
    context: Context::ScaleFilterParameter,
    resettable: true,
    unit: None,
    default: DefaultValue::DontChange,
};

const FPS: ParamDef = ParamDef {
    key: "fps",
    label: "FPS",
    help: "Enter desired FPS (1-240).",
    kind: ParamKind::DirectInput {
        range: Range::Float {
            min: 1.0,
            max: 240.0,
        },
    },
    flag: Some("fps"),
    context: Context::VideoFilter,
    resettable: true,
    unit: None,
    default: DefaultValue::DontChange,
};

const PIXEL_FORMAT_CHOICES: &[ChoiceDef] = &[
    ChoiceDef {
        label: "yuv420p (8 bit. Most compatible)",
        value: "yuv420p",
    },
    ChoiceDef {
        label: "yuv420p10le (10 bit 4:2:0)",
        value: "yuv420p10le",
    },
    ChoiceDef {
        label: "yuv422p (4:2:2)",
        value: "yuv422p",
    },
    ChoiceDef {
        label: "yuv444p (4:4:4)",
        value: "yuv444p",
    },
];

const PIXEL_FORMAT: ParamDef = ParamDef {
    key: "pixel_format",
    label: "Pixel Format",
    help: "Pixel Format. Specifies the color sampling and bit depth of the video (e.g. yuv420p for compatibility).",
    kind: ParamKind::Choice {
        choices: PIXEL_FORMAT_CHOICES,
    },
    flag: Some("-pix_fmt"),
    context: Context::VideoCodecOption,
    resettable: true,
    unit: None,
    default: DefaultValue::Text("yuv420p"),
};

const PASSES: ParamDef = ParamDef {
    key: "passes",
    label: "Passes",
    help: "Select encoding mode: single-pass (faster) or two-pass (better quality/size).",
    kind: ParamKind::Choice {
        choices: &[
            ChoiceDef {
                label: "One-Pass",
                value: "One-Pass",
            },
            ChoiceDef {
                label: "Two-Pass",
                value: "Two-Pass",
            },
        ],
    },
    flag: None,
    context: Context::Meta,
    resettable: false,
    unit: None,
    default: DefaultValue::Text("Two-Pass"),
};

const AUDIO_FILTER_VOLUME: ParamDef = ParamDef {
    key: "volume",
    label: "Volume",
    help: "Volume adjustment (e.g. 1.5 or 3dB).",
    kind: ParamKind::DirectInput { range: Range::Any },
    flag: Some("volume"),
    context: Context::AudioFilter,
    resettable: true,
    unit: None,
    default: DefaultValue::DontChange,
};

const AUDIO_CODEC_CHOICES: &[ChoiceDef] = &[
    ChoiceDef {
        label: "libopus",
        value: "libopus",
    },
    ChoiceDef {
        label: "libvorbis",
        value: "libvorbis",
    },
    ChoiceDef {
        label: "aac",
        value: "aac",
    },
];

const AUDIO_CODEC: ParamDef = ParamDef {
    key: "audio_codec",
    label: "Audio Codec",
    help: "Select audio codec",
    kind: ParamKind::Choice {
        choices: AUDIO_CODEC_CHOICES,
    },
    flag: Some("-c:a"),
    context: Context::AudioCodecSelector,
    resettable: false,
    unit: None,
    default: DefaultValue::Text("libopus"),
};

const AUDIO_BITRATE: ParamDef = ParamDef {
    key: "audio_bitrate",
    label: "Audio Bitrate",
    help: "Enter audio bitrate in kbps (6-510), e.g. 128 or 128k.",
    kind: ParamKind::DirectInput {
        range: Range::Kbps { min: 6, max: 510 },
    },
    flag: Some("-b:a"),
    context: Context::AudioCodecOption,
    resettable: false,
    unit: Some("k"),
    default: DefaultValue::Int(128),
};

const fn container(values: &'static [ChoiceDef], default: &'static str) -> ParamDef {
    ParamDef {
        key: "container",
        label: "Container",
        help: "Select container:",
        kind: ParamKind::Choice { choices: values },
        flag: None,
        context: Context::Meta,
        resettable: false,
        unit: None,
        default: DefaultValue::Text(default),
    }
}

const WEBM: ChoiceDef = ChoiceDef {
    label: "webm",
    value: "webm",
};
const MKV: ChoiceDef = ChoiceDef {
    label: "mkv",
    value: "mkv",
};
const MP4: ChoiceDef = ChoiceDef {
    label: "mp4",
    value: "mp4",
};
const MOV: ChoiceDef = ChoiceDef {
    label: "mov",
    value: "mov",
};
const TS: ChoiceDef = ChoiceDef {
    label: "ts",
    value: "ts",
};

const VP9_CONTAINERS: &[ChoiceDef] = &[WEBM, MKV, MP4];
const SVT_AV1_CONTAINERS: &[ChoiceDef] = &[MKV, MP4, WEBM];
const HEVC_CONTAINERS: &[ChoiceDef] = &[MP4, MKV, MOV, TS];

// ============================================================================
// VP9 (libvpx-vp9)
// ============================================================================

const VP9_PARAMS: &[ParamDef] = &[
    ParamDef {
        key: "crf",
        label: "CRF",
        help: "Quality control value. 0-63 (lower = better). 35 is good.",
        kind: ParamKind::DirectInput {
            range: Range::Int { min: 0, max: 63 },
        },
        flag: Some("-crf"),
        context: Context::VideoCodecOption,
        resettable: false,
        unit: None,
        default: DefaultValue::Int(35),
    },
    ParamDef {
        key: "video_bitrate",
        label: "Video Bitrate cap",
        help: "Target video bitrate. 0 = constant quality (recommended with CRF), or e.g. 2M.",
        kind: ParamKind::DirectInput { range: Range::Any },
        flag: Some("-b:v"),
        context: Context::VideoCodecOption,
        resettable: true,
        unit: None,
        default: DefaultValue::Int(0),
    },
    SCALE,
    SCALE_FLAGS,
    FPS,
    ParamDef {
        key: "deadline",
        label: "Deadline (Compression efficiency)",
        help: "Deadline (Compression efficiency)",
        kind: ParamKind::Choice {
            choices: &[
                ChoiceDef {
                    label: "good: the default and recommended for most applications",
                    value: "good",
                },
                ChoiceDef {
                    label: "best: recommended if you have lots of time and want the best compression efficiency",
                    value: "best",
                },
                ChoiceDef {
                    label: "realtime: recommended for live / fast encoding",
                    value: "realtime",
                },
            ],
        },
        flag: Some("-deadline"),
        context: Context::VideoCodecOption,
        resettable: false,
        unit: None,
        default: DefaultValue::Text("good"),
    },
    ParamDef {
        key: "cpu_used",
        label: "CPU used (speed)",
        help: "Encoder speed. 0-8 (lower = slower, better).",
        kind: ParamKind::DirectInput {
            range: Range::Int { min: 0, max: 8 },
        },
        flag: Some("-cpu-used"),
        context: Context::VideoCodecOption,
        resettable: true,
        unit: None,
        default: DefaultValue::DontChange,
    },
    PIXEL_FORMAT,
    PASSES,
    AUDIO_FILTER_VOLUME,
    AUDIO_CODEC,
    AUDIO_BITRATE,
    container(VP9_CONTAINERS, "webm"),
];

// ============================================================================
// SVT-AV1 (libsvtav1)
// ============================================================================

const SVT_AV1_PARAMS: &[ParamDef] = &[
    ParamDef {
        key: "crf",
        label: "CRF",
        help: "Quality control value. 0-63 (lower = better). 28 is good.",
        kind: ParamKind::DirectInput {
            range: Range::Int { min: 0, max: 63 },
        },
        flag: Some("-crf"),
        context: Context::VideoCodecOption,
        resettable: false,
        unit: None,
        default: DefaultValue::Int(28),
    },
    SCALE,
    SCALE_FLAGS,
    FPS,
    ParamDef {
        key: "preset",
        label: "Preset (Compression efficiency)",
        help: "Compression efficiency. 0-13. Lower is better.\nPreset 13 is only meant for debugging and running fast convex-hull encoding",
        kind: ParamKind::DirectInput {
            range: Range::Int { min: 0, max: 13 },
        },
        flag: Some("-preset"),
        context: Context::VideoCodecOption,
        resettable: false,
        unit: None,
        default: DefaultValue::Int(8),
    },
    ParamDef {
        key: "tune",
        label: "Tune",
        help: "0 = visual quality (VQ), 1 = PSNR, 2 = SSIM.",
        kind: ParamKind::DirectInput {
            range: Range::Enum {
                values: &["0", "1", "2"],
            },
        },
        flag: Some("tune"),
        context: Context::VendorSpecialOption,
        resettable: true,
        unit: None,
        default: DefaultValue::DontChange,
    },
    ParamDef {
        key: "film_grain",
        label: "Film grain synthesis",
        help: "Film grain denoising/synthesis strength. 0-50 (0 = off).",
        kind: ParamKind::DirectInput {
            range: Range::Int { min: 0, max: 50 },
        },
        flag: Some("film-grain"),
        context: Context::VendorSpecialOption,
        resettable: true,
        unit: None,
        default: DefaultValue::DontChange,
    },
    PIXEL_FORMAT,
    PASSES,
    AUDIO_FILTER_VOLUME,
    AUDIO_CODEC,
    AUDIO_BITRATE,
    container(SVT_AV1_CONTAINERS, "mkv"),
];

// ============================================================================
// HEVC / H.265 (libx265)
// ============================================================================

const HEVC_PARAMS: &[ParamDef] = &[
    ParamDef {
        key: "crf",
        label: "CRF",
        help: "Quality control value. 0-51 (lower = better). 23 is good.",
        kind: ParamKind::DirectInput {
            range: Range::Int { min: 0, max: 51 },
        },
        flag: Some("-crf"),
        context: Context::VideoCodecOption,
        resettable: false,
        unit: None,
        default: DefaultValue::Int(23),
    },
    SCALE,
    SCALE_FLAGS,
    FPS,
    ParamDef {
        key: "preset",
        label: "Preset (Compression efficiency)",
        help: "Compression efficiency",
        kind: ParamKind::Choice {
            choices: &[
                ChoiceDef {
                    label: "ultrafast",
                    value: "ultrafast",
                },
                ChoiceDef {
                    label: "superfast",
                    value: "superfast",
                },
                ChoiceDef {
                    label: "veryfast",
                    value: "veryfast",
                },
                ChoiceDef {
                    label: "faster",
                    value: "faster",
                },
                ChoiceDef {
                    label: "fast",
                    value: "fast",
                },
                ChoiceDef {
                    label: "medium",
                    value: "medium",
                },
                ChoiceDef {
                    label: "slow",
                    value: "slow",
                },
                ChoiceDef {
                    label: "slower",
                    value: "slower",
                },
                ChoiceDef {
                    label: "veryslow",
                    value: "veryslow",
                },
                ChoiceDef {
                    label: "placebo",
                    value: "placebo",
                },
            ],
        },
        flag: Some("-preset"),
        context: Context::VideoCodecOption,
        resettable: false,
        unit: None,
        default: DefaultValue::Text("medium"),
    },
    ParamDef {
        key: "aq_mode",
        label: "Adaptive quantization mode",
        help: "x265 aq-mode. 0 = off, 1 = variance, 2 = auto-variance, 3 = auto-variance biased to dark scenes, 4 = edge.",
        kind: ParamKind::DirectInput {
            range: Range::Enum {
                values: &["0", "1", "2", "3", "4"],
            },
        },
        flag: Some("aq-mode"),
        context: Context::VendorSpecialOption,
        resettable: true,
        unit: None,
        default: DefaultValue::DontChange,
    },
    ParamDef {
        key: "psy_rd",
        label: "Psycho-visual rate distortion",
        help: "x265 psy-rd strength. 0.0-5.0.",
        kind: ParamKind::DirectInput {
            range: Range::Float { min: 0.0, max: 5.0 },
        },
        flag: Some("psy-rd"),
        context: Context::VendorSpecialOption,
        resettable: true,
        unit: None,
        default: DefaultValue::DontChange,
    },
    PIXEL_FORMAT,
    PASSES,
    AUDIO_FILTER_VOLUME,
    AUDIO_CODEC,
    AUDIO_BITRATE,
    container(HEVC_CONTAINERS, "mp4"),
];

/// The profiles shipped with ffbatch, in menu order
pub fn builtin_profiles() -> Vec<CodecProfile> {
    vec![
        CodecProfile {
            name: "vp9",
            video_codec: "libvpx-vp9",
            vendor_flag: None,
            requires_even_dimensions: true,
            quality_key: "crf",
            pass_style: PassStyle::PassFlag,
            params: VP9_PARAMS,
        },
        CodecProfile {
            name: "svt-av1",
            video_codec: "libsvtav1",
            vendor_flag: Some("-svtav1-params"),
            requires_even_dimensions: true,
            quality_key: "crf",
            pass_style: PassStyle::PassFlag,
            params: SVT_AV1_PARAMS,
        },
        CodecProfile {
            name: "hevc",
            video_codec: "libx265",
            vendor_flag: Some("-x265-params"),
            requires_even_dimensions: true,
            quality_key: "crf",
            pass_style: PassStyle::VendorParam,
            params: HEVC_PARAMS,
        },
    ]
}
