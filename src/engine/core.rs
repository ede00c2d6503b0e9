mod ffmpeg_cmd;
mod ffmpeg_info;
mod log;
mod scan;
mod settings;
mod types;

pub use ffmpeg_cmd::{FFMPEG_BIN, compile, derive_output_path};
pub use ffmpeg_info::ffmpeg_version;
pub use log::init_logging;
pub use scan::{InputSet, collect_inputs, is_video_file, scan};
pub use settings::{DONT_CHANGE, SettingValue, Settings};
pub use types::{
    ConfigurationError, EncodePlan, FfmpegCommand, ONE_PASS, PassMode, ResolutionFix, TWO_PASS,
};
