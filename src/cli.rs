use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ffbatch")]
#[command(about = "Batch FFmpeg converter with per-codec settings menus", long_about = None)]
pub struct Cli {
    /// Video files or directories to convert
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Codec profile to use (vp9, svt-av1, hevc); asks when omitted
    #[arg(long, value_name = "NAME")]
    pub codec: Option<String>,

    /// Use stored settings without showing the settings menu
    #[arg(long)]
    pub skip_menu: bool,

    /// Directory for converted files (overrides config)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the ffmpeg commands without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Store the edited settings as the profile's new defaults
    #[arg(long)]
    pub save_defaults: bool,

    /// Don't open the output directory when done
    #[arg(long)]
    pub no_open: bool,

    /// Directory holding config.toml and options.json
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check if ffmpeg is installed
    CheckFfmpeg,

    /// List codec profiles and their parameters
    ListProfiles,

    /// Show config location, or create default config and options files
    InitConfig {
        /// Rewrite options.json from built-in defaults
        #[arg(long)]
        force: bool,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
