use anyhow::{Context, Result};
use chrono::{Local, TimeDelta};
use ffbatch::config::{Config, OPTIONS_FILE, OptionsFile};
use ffbatch::engine::params::{CodecProfile, Registry, SCALE_FIX_KEY, validate_settings};
use ffbatch::engine::platform;
use ffbatch::engine::worker::{CommandRunner, DryRunner, ProcessRunner, run_batch};
use ffbatch::engine::{self, ResolutionFix, SettingValue};
use ffbatch::ui::{self, Console, StdConsole};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::cli::{Cli, Commands};

const WINDOW_TITLE: &str = "ffbatch";

pub fn run(cli: Cli) -> Result<()> {
    let config_dir = Config::config_dir(cli.config_dir.as_deref())?;

    if let Some(command) = &cli.command {
        return match command {
            Commands::CheckFfmpeg => handle_check_ffmpeg(),
            Commands::ListProfiles => handle_list_profiles(),
            Commands::InitConfig { force } => handle_init_config(&config_dir, *force),
        };
    }

    handle_batch(&cli, &config_dir)
}

fn handle_check_ffmpeg() -> Result<()> {
    let version = engine::ffmpeg_version()?;
    println!("ffmpeg found: {}", version);
    Ok(())
}

fn handle_list_profiles() -> Result<()> {
    let registry = Registry::builtin()?;
    for profile in registry.profiles() {
        println!("{}", profile);
        let keys: Vec<_> = profile.params.iter().map(|p| p.key).collect();
        println!("  {}", keys.join(", "));
    }
    Ok(())
}

fn handle_init_config(config_dir: &Path, force: bool) -> Result<()> {
    let registry = Registry::builtin()?;

    let config = Config::load_from(config_dir)?;
    println!("Config: {}", config_dir.join(ffbatch::config::CONFIG_FILE).display());
    println!("{:#?}", config.defaults);

    let options_path = config_dir.join(OPTIONS_FILE);
    if force || !options_path.exists() {
        OptionsFile::defaults(&registry, &options_path).save()?;
        println!("Default options written to {}", options_path.display());
    } else {
        println!("Options: {}", options_path.display());
    }
    Ok(())
}

/// --codec, else the configured default, else ask
fn select_profile<'r>(
    cli: &Cli,
    config: &Config,
    registry: &'r Registry,
    console: &mut impl Console,
) -> Result<&'r CodecProfile> {
    let requested = cli
        .codec
        .as_deref()
        .or(config.defaults.profile.as_deref());

    if let Some(name) = requested {
        match registry.lookup(name) {
            Some(profile) => return Ok(profile),
            None if cli.skip_menu => {
                let known: Vec<_> = registry.names().collect();
                anyhow::bail!("Unknown codec '{}' (available: {})", name, known.join(", "));
            }
            None => console.print(&format!("Unknown codec '{}'", name))?,
        }
    } else if cli.skip_menu {
        anyhow::bail!("No codec selected: pass --codec or set defaults.profile in the config");
    }

    ui::choose_profile(registry, console)?.context("No codec selected")
}

fn format_elapsed(elapsed: TimeDelta) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

fn handle_batch(cli: &Cli, config_dir: &Path) -> Result<()> {
    let config = Config::load_from(config_dir)?;
    let registry = Registry::builtin().context("Built-in codec profiles are inconsistent")?;
    let mut options = OptionsFile::load_or_create(&config_dir.join(OPTIONS_FILE), &registry)?;
    let mut console = StdConsole;

    if cli.files.is_empty() && !cli.save_defaults {
        anyhow::bail!("No input files. Pass video files or directories to convert");
    }

    if !cli.dry_run {
        let version = engine::ffmpeg_version()?;
        info!("Using {}", version);
    }

    if let Err(e) = platform::set_terminal_title(WINDOW_TITLE) {
        debug!("Could not set terminal title: {}", e);
    }

    let profile = select_profile(cli, &config, &registry, &mut console)?;
    info!("Selected profile {}", profile);

    let mut settings = options.settings_for(profile);
    if profile.requires_even_dimensions && !settings.contains(SCALE_FIX_KEY) {
        settings.set(SCALE_FIX_KEY, SettingValue::text(ResolutionFix::Pad.value()));
    }

    if !cli.skip_menu {
        ui::edit_settings(profile, &mut settings, &mut console)?;
    }

    if cli.save_defaults {
        options.store(profile, &settings);
        options.save()?;
        println!(
            "Saved {} defaults to {}",
            profile.name,
            options.path().display()
        );
        if cli.files.is_empty() {
            return Ok(());
        }
    }

    for warning in validate_settings(profile, &settings) {
        warn!("{}", warning);
    }

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.defaults.output_dir.clone());
    if !cli.dry_run {
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;
    }

    let inputs = engine::collect_inputs(&cli.files)?;
    for missing in &inputs.missing {
        println!("File not found: {}", missing.display());
    }
    if inputs.files.is_empty() {
        anyhow::bail!("No video files to convert");
    }

    let started = Local::now();
    let mut runner: Box<dyn CommandRunner> = if cli.dry_run {
        Box::new(DryRunner::default())
    } else {
        Box::new(ProcessRunner)
    };
    let summary = run_batch(
        &inputs.files,
        |input| engine::compile(profile, &settings, input, &output_dir),
        runner.as_mut(),
        |_, command| {
            if cli.dry_run {
                println!("{}", command);
            } else {
                println!("Running: {}", command);
            }
        },
    )?;

    println!(
        "All done! {} succeeded, {} failed. Total processing time: {}",
        summary.succeeded(),
        summary.failed(),
        format_elapsed(Local::now() - started)
    );

    let offer_open = !(cli.no_open || cli.skip_menu || cli.dry_run)
        && config.defaults.open_output_dir;
    if offer_open {
        console.read_line("Press Enter to open the output folder...")?;
        if let Err(e) = platform::open_directory(&output_dir) {
            warn!("{:#}", e);
        }
    }

    if summary.failed() > 0 {
        anyhow::bail!(
            "{} of {} files failed",
            summary.failed(),
            summary.reports.len()
        );
    }
    Ok(())
}
