// Global configuration and persisted per-profile settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::engine::core::Settings;
use crate::engine::params::{CodecProfile, Registry};

pub const APP_NAME: &str = "ffbatch";
pub const CONFIG_FILE: &str = "config.toml";
pub const OPTIONS_FILE: &str = "options.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Profile used with --skip-menu when --codec is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Directory receiving encoded files (relative to the working directory)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Offer to open the output directory when an interactive batch finishes
    #[serde(default = "default_true_config")]
    pub open_output_dir: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true_config() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            profile: None,
            output_dir: default_output_dir(),
            open_output_dir: true,
        }
    }
}

impl Config {
    /// Directory holding config.toml and options.json
    pub fn config_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }

        let dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join(APP_NAME)
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join(APP_NAME)
        };

        Ok(dir)
    }

    /// Load config from `dir`, or create the default file if it doesn't exist
    pub fn load_from(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;

            let config: Config = toml::from_str(&contents).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?;

            Ok(config)
        } else {
            let config = Config::default();

            // A read-only config directory is not fatal
            if let Err(e) = config.save_to(dir) {
                warn!("Could not create default config file: {:#}", e);
            }

            Ok(config)
        }
    }

    /// Save config to `dir`
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let config_path = dir.join(CONFIG_FILE);
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }
}

/// options.json: profile name -> parameter key -> value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsFile {
    path: PathBuf,
    profiles: BTreeMap<String, Settings>,
}

impl OptionsFile {
    /// Hard-coded defaults of every registry profile
    pub fn defaults(registry: &Registry, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            profiles: registry
                .profiles()
                .iter()
                .map(|p| (p.name.to_string(), Settings::defaults_for(p)))
                .collect(),
        }
    }

    /// Read the file, writing it from registry defaults first when missing
    pub fn load_or_create(path: &Path, registry: &Registry) -> Result<Self> {
        if !path.exists() {
            let options = Self::defaults(registry, path);
            options.save()?;
            info!("Created {} at {}", OPTIONS_FILE, path.display());
            return Ok(options);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {}", path.display()))?;
        let profiles: BTreeMap<String, Settings> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse options file: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            profiles,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored settings of a profile. A profile missing from the file
    /// (e.g. added after the file was written) gets its built-in defaults.
    pub fn settings_for(&self, profile: &CodecProfile) -> Settings {
        match self
            .profiles
            .iter()
            .find(|(name, _)| profile.matches_name(name))
        {
            Some((_, settings)) => settings.clone(),
            None => {
                debug!("No stored settings for {}, using defaults", profile.name);
                Settings::defaults_for(profile)
            }
        }
    }

    pub fn store(&mut self, profile: &CodecProfile, settings: &Settings) {
        self.profiles.retain(|name, _| !profile.matches_name(name));
        self.profiles
            .insert(profile.name.to_string(), settings.clone());
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create options directory: {}", parent.display())
            })?;
        }

        let contents =
            serde_json::to_string_pretty(&self.profiles).context("Failed to serialize options")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write options file: {}", self.path.display()))?;

        Ok(())
    }
}
