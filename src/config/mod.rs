//! Project configuration for `svg-icon.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build], [build.compiler]
//! │   └── registry   # [registry]
//! ├── error          # ConfigError
//! ├── util           # Config file discovery
//! └── mod.rs         # IconConfig (this file)
//! ```
//!
//! The config file is optional. Without one, defaults apply and the project
//! root is the working directory.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{BuildConfig, CompilerConfig, CompilerKind, RegistryConfig};

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use util::find_config_file;

/// Default config file name.
pub const CONFIG_FILE: &str = "svg-icon.toml";

/// Root configuration structure representing svg-icon.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconConfig {
    /// Config file actually loaded, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root: the config file's directory, else the working directory
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub registry: RegistryConfig,
}

impl IconConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from the working directory, then applies
    /// command-line overrides and validates the result.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let mut config = Self::discover(&cli.config, &cwd)?;
        config.apply_command_options(&cli.command);
        config.validate()?;
        Ok(config)
    }

    /// Find and load `config_name` starting from `start`.
    ///
    /// A missing default config falls back to defaults; an explicitly named
    /// one that can't be found is an error.
    pub fn discover(config_name: &Path, start: &Path) -> Result<Self, ConfigError> {
        let mut config = match find_config_file(config_name, start) {
            Some(path) => {
                debug!("config"; "loading {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None if config_name == Path::new(CONFIG_FILE) => {
                debug!("config"; "no {CONFIG_FILE} found, using defaults");
                Self::default()
            }
            None => return Err(ConfigError::NotFound(config_name.to_path_buf())),
        };

        let root = config
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| start.to_path_buf(), Path::to_path_buf);
        config.normalize_paths(&root);
        config.root = root;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Resolve `[build]` directories against the project root.
    fn normalize_paths(&mut self, root: &Path) {
        self.build.input = root.join(&self.build.input);
        self.build.output = root.join(&self.build.output);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build.validate()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, command: &Commands) {
        match command {
            Commands::Build { args } => {
                if let Some(output) = &args.output {
                    self.build.output = output.clone();
                }
                Self::update_option(&mut self.build.optimize, args.optimize.as_ref());
            }
            Commands::Sprite { args } => {
                Self::update_option(&mut self.registry.colorless, args.colorless.as_ref());
            }
            Commands::Inline { args } | Commands::Id { args } => {
                Self::update_option(&mut self.registry.colorless, args.colorless.as_ref());
            }
            Commands::Render { args } => {
                Self::update_option(&mut self.registry.colorless, args.icon.colorless.as_ref());
                Self::update_option(&mut self.registry.inline, args.inline.as_ref());
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}
