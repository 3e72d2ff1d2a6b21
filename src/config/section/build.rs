//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! input = "icons"         # Directory scanned for *.svg
//! output = "components"   # Generated modules land here
//! extension = "js"        # Extension of generated modules
//! optimize = "none"       # Optimizer pre-pass: none | usvg
//!
//! [build.compiler]
//! kind = "command"        # template | command
//! command = ["vue-template-compile"]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::svg::OptimizeMode;

/// How the wrapper template becomes component code.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompilerKind {
    /// Ship the markup as a runtime-compiled `template`.
    #[default]
    Template,
    /// Pipe the markup through an external compiler program.
    Command,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub kind: CompilerKind,

    /// Program and leading arguments, used when `kind = "command"`.
    ///
    /// `--filename <path> --id <scope>` are appended on every call.
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub extension: String,
    pub optimize: OptimizeMode,
    pub compiler: CompilerConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: "icons".into(),
            output: "components".into(),
            extension: "js".to_string(),
            optimize: OptimizeMode::None,
            compiler: CompilerConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Structural checks only. Program lookup happens when the transformer
    /// is built, so commands that never compile don't need it installed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compiler.kind == CompilerKind::Command && self.compiler.command.is_empty() {
            return Err(ConfigError::Validation(
                "`build.compiler.command` must be set when `build.compiler.kind = \"command\"`"
                    .to_string(),
            ));
        }

        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "`build.extension` is not a valid file extension: {:?}",
                self.extension
            )));
        }

        Ok(())
    }

    /// Extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}
