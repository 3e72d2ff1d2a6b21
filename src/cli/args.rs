//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::svg::OptimizeMode;

/// Color-adaptive svg icon components and sprite sheets
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: svg-icon.toml, searched upward)
    #[arg(short = 'C', long, global = true, default_value = "svg-icon.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate one component module per svg file
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Register icons in a symbol container and write the sprite sheet
    #[command(visible_alias = "s")]
    Sprite {
        #[command(flatten)]
        args: SpriteArgs,
    },

    /// Print an icon's normalized inline fragment as JSON
    Inline {
        #[command(flatten)]
        args: IconArgs,
    },

    /// Print the usage-site markup an icon component renders
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },

    /// Print an icon's content identity
    Id {
        #[command(flatten)]
        args: IconArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Files or directories to transform. If omitted, uses `build.input`.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Output directory (overrides `build.output`)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Optimizer pre-pass (overrides `build.optimize`)
    #[arg(long, value_enum)]
    pub optimize: Option<OptimizeMode>,
}

/// Sprite command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct SpriteArgs {
    /// Files or directories to register. If omitted, uses `build.input`.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Write the sprite sheet to a file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Rewrite paint to currentColor (overrides `registry.colorless`)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub colorless: Option<bool>,
}

/// Arguments for single-icon commands.
#[derive(clap::Args, Debug, Clone)]
pub struct IconArgs {
    /// Svg file to inspect
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Rewrite paint to currentColor (overrides `registry.colorless`)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub colorless: Option<bool>,
}

/// Render command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub icon: IconArgs,

    /// Render the inline fragment instead of a symbol reference (overrides `registry.inline`)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub inline: Option<bool>,
}
