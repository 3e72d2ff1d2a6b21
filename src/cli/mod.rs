//! Command-line interface module.

mod args;
pub mod build;
pub mod common;
pub mod inspect;
pub mod sprite;

pub use args::{BuildArgs, Cli, Commands, IconArgs, RenderArgs, SpriteArgs};
