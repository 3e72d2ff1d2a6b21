//! Configuration sections of `svg-icon.toml`.

mod build;
mod registry;

pub use build::{BuildConfig, CompilerConfig, CompilerKind};
pub use registry::RegistryConfig;
