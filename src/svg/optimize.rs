//! Optional optimizer pre-pass.
//!
//! The transformer expects pre-optimized input. When the host has no optimizer
//! of its own, `usvg` can fill in: it re-parses the document and writes back a
//! semantically equivalent, whitespace-minimal SVG.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Which optimizer runs before the transformer sees the text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeMode {
    /// Text is already optimized upstream.
    #[default]
    None,
    /// Re-write through usvg.
    Usvg,
}

/// An optimizer pre-pass.
pub trait Optimizer: Send + Sync {
    fn optimize(&self, source: &str) -> Result<String>;
}

/// Returns the input unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Optimizer for Passthrough {
    fn optimize(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// usvg-backed optimizer.
#[derive(Debug, Clone)]
pub struct UsvgOptimizer {
    /// DPI for unit conversion.
    pub dpi: f32,
}

impl Default for UsvgOptimizer {
    fn default() -> Self {
        Self { dpi: 96.0 }
    }
}

impl Optimizer for UsvgOptimizer {
    fn optimize(&self, source: &str) -> Result<String> {
        let usvg_options = usvg::Options {
            dpi: self.dpi,
            ..Default::default()
        };

        let tree = usvg::Tree::from_data(source.as_bytes(), &usvg_options)
            .context("Failed to parse SVG")?;

        let write_options = usvg::WriteOptions {
            indent: usvg::Indent::None,
            ..Default::default()
        };

        Ok(tree.to_string(&write_options))
    }
}

impl OptimizeMode {
    /// Build the optimizer for this mode.
    pub fn optimizer(self) -> Box<dyn Optimizer> {
        match self {
            Self::None => Box::new(Passthrough),
            Self::Usvg => Box::new(UsvgOptimizer::default()),
        }
    }
}
