//! `[registry]` section configuration.
//!
//! Default icon props for the `sprite`, `inline`, `render` and `id` commands.
//!
//! ```toml
//! [registry]
//! colorless = true
//! inline = false
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Rewrite paint to `currentColor`.
    pub colorless: bool,
    /// Render inline fragments instead of symbol references.
    pub inline: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            colorless: true,
            inline: false,
        }
    }
}
