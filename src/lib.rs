//! svg-icon - color-adaptive svg icon components with deduplicated rendering.
//!
//! Two consumers share one normalization and identity core:
//!
//! - [`transform`]: build time, one svg file to one component module
//! - [`registry`]: run time, icon text to a shared sprite symbol or an
//!   inline fragment, cached by content identity

pub mod cli;
pub mod config;
pub mod logger;
pub mod registry;
pub mod svg;
pub mod transform;

pub use registry::{IconProps, IconRegistry, InlineEntry, RenderedIcon, SymbolEntry};
pub use svg::{ContentIdentity, identity, normalize};
pub use transform::{GeneratedComponent, TransformError, Transformer};
