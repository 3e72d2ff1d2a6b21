//! Build-time transformer: one SVG file in, one component module out.
//!
//! # Steps
//!
//! ```text
//! source ─► optimize ─► parse ─► normalize(colorless) ─► inner markup ─┐
//!                                     │                                 │
//!                                     └─► root attrs (no width/height) ─┤
//!                                                                       ▼
//!   path ─► component name                                  wrapper template
//!   path ─► scope id ──────────────────────────────────────► compile ─► code
//! ```
//!
//! A [`Transformer`] holds no per-file state. The compiler strategy is chosen
//! once in [`Transformer::new`] and shared by reference across parallel
//! transforms.

pub mod compiler;
pub mod template;

pub use compiler::{
    CommandCompiler, CompileError, CompiledTemplate, EmbeddedTemplate, TemplateCompiler,
    TemplateVariant,
};
pub use template::{attribute_string, component_name, wrapper_template};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::BuildConfig;
use crate::svg::{self, ContentIdentity, Optimizer, ParseError, identity, scope_id};

/// Build-time failures. All of them fail the build.
#[derive(Debug, Error)]
pub enum TransformError {
    // NOTE: messages are inlined instead of chained with #[source], which
    // would print them twice through anyhow's `{:#}`
    #[error("invalid svg `{}`: {error}", path.display())]
    Parse { path: PathBuf, error: ParseError },

    #[error("template compilation failed for `{}`: {error}", path.display())]
    Compile { path: PathBuf, error: CompileError },

    #[error("optimizer rejected `{}`: {message}", path.display())]
    Optimize { path: PathBuf, message: String },

    #[error("`{program}` not found\n  hint: {hint}")]
    DependencyMissing { program: String, hint: String },

    #[error("IO error when accessing `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
}

/// One generated component module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedComponent {
    /// Path-derived, e.g. `SvgArrowLeft`.
    pub name: String,
    /// Content-derived, colorless mode. Byte-identical files share it.
    pub identity: ContentIdentity,
    /// Escaped root attributes spliced into the wrapper.
    pub attributes: String,
    /// Module source text.
    pub code: String,
}

pub struct Transformer {
    compiler: Box<dyn TemplateCompiler>,
    optimizer: Box<dyn Optimizer>,
}

impl Transformer {
    pub fn new(compiler: Box<dyn TemplateCompiler>, optimizer: Box<dyn Optimizer>) -> Self {
        Self {
            compiler,
            optimizer,
        }
    }

    /// Resolve the compiler and optimizer selected by `[build]`.
    ///
    /// A configured compiler program missing from `PATH` fails here, before
    /// any file is read.
    pub fn from_config(config: &BuildConfig) -> Result<Self, TransformError> {
        let compiler = compiler::from_config(&config.compiler)?;
        Ok(Self::new(compiler, config.optimize.optimizer()))
    }

    pub fn variant(&self) -> TemplateVariant {
        self.compiler.variant()
    }

    /// Read `path` and transform its contents.
    pub fn transform_file(&self, path: &Path) -> Result<GeneratedComponent, TransformError> {
        let source = std::fs::read_to_string(path)
            .map_err(|err| TransformError::Io(path.to_path_buf(), err))?;
        self.transform(&source, path)
    }

    pub fn transform(&self, source: &str, path: &Path) -> Result<GeneratedComponent, TransformError> {
        let optimized =
            self.optimizer
                .optimize(source)
                .map_err(|err| TransformError::Optimize {
                    path: path.to_path_buf(),
                    message: format!("{err:#}"),
                })?;

        let mut doc = svg::parse(&optimized).map_err(|error| TransformError::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        svg::normalize(&mut doc.root, true);

        let inner = doc.root.inner_markup();
        let attributes = attribute_string(&doc.root.attrs);
        let name = component_name(path);
        let template = wrapper_template(&attributes, &inner, self.compiler.variant());

        let filename = path.to_string_lossy();
        let compiled = self
            .compiler
            .compile(&template, &filename, &scope_id(&filename))
            .map_err(|error| TransformError::Compile {
                path: path.to_path_buf(),
                error,
            })?;

        Ok(GeneratedComponent {
            code: component_code(&name, &compiled),
            identity: identity(source, true),
            name,
            attributes,
        })
    }
}

fn component_code(name: &str, compiled: &CompiledTemplate) -> String {
    match compiled {
        CompiledTemplate::RenderFunction(code) => format!(
            "{code}\n\nexport default {{\n  name: '{name}',\n  render: render\n}}\n"
        ),
        CompiledTemplate::Template(markup) => {
            // A JSON string is a valid JS string literal
            let literal = serde_json::Value::from(markup.as_str()).to_string();
            format!("export default {{\n  name: '{name}',\n  template: {literal}\n}}\n")
        }
    }
}
