//! Template compiler strategies.
//!
//! The wrapper template is handed to a [`TemplateCompiler`] selected once at
//! startup from `[build.compiler]`:
//!
//! | kind       | implementation      | output                          |
//! |------------|---------------------|---------------------------------|
//! | `template` | [`EmbeddedTemplate`]| markup kept as a `template:`    |
//! | `command`  | [`CommandCompiler`] | render function from a program  |

use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::config::{CompilerConfig, CompilerKind};
use crate::debug;

use super::TransformError;

/// Errors reported by a template compiler.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to run `{program}`: {error}")]
    Spawn {
        program: String,
        error: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("`{program}` produced no render code")]
    EmptyOutput { program: String },

    #[error("`{program}` produced non-UTF-8 output")]
    InvalidOutput { program: String },
}

/// Shape of the compiled output, which also decides the wrapper style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateVariant {
    /// Executable render code defining `render`.
    RenderFunction,
    /// Markup compiled by the framework at runtime.
    Template,
}

/// Result of compiling one wrapper template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledTemplate {
    RenderFunction(String),
    Template(String),
}

/// Turns a wrapper template into component code.
pub trait TemplateCompiler: Send + Sync {
    fn variant(&self) -> TemplateVariant;

    /// `filename` is the source path; `id` is its scope id.
    fn compile(
        &self,
        template: &str,
        filename: &str,
        id: &str,
    ) -> Result<CompiledTemplate, CompileError>;
}

/// Keeps markup as-is; the component ships its template.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedTemplate;

impl TemplateCompiler for EmbeddedTemplate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Template
    }

    fn compile(
        &self,
        template: &str,
        _filename: &str,
        _id: &str,
    ) -> Result<CompiledTemplate, CompileError> {
        Ok(CompiledTemplate::Template(template.to_string()))
    }
}

/// External program that reads a template on stdin and prints render code.
///
/// Invoked as `<command..> --filename <path> --id <scope>`.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CommandCompiler {
    /// Resolve the program on `PATH`; a missing program fails here, not at first use.
    pub fn new(command: &[String]) -> Result<Self, TransformError> {
        let Some((program, args)) = command.split_first() else {
            return Err(TransformError::DependencyMissing {
                program: String::new(),
                hint: "set `build.compiler.command` in svg-icon.toml".to_string(),
            });
        };

        let resolved = which::which(program).map_err(|_| TransformError::DependencyMissing {
            program: program.clone(),
            hint: format!(
                "install `{program}` or set `build.compiler.kind = \"template\"` in svg-icon.toml"
            ),
        })?;
        debug!("compiler"; "using {}", resolved.display());

        Ok(Self {
            program: resolved,
            args: args.iter().map(OsString::from).collect(),
        })
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }
}

impl TemplateCompiler for CommandCompiler {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::RenderFunction
    }

    fn compile(
        &self,
        template: &str,
        filename: &str,
        id: &str,
    ) -> Result<CompiledTemplate, CompileError> {
        let name = self.program_name();
        let spawn_error = |error| CompileError::Spawn {
            program: name.clone(),
            error,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(["--filename", filename, "--id", id])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Feed stdin from a scoped thread so a chatty child can't fill its
        // stdout pipe while we block on the write
        let stdin = child.stdin.take();
        let (written, output) = std::thread::scope(|scope| {
            let writer = stdin.map(|mut stdin| {
                scope.spawn(move || stdin.write_all(template.as_bytes()))
            });
            let output = child.wait_with_output();
            let written = match writer.map(|handle| handle.join()) {
                Some(Ok(result)) => result,
                Some(Err(_)) => Err(std::io::Error::other("stdin writer panicked")),
                None => Ok(()),
            };
            (written, output)
        });
        let output = output.map_err(spawn_error)?;

        // A child that exits without draining stdin is judged by its status
        if let Err(error) = written
            && error.kind() != ErrorKind::BrokenPipe
        {
            return Err(spawn_error(error));
        }

        if !output.status.success() {
            return Err(CompileError::Failed {
                program: name,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let code = String::from_utf8(output.stdout)
            .map_err(|_| CompileError::InvalidOutput {
                program: name.clone(),
            })?
            .trim()
            .to_string();
        if code.is_empty() {
            return Err(CompileError::EmptyOutput { program: name });
        }

        Ok(CompiledTemplate::RenderFunction(code))
    }
}

/// Build the compiler selected by config.
pub fn from_config(config: &CompilerConfig) -> Result<Box<dyn TemplateCompiler>, TransformError> {
    match config.kind {
        CompilerKind::Template => Ok(Box::new(EmbeddedTemplate)),
        CompilerKind::Command => Ok(Box::new(CommandCompiler::new(&config.command)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_template_passthrough() {
        let out = EmbeddedTemplate.compile("<svg/>", "a.svg", "x").unwrap();
        assert_eq!(out, CompiledTemplate::Template("<svg/>".to_string()));
        assert_eq!(EmbeddedTemplate.variant(), TemplateVariant::Template);
    }

    #[test]
    fn test_missing_program_fails_fast() {
        let err = CommandCompiler::new(&["svg-icon-no-such-compiler-xyz".to_string()]).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, TransformError::DependencyMissing { .. }));
        assert!(message.contains("svg-icon-no-such-compiler-xyz"));
        assert!(message.contains("build.compiler.kind"));
    }

    #[test]
    fn test_empty_command_fails_fast() {
        assert!(matches!(
            CommandCompiler::new(&[]),
            Err(TransformError::DependencyMissing { .. })
        ));
    }

    #[test]
    fn test_from_config_default_is_embedded() {
        let compiler = from_config(&CompilerConfig::default()).unwrap();
        assert_eq!(compiler.variant(), TemplateVariant::Template);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_compiler_reads_stdout() {
        // `sh -c` binds the trailing --filename/--id args to $0.. and ignores them
        let compiler = CommandCompiler::new(&[
            "sh".to_string(),
            "-c".to_string(),
            "echo 'function render() {}'; cat >/dev/null".to_string(),
        ])
        .unwrap();
        let out = compiler.compile("<svg/>", "a.svg", "id").unwrap();
        assert_eq!(
            out,
            CompiledTemplate::RenderFunction("function render() {}".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_command_compiler_failure_carries_stderr() {
        let compiler = CommandCompiler::new(&[
            "sh".to_string(),
            "-c".to_string(),
            "echo 'unexpected token' >&2; exit 3".to_string(),
        ])
        .unwrap();
        let err = compiler.compile("<svg/>", "a.svg", "id").unwrap_err();
        assert!(matches!(err, CompileError::Failed { .. }));
        assert!(err.to_string().contains("unexpected token"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_compiler_receives_whole_template() {
        // Echo stdin back as the render code
        let compiler =
            CommandCompiler::new(&["sh".to_string(), "-c".to_string(), "cat".to_string()])
                .unwrap();
        let template = format!("<svg>{}</svg>", "<path d=\"M0 0\"/>".repeat(20_000));
        let out = compiler.compile(&template, "a.svg", "id").unwrap();
        assert_eq!(out, CompiledTemplate::RenderFunction(template));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_compiler_ignores_unread_stdin() {
        let compiler = CommandCompiler::new(&[
            "sh".to_string(),
            "-c".to_string(),
            "echo 'function render() {}'".to_string(),
        ])
        .unwrap();
        let template = "<svg/>".repeat(100_000);
        assert!(compiler.compile(&template, "a.svg", "id").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_compiler_empty_output() {
        let compiler = CommandCompiler::new(&[
            "sh".to_string(),
            "-c".to_string(),
            "cat >/dev/null".to_string(),
        ])
        .unwrap();
        assert!(matches!(
            compiler.compile("<svg/>", "a.svg", "id"),
            Err(CompileError::EmptyOutput { .. })
        ));
    }
}
