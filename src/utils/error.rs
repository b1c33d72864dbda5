// Common error types for UVT

use std::path::PathBuf;

/// Every failure uvt itself can produce.
///
/// A wrapped command that exits non-zero is not an error: its exit code is
/// returned to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum UvtError {
    /// The wrapped binary could not be located
    #[error("Could not find uv binary")]
    BinaryNotFound,

    /// The template file is missing from the project directory
    #[error("Template file not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// The subcommand is not one that gets templating
    #[error("Unsupported command: {0}")]
    UnsupportedCommand(String),

    /// A filesystem operation failed
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child process could not be started
    #[error("Failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid project configuration or command-line input
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON output could not be produced
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UvtError {
    /// Build an `Io` error for `path`
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, UvtError>;

/// A user-facing rendering of a [`UvtError`] plus the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    pub message: String,
    pub hint: Option<String>,
    pub exit_code: i32,
}

impl UserError {
    /// Translate an internal error into something worth printing
    pub fn from_uvt_error(err: &UvtError) -> Self {
        let hint = match err {
            UvtError::BinaryNotFound => Some(
                "Install uv (https://docs.astral.sh/uv/) or point uvt at it with --uv <PATH> or UVT_UV_BIN."
                    .to_string(),
            ),
            UvtError::TemplateNotFound(_) => Some(
                "Create the template next to your project, or name another one with --template <FILE>."
                    .to_string(),
            ),
            UvtError::UnsupportedCommand(_) => Some(
                "Only `sync` is templated by default. Add more subcommands to `commands` in uvt.toml."
                    .to_string(),
            ),
            _ => None,
        };

        Self {
            message: err.to_string(),
            hint,
            exit_code: 1,
        }
    }

    /// Write the message (and hint, if any) to stderr
    pub fn print(&self) {
        eprintln!("{}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("\n{hint}");
        }
    }
}
