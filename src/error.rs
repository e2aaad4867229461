use std::path::{Path, PathBuf};

use thiserror::Error;


pub type Result<T> = std::result::Result<T, ErrorKind>;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("invalid options: {}", .0)]
    Options(ErrorKind),

    #[error("step '{step}' failed: {source}")]
    Step { step: &'static str, source: ErrorKind },
}

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unable to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("{}", .0)]
    Validation(String),

    #[error("`{command}` failed: {reason}")]
    ExternalTool { command: String, reason: String },

    #[error("io error on {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("terminal error: {}", .0)]
    Terminal(std::io::Error),

    #[error("unable to scan directory: {}", .0)]
    Walkdir(#[from]walkdir::Error),

    #[error("serializing failed: {}", .0)]
    Serde(#[from]serde_json::Error),
}

impl ErrorKind {
    /// Builds a `map_err` adapter that attaches `path` to an io error.
    pub fn io(path: &Path) -> impl FnOnce(std::io::Error) -> ErrorKind + '_ {
        move |source| ErrorKind::Io { path: path.to_path_buf(), source }
    }

    /// Whether this kind of failure aborts the run regardless of the step it happened in.
    pub fn is_critical(&self) -> bool {
        !matches!(self, ErrorKind::ExternalTool { .. })
    }
}
