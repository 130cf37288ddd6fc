use std::path::PathBuf;

use inquire::InquireError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error when an interactive prompt fails or is aborted
    #[error("inquire error: {0}")]
    Inquire(#[from] InquireError),
    /// Error when executing Git commands
    #[error("git command failed: {0}")]
    GitCommand(String),
    /// Error when the project path is not inside a Git work tree
    #[error("not in git repository")]
    NotInGitRepository,
    /// Error during input validation
    #[error("validation error: {0}")]
    Validation(String),
    /// Error when a profile name is not present in the profiles file
    #[error("profile not found: '{0}'")]
    ProfileNotFound(String),
    /// Error when `~` cannot be expanded
    #[error("failed to find the home directory")]
    HomeDirNotFound,
    /// Malformed line in the profiles file
    #[error("{}:{line}: {message}", .path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        message: String,
    },
    /// Profile section lacking one of its two keys
    #[error("{}: profile '{profile}' is missing '{key}'", .path.display())]
    MissingKey {
        path: PathBuf,
        profile: String,
        key: &'static str,
    },
    /// Error during UTF-8 conversion
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

impl AppError {
    /// True when the user aborted an interactive prompt (Ctrl-C or Esc)
    pub fn is_interruption(&self) -> bool {
        matches!(
            self,
            AppError::Inquire(InquireError::OperationInterrupted | InquireError::OperationCanceled)
        )
    }
}
