// Common error types for csvbump

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    /// An expected input file or fragment is missing
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The version directory for the new release is already present
    #[error("Target already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// The manifest text does not have the shape the upgrade relies on
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl UpgradeError {
    /// Classify an IO failure on `path`, keeping the not-found and
    /// already-exists cases distinguishable for callers.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path: path.to_path_buf() },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path: path.to_path_buf() },
            _ => Self::Io { path: path.to_path_buf(), source: err },
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, UpgradeError>;

/// User-facing rendering of an error, with the process exit code it maps to
#[derive(Debug)]
pub struct UserError {
    pub message: String,
    pub hint: Option<String>,
    pub exit_code: i32,
}

impl UserError {
    pub fn from_upgrade_error(err: &UpgradeError) -> Self {
        let (exit_code, hint) = match err {
            UpgradeError::NotFound { .. } => (
                2,
                Some("Run from the repository root or pass --root <dir>".to_string()),
            ),
            UpgradeError::AlreadyExists { .. } => (
                3,
                Some("Remove the stale version directory or fix the package manifest".to_string()),
            ),
            UpgradeError::MalformedInput(_) => (4, None),
            UpgradeError::Config(_) => (5, None),
            UpgradeError::Io { .. } | UpgradeError::Pattern(_) => (1, None),
        };

        Self {
            message: err.to_string(),
            hint,
            exit_code,
        }
    }

    pub fn print(&self) {
        eprintln!("Error: {}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("\n{hint}");
        }
    }
}
