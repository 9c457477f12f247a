use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which side of the run a file access failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Read,
    Write,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAction::Read => f.write_str("read"),
            FileAction::Write => f.write_str("write"),
        }
    }
}

/// Errors emitted while augmenting a dump.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// The input could not be read or the output could not be written.
    #[error("cannot {action} {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        action: FileAction,
        #[source]
        source: std::io::Error,
    },
    /// The built-in tuple pattern failed to compile.
    #[error("invalid tuple pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

impl AugmentError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AugmentError::FileAccess {
            path: path.into(),
            action: FileAction::Read,
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AugmentError::FileAccess {
            path: path.into(),
            action: FileAction::Write,
            source,
        }
    }
}

/// Result type for augmentation operations.
pub type AugmentResult<T> = std::result::Result<T, AugmentError>;
