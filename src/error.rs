//! Error types for the task list.

use std::path::PathBuf;
use thiserror::Error;

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input; nothing was changed.
    Validation,
    /// An operation needed a task and none (or an unknown one) was given.
    Selection,
    /// Reading or writing the task file failed.
    Persistence,
    /// The terminal backend failed.
    Terminal,
}

#[derive(Error, Debug)]
pub enum Error {
    // Validation
    #[error("Task description cannot be empty!")]
    EmptyDescription,

    #[error("Invalid priority: {0:?} (expected high, medium or low)")]
    InvalidPriority(String),

    #[error("No task ids left: the highest id is already {}", u32::MAX)]
    IdsExhausted,

    // Selection
    #[error("No task selected: {0}")]
    NothingSelected(String),

    #[error("Task {0} not found")]
    TaskNotFound(u32),

    // Persistence
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed task file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize tasks: {0}")]
    Serialize(#[source] serde_json::Error),

    // Terminal
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyDescription | Error::InvalidPriority(_) | Error::IdsExhausted => {
                ErrorKind::Validation
            }
            Error::NothingSelected(_) | Error::TaskNotFound(_) => ErrorKind::Selection,
            Error::Read { .. } | Error::Write { .. } | Error::Parse { .. } | Error::Serialize(_) => {
                ErrorKind::Persistence
            }
            Error::Io(_) => ErrorKind::Terminal,
        }
    }

    /// User-facing errors have already been shown through a prompter and
    /// leave the task list untouched.
    pub fn is_user_facing(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::Selection)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
