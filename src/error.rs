// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by the extraction pipeline.

use std::io;
use std::path::{Path, PathBuf};

/// Application error type.
///
/// Every variant except `Internal` is recovered somewhere inside the
/// pipeline; none of them end the process with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Roster file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Invalid roster: {0}")]
    Roster(String),

    #[error("Token encoding failed: {0}")]
    Token(String),

    #[error("Hub request failed: {0}")]
    Fetch(String),

    #[error("Invalid hub response: {0}")]
    InvalidResponse(String),

    #[error("Output file is locked or not writable: {}", .0.display())]
    WriteConflict(PathBuf),

    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for errors raised while handling a single user's request.
    pub fn is_per_user(&self) -> bool {
        matches!(
            self,
            AppError::Token(_) | AppError::Fetch(_) | AppError::InvalidResponse(_)
        )
    }

    /// True for errors raised while flushing a batch file.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, AppError::WriteConflict(_) | AppError::Write(_))
    }

    /// Classify an I/O error hit while writing `path`.
    pub(crate) fn from_write_io(err: io::Error, path: &Path) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            AppError::WriteConflict(path.to_path_buf())
        } else {
            AppError::Write(format!("{}: {}", path.display(), err))
        }
    }
}

/// Result type alias for the pipeline
pub type Result<T> = std::result::Result<T, AppError>;
