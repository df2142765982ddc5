//! Command error types.
//!
//! This module provides the [`CommandError`] type for failures that end a
//! command run early. Missing input and an unknown base class are *not*
//! errors; they are reported as an [`AbortReason`](crate::AbortReason).

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while running the generate command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommandError {
    /// Reading the base class or writing the model failed.
    #[error("{path}: {source}")]
    Io {
        /// The file or directory involved.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The base class search failed.
    #[error(transparent)]
    Locate(#[from] dg_locator::LocateError),

    /// Field extraction failed.
    #[error(transparent)]
    Extract(#[from] dg_extract::ExtractError),

    /// Rendering the model failed.
    #[error(transparent)]
    Generate(#[from] dg_codegen::GenerateError),

    /// The host could not collect an answer from the user.
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// The editor could not be launched or exited with an error.
    #[error("editor error: {0}")]
    Editor(String),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CommandError {
    /// Creates a new [`CommandError::Io`] error.
    #[must_use]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new prompt error.
    #[must_use]
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt(message.into())
    }

    /// Creates a new editor error.
    #[must_use]
    pub fn editor(message: impl Into<String>) -> Self {
        Self::Editor(message.into())
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
