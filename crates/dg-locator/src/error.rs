//! Error types for the dg-locator crate.
//!
//! This module provides the [`LocateError`] type for errors that can occur
//! while searching for a base class declaration. A class that is simply not
//! declared anywhere is *not* an error; the locator reports it as `Ok(None)`.

use camino::Utf8PathBuf;

/// Errors that can occur during a base class search.
///
/// # Examples
///
/// ```
/// use dg_locator::LocateError;
///
/// fn handle_error(err: LocateError) {
///     match err {
///         LocateError::Walk(e) => eprintln!("Walk error: {e}"),
///         LocateError::Read { path, .. } => eprintln!("Read error: {path}"),
///         LocateError::Config(msg) => eprintln!("Config error: {msg}"),
///         LocateError::NonUtf8Path(p) => eprintln!("Invalid path: {}", p.display()),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// Failed to walk a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to read a candidate file.
    ///
    /// Reported instead of skipping the file, because the skipped file might
    /// be the one that declares the class.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid search configuration, such as a root that is not a directory.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

impl LocateError {
    /// Creates a new [`LocateError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`LocateError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Read { path, .. } => Some(path),
            Self::Walk(_) | Self::Config(_) | Self::NonUtf8Path(_) => None,
        }
    }
}
