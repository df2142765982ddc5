//! Error types for the dg-core crate.
//!
//! This module provides [`ConfigError`] for configuration-related errors and
//! [`FieldError`] for field declarations that do not have the canonical
//! `final <type> <name>;` shape.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use dg_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::MissingDirectory(Utf8PathBuf::from("/some/path"));
/// assert!(error.to_string().contains("/some/path"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The provided path is invalid or malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The invalid path.
        path: Utf8PathBuf,
        /// Explanation of why the path is invalid.
        reason: String,
    },

    /// A required directory does not exist.
    #[error("missing required directory: {0}")]
    MissingDirectory(Utf8PathBuf),

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// A field declaration that cannot be turned into a [`Field`](crate::Field).
///
/// Each variant carries the offending text so the message can point at it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The declaration does not start with the `final` keyword.
    #[error("field declaration '{0}' does not start with `final`")]
    MissingKeyword(String),

    /// The declaration is not terminated by `;`.
    #[error("field declaration '{0}' is not terminated by `;`")]
    MissingTerminator(String),

    /// The declaration lacks either a type or a name.
    #[error("field declaration '{0}' must have both a type and a name")]
    MissingName(String),

    /// The field name contains characters other than ASCII letters, digits and `_`.
    #[error("field name '{0}' is not an identifier")]
    InvalidName(String),

    /// The type text still holds a comma-separated declarator, as in
    /// `final int x, y;`. Such declarations must be split per name first.
    #[error("type '{0}' declares more than one field")]
    MultipleDeclarators(String),
}
