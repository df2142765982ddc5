//! Configuration structures for the dartgen tool.
//!
//! This module provides configuration types for all stages of the generator:
//!
//! - [`SearchConfig`] - Base class search settings (extensions, skipped directories)
//! - [`GenerateConfig`] - Output file settings
//! - [`BuildConfig`] - The follow-up build command
//! - [`EditorConfig`] - How the generated file is opened
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] with values suited to a
//! Flutter project using `json_serializable`. A project may override them with
//! a [`CONFIG_FILE_NAME`] file at its root.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "dartgen.json";

/// Configuration for the base class search.
///
/// # Examples
///
/// ```
/// use dg_core::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.file_extensions, vec!["dart"]);
/// assert!(!config.follow_links);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// File extensions (without the dot) that are searched for the base class.
    pub file_extensions: Vec<String>,

    /// Directory names skipped anywhere in the tree.
    pub skip_dirs: Vec<String>,

    /// Whether to follow symbolic links while walking.
    pub follow_links: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            file_extensions: vec!["dart".to_owned()],
            skip_dirs: vec![
                ".dart_tool".to_owned(),
                "build".to_owned(),
                ".git".to_owned(),
                ".idea".to_owned(),
                ".fvm".to_owned(),
            ],
            follow_links: false,
        }
    }
}

/// Configuration for the generated file.
///
/// # Examples
///
/// ```
/// use dg_core::GenerateConfig;
///
/// let config = GenerateConfig::default();
/// assert_eq!(config.output_extension, "dart");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Extension of the written file (`<stem>.<ext>`).
    pub output_extension: String,

    /// Import of the JSON annotation package placed at the top of the file.
    pub json_annotation_import: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_extension: "dart".to_owned(),
            json_annotation_import: "package:json_annotation/json_annotation.dart".to_owned(),
        }
    }
}

/// Configuration for the external build step that produces the companion
/// `.g.dart` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Whether the build command runs after the file is written.
    pub enabled: bool,

    /// Shell command line executed in the workspace root.
    pub command: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "dart run build_runner build".to_owned(),
        }
    }
}

/// Configuration for opening the generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor command override (falls back to `$VISUAL` / `$EDITOR`).
    pub editor: Option<String>,

    /// Whether the generated file is opened after it is written.
    pub open_generated: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            editor: None,
            open_generated: true,
        }
    }
}

/// Root configuration for the dartgen tool.
///
/// # Examples
///
/// ```
/// use dg_core::Config;
///
/// let config = Config::default();
/// assert!(config.build.enabled);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base class search configuration.
    pub search: SearchConfig,

    /// Output file configuration.
    pub generate: GenerateConfig,

    /// Build step configuration.
    pub build: BuildConfig,

    /// Editor configuration.
    pub editor: EditorConfig,
}

impl Config {
    /// Loads and validates a configuration file.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON, or
    /// [`ConfigError::InvalidOption`] if validation fails.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `<root>/dartgen.json` if it exists, otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDirectory`] if `root` is not a directory,
    /// and any error from [`Config::load`].
    pub fn discover(root: &Utf8Path) -> Result<Self, ConfigError> {
        if !root.is_dir() {
            return Err(ConfigError::MissingDirectory(root.to_owned()));
        }

        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Checks option values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first bad option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.file_extensions.is_empty() {
            return Err(ConfigError::invalid_option(
                "search.file_extensions",
                "at least one extension is required",
            ));
        }
        if let Some(ext) = self
            .search
            .file_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::invalid_option(
                "search.file_extensions",
                format!("'{ext}' must be a bare extension such as \"dart\""),
            ));
        }
        if self.generate.output_extension.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "generate.output_extension",
                "must not be empty",
            ));
        }
        if self.build.enabled && self.build.command.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "build.command",
                "must not be empty while the build is enabled",
            ));
        }
        Ok(())
    }
}
