//! Core types, errors, and configuration for the dartgen tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Error types for configuration loading and field declaration parsing
//! - Configuration structures ([`Config`] and its sections)
//! - Domain types ([`Field`], [`BaseClassRef`], [`GeneratedModel`])

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{BuildConfig, Config, EditorConfig, GenerateConfig, SearchConfig, CONFIG_FILE_NAME};
pub use error::{ConfigError, FieldError};
pub use types::{declaration_needle, BaseClassRef, Field, Fields, GeneratedModel, FIELD_KEYWORD};
