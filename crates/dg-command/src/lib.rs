//! The generate-model command.
//!
//! This crate wires the pipeline together: prompt for names, locate the base
//! class, extract its fields, render the model, write and open it, then start
//! the build that produces the companion `.g.dart` file.
//!
//! # Architecture
//!
//! ```text
//! crates/dg-command/src/
//!   lib.rs        # Public API exports
//!   command.rs    # GenerateCommand and its outcomes
//!   host.rs       # Host trait (prompts, messages, editor, workspace root)
//!   build.rs      # Detached build launch and per-root tracking
//!   editor.rs     # $VISUAL / $EDITOR integration
//!   toolchain.rs  # Process spawning helpers
//!   error.rs      # CommandError
//! ```
//!
//! Every user interaction goes through a [`Host`], so the command runs the
//! same under a terminal, an editor plugin, or a test double.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod build;
mod command;
pub mod editor;
pub mod error;
pub mod host;
mod toolchain;

pub use build::{BuildHandle, BuildReport, BuildTracker};
pub use command::{
    AbortReason, BaseFields, GenerateCommand, Generated, Outcome, RunOptions, find_base_fields,
};
pub use editor::{EditorOutcome, open_in_editor};
pub use error::CommandError;
pub use host::{Host, Prompt};
