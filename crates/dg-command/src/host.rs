//! The environment a command runs in.
//!
//! Everything interactive sits behind [`Host`]: prompts, messages, the
//! editor and the workspace root. The terminal binary implements it with
//! dialoguer; tests implement it with canned answers.

use std::future::Future;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::CommandError;

/// The two free-text questions the command asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prompt {
    /// Name of the class to generate.
    ModelName,
    /// Name of the class the model extends.
    BaseClassName,
}

impl Prompt {
    /// Returns the question shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ModelName => "Enter the model class name (e.g., UserModel)",
            Self::BaseClassName => "Enter the base class name to extend (e.g., UserEntity)",
        }
    }
}

/// Services the generate command needs from its surroundings.
///
/// Hosts are cloned into the background build task, which reports through
/// [`Host::show_info`] and [`Host::show_error`] after the command returned.
pub trait Host: Clone + Send + Sync + 'static {
    /// Root of the workspace: the search root and the build's working directory.
    fn workspace_root(&self) -> &Utf8Path;

    /// Asks a free-text question. `None` means the user dismissed it.
    fn input(
        &self,
        prompt: Prompt,
    ) -> impl Future<Output = Result<Option<String>, CommandError>> + Send;

    /// Asks for the output directory. `None` means nothing was selected.
    fn pick_directory(
        &self,
    ) -> impl Future<Output = Result<Option<Utf8PathBuf>, CommandError>> + Send;

    /// Shows an informational message.
    fn show_info(&self, message: &str);

    /// Shows an error message.
    fn show_error(&self, message: &str);

    /// Opens a written file for the user.
    fn open_document(
        &self,
        path: &Utf8Path,
    ) -> impl Future<Output = Result<(), CommandError>> + Send;
}
