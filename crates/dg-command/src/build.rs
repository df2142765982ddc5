//! The follow-up code generation build.
//!
//! After the model is written, the configured build command runs in the
//! workspace root as a detached task. The command that launched it does not
//! wait; the result reaches the user later through the [`Host`]. A
//! [`BuildHandle`] lets a caller that is about to exit wait anyway.

use std::process::Stdio;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::CommandError;
use crate::host::Host;
use crate::toolchain;

/// Shown when the build is launched.
pub const BUILD_STARTED: &str = "Running build_runner to generate .g.dart file...";

/// Shown when the build exits successfully.
pub const BUILD_SUCCEEDED: &str = "Successfully generated .g.dart file.";

/// How a build ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildReport {
    /// The command exited with status 0.
    Succeeded,
    /// The command ran and failed. Only its stderr is kept.
    Failed {
        /// Captured standard error, lossily decoded.
        stderr: String,
    },
    /// The shell could not be started.
    SpawnFailed {
        /// Why the spawn failed.
        reason: String,
    },
}

impl BuildReport {
    /// Returns `true` if the build succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns the message shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Succeeded => BUILD_SUCCEEDED.to_owned(),
            Self::Failed { stderr } => format!("Error running build_runner: {stderr}"),
            Self::SpawnFailed { reason } => format!("Error running build_runner: {reason}"),
        }
    }
}

/// A launched build.
///
/// Dropping the handle detaches the build; it keeps running and still
/// reports through the host.
#[derive(Debug)]
pub struct BuildHandle {
    task: JoinHandle<BuildReport>,
}

impl BuildHandle {
    /// Waits for the build to finish.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Task`] if the build task panicked.
    pub async fn wait(self) -> Result<BuildReport, CommandError> {
        Ok(self.task.await?)
    }

    /// Returns `true` once the build has reported.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Counts running builds per workspace root.
///
/// A second build for the same root is not queued behind the first. It starts
/// anyway and the overlap is logged, since two build runners writing the same
/// outputs can race.
#[derive(Debug, Clone, Default)]
pub struct BuildTracker {
    in_flight: Arc<Mutex<FxHashMap<Utf8PathBuf, usize>>>,
}

impl BuildTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of unfinished builds for `root`.
    #[must_use]
    pub fn in_flight(&self, root: &Utf8Path) -> usize {
        self.in_flight.lock().get(root).copied().unwrap_or(0)
    }

    /// Announces and starts `command_line` in the host's workspace root.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn launch<H: Host>(&self, host: &H, command_line: &str) -> BuildHandle {
        let root = host.workspace_root().to_owned();
        host.show_info(BUILD_STARTED);

        let guard = self.begin(&root);
        let mut command = toolchain::shell_command(command_line, &root);
        command.stdin(Stdio::null());

        info!(%root, command = command_line, "Launching build");

        let host = host.clone();
        let task = tokio::spawn(async move {
            let report = match command.output().await {
                Ok(output) if output.status.success() => BuildReport::Succeeded,
                Ok(output) => BuildReport::Failed {
                    stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
                },
                Err(e) => BuildReport::SpawnFailed {
                    reason: e.to_string(),
                },
            };
            drop(guard);

            if report.is_success() {
                info!("Build finished");
                host.show_info(&report.message());
            } else {
                warn!(report = ?report, "Build failed");
                host.show_error(&report.message());
            }
            report
        });

        BuildHandle { task }
    }

    fn begin(&self, root: &Utf8Path) -> InFlightGuard {
        let mut in_flight = self.in_flight.lock();
        let count = in_flight.entry(root.to_owned()).or_insert(0);
        if *count > 0 {
            warn!(%root, running = *count, "Build already running for this workspace");
        }
        *count += 1;

        InFlightGuard {
            tracker: self.clone(),
            root: root.to_owned(),
        }
    }
}

/// Decrements the in-flight count when the build ends, even on panic.
struct InFlightGuard {
    tracker: BuildTracker,
    root: Utf8PathBuf,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut in_flight = self.tracker.in_flight.lock();
        if let Some(count) = in_flight.get_mut(&self.root) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                in_flight.remove(&self.root);
                debug!(root = %self.root, "No builds left for workspace");
            }
        }
    }
}
