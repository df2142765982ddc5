//! External editor integration for opening the generated file.

use std::env;
use std::path::Path;

use camino::Utf8Path;
use dg_core::EditorConfig;
use tracing::debug;

use crate::error::CommandError;
use crate::toolchain;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorKind {
    Cursor,
    VsCode,
    Other,
}

impl EditorKind {
    fn from_program(program: &str) -> Self {
        let file_name = Path::new(program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(program)
            .to_lowercase();

        match file_name.as_str() {
            "cursor" | "cursor.exe" | "cursor.cmd" => Self::Cursor,
            "code" | "code-insiders" | "code.exe" | "code.cmd" => Self::VsCode,
            _ => Self::Other,
        }
    }

    const fn reuses_window(self) -> bool {
        matches!(self, Self::Cursor | Self::VsCode)
    }
}

/// A parsed editor command line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EditorCommand {
    program: String,
    args: Vec<String>,
    kind: EditorKind,
}

impl EditorCommand {
    fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next()?.to_owned();
        let args = parts.map(str::to_owned).collect();
        let kind = EditorKind::from_program(&program);

        Some(Self {
            program,
            args,
            kind,
        })
    }
}

/// What happened when the host asked to open a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    /// The editor ran and exited successfully.
    Opened,
    /// No editor is configured; the caller should show the path instead.
    NotConfigured,
}

/// Picks the editor: the configured override, then `$VISUAL`, then `$EDITOR`.
fn resolve_editor(
    config: &EditorConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<EditorCommand> {
    config
        .editor
        .clone()
        .or_else(|| lookup("VISUAL"))
        .or_else(|| lookup("EDITOR"))
        .and_then(|candidate| EditorCommand::parse(&candidate))
}

/// Opens `path` in the user's editor, running it from `root`.
///
/// VS Code and Cursor are asked to reuse the current window so the file opens
/// in the workspace that is already showing.
///
/// # Errors
///
/// Returns [`CommandError::Editor`] if the editor can't be spawned or exits
/// with a failure status.
pub async fn open_in_editor(
    path: &Utf8Path,
    root: &Utf8Path,
    config: &EditorConfig,
) -> Result<EditorOutcome, CommandError> {
    let Some(editor) = resolve_editor(config, |key| env::var(key).ok()) else {
        return Ok(EditorOutcome::NotConfigured);
    };

    debug!(program = %editor.program, %path, "Opening generated file");

    let mut command = toolchain::command(&editor.program, root);
    command.args(&editor.args);
    if editor.kind.reuses_window() {
        command.arg("--reuse-window");
    }
    command.arg(path.as_str());

    let status = command
        .status()
        .await
        .map_err(|e| CommandError::editor(format!("failed to start {}: {e}", editor.program)))?;

    if status.success() {
        Ok(EditorOutcome::Opened)
    } else {
        Err(CommandError::editor(format!(
            "Editor exited with status: {status}"
        )))
    }
}
