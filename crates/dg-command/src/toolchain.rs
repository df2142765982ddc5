//! Helpers for spawning external processes rooted at a directory.

use camino::Utf8Path;
use tokio::process::Command;

/// Creates a command that runs `program` in `working_dir`.
#[allow(clippy::disallowed_methods)]
pub fn command(program: &str, working_dir: &Utf8Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.current_dir(working_dir.as_std_path());
    cmd
}

/// Creates a command that runs `line` through the platform shell.
///
/// The line is passed verbatim, so pipes and quoting behave as they would
/// when typed by hand.
pub fn shell_command(line: &str, working_dir: &Utf8Path) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut cmd = command("cmd", working_dir);
        cmd.arg("/C");
        cmd
    } else {
        let mut cmd = command("sh", working_dir);
        cmd.arg("-c");
        cmd
    };
    cmd.arg(line);
    cmd
}
