//! Shell execution of finished command lines.

use std::env;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::config::DEFAULT_SHELL;
use crate::error::Result;

/// Runs a command line in an interactive shell, blocking until it finishes.
///
/// The command inherits the terminal so the user sees live output, and a
/// "press enter" pause is appended so output stays on screen before the UI
/// takes the terminal back. The child's exit status is logged but not
/// surfaced; callers only observe that the command finished.
///
/// # Errors
///
/// Returns an error if the shell process cannot be spawned at all.
pub fn run_interactive(command_line: &str) -> Result<()> {
    let shell = env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string());
    info!("Executing via `{shell}`: {command_line}");

    let paused = format!("{command_line}; echo; echo 'Press enter to continue...'; read");

    // `-i` starts an interactive shell, which reads the user's rc files
    let status = Command::new(shell)
        .args(["-i", "-c", paused.as_str()])
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?
        .wait()?;

    if !status.success() {
        debug!("Command exited with status {status}");
    }

    Ok(())
}
