//! Launching an external editor on the configuration file.

use std::env;
use std::path::Path;
use std::process::{Command, Stdio};

use log::info;

use shelf_core::error::{Error, Result};

/// Editors tried after `$VISUAL` and `$EDITOR`, in preference order.
const EDITOR_CANDIDATES: [&str; 5] = ["code", "nano", "vim", "vi", "emacs"];

/// Picks the editor to use: `$VISUAL`, then `$EDITOR`, then the first
/// candidate found on `PATH`.
///
/// # Errors
///
/// Returns [`Error::NoEditorFound`] when nothing usable is installed.
pub fn resolve() -> Result<String> {
    let from_env = [env::var("VISUAL").ok(), env::var("EDITOR").ok()];

    let candidates = from_env
        .iter()
        .flatten()
        .map(String::as_str)
        .chain(EDITOR_CANDIDATES);

    for candidate in candidates {
        if !candidate.is_empty() && is_available(candidate) {
            return Ok(candidate.to_string());
        }
    }

    Err(Error::NoEditorFound(EDITOR_CANDIDATES.join(", ")))
}

/// Opens the config file in the given editor, blocking until it exits.
/// The editor owns the terminal for the duration, like command execution.
///
/// # Errors
///
/// Returns an error if the editor process cannot be spawned.
pub fn launch(editor: &str, config_path: &str) -> Result<()> {
    info!("Opening `{config_path}` with `{editor}`");

    Command::new(editor)
        .arg(config_path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?
        .wait()?;

    Ok(())
}

fn is_available(program: &str) -> bool {
    // Absolute or relative paths are checked directly, bare names on PATH
    if program.contains('/') {
        return Path::new(program).is_file();
    }

    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| dir.join(program).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_available_bare_name() {
        // `sh` exists on any Unix test environment
        assert!(is_available("sh"));
        assert!(!is_available("definitely-not-an-editor-binary"));
    }

    #[test]
    fn test_is_available_path() {
        assert!(is_available("/bin/sh"));
        assert!(!is_available("/bin/definitely-not-a-binary"));
    }
}
