//! Editor command-line construction.
//!
//! Commands are split with shell-word rules before the scratch path is added,
//! so the path always stays a single argument whatever characters it holds.

use std::path::Path;

use crate::error::ProcessError;

/// Split a configured command string into program + arguments.
///
/// # Errors
/// Returns [`ProcessError::Parse`] on unbalanced quoting and
/// [`ProcessError::EmptyCommand`] when nothing is left after splitting.
pub fn split_command(command: &str) -> Result<Vec<String>, ProcessError> {
    let words = shell_words::split(command).map_err(|source| ProcessError::Parse {
        command: command.to_string(),
        source,
    })?;
    if words.is_empty() {
        return Err(ProcessError::EmptyCommand);
    }
    Ok(words)
}

/// Argument vector for running `editor` on `path` in the current terminal.
pub fn blocking_argv(editor: &str, path: &Path) -> Result<Vec<String>, ProcessError> {
    let mut argv = split_command(editor)?;
    argv.push(path.to_string_lossy().into_owned());
    Ok(argv)
}

/// Command line that opens `editor` on `path` inside a new `terminal` window.
///
/// Produces `<terminal> -e '<editor> <path>'`: the terminal receives the whole
/// editor invocation as the single argument following `-e`.
pub fn external_command_line(terminal: &str, editor: &str, path: &Path) -> String {
    let path = path.to_string_lossy();
    let editor_cmd = format!("{} {}", editor, shell_words::quote(&path));
    format!("{} -e {}", terminal, shell_words::quote(&editor_cmd))
}
