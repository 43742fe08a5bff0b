//! Typed errors for editor process handling.

use thiserror::Error;

/// Errors raised while preparing or spawning an editor process.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The command string could not be split into shell words
    /// (e.g. an unbalanced quote).
    #[error("Failed to parse command '{command}': {source}")]
    Parse {
        /// The command string as configured.
        command: String,
        #[source]
        source: shell_words::ParseError,
    },

    /// The command string contained no program to run.
    #[error("Command is empty")]
    EmptyCommand,

    /// The operating system refused to start the program.
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        /// Program name (first word of the command).
        program: String,
        #[source]
        source: std::io::Error,
    },
}
