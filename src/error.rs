//! Typed errors for the `/edit` command.

use std::path::PathBuf;

use thiserror::Error;
use weechat_edit_process::ProcessError;

use crate::host::HostError;

/// Failures that end an `/edit` invocation before the editor result is used.
#[derive(Debug, Error)]
pub enum EditError {
    /// The host refused to register the plugin.
    #[error("plugin registration refused by host")]
    Registration,

    /// The paste file could not be read.
    #[error("cannot read paste file '{}': {source}", .path.display())]
    PasteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scratch file could not be written.
    #[error("cannot write scratch file '{}': {source}", .path.display())]
    ScratchWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The editor could not be started in the foreground.
    #[error("editor failed: {0}")]
    Editor(#[from] ProcessError),

    /// The host could not hook the external terminal.
    #[error("cannot start external editor: {0}")]
    Host(#[from] HostError),
}
