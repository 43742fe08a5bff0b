//! The host application as seen by the plugin.
//!
//! Everything the plugin does to the chat client goes through [`Host`]:
//! reading options, reading and writing a buffer's input line, issuing
//! commands, printing, and hooking processes whose completion is delivered
//! later by the host's event loop.

use std::fmt;

use thiserror::Error;
use weechat_edit_process::{HookId, ProcessError, ProcessOutput};

use crate::plugin::{CommandSpec, PluginInfo};

/// Status returned to the host from commands and callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    /// Handled successfully.
    Ok,
    /// Handled successfully; the host should not pass the event on.
    OkEat,
    /// Failed.
    Error,
}

impl ReturnCode {
    /// Numeric value WeeChat uses for this status.
    pub fn as_i32(self) -> i32 {
        match self {
            ReturnCode::Ok => 0,
            ReturnCode::OkEat => 1,
            ReturnCode::Error => -1,
        }
    }

    pub fn is_error(self) -> bool {
        self == ReturnCode::Error
    }
}

/// Opaque handle of a host buffer (a chat window with its own input line).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BufferId(String);

impl BufferId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The core buffer, where plugin-wide messages are printed.
    pub fn core() -> Self {
        Self::new("core.weechat")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Completion callback for a hooked process. Called exactly once, from the
/// host event loop, with the host itself and the process result.
pub type ProcessCallback = Box<dyn FnOnce(&mut dyn Host, ProcessOutput) -> ReturnCode>;

/// Errors a host can report back to the plugin.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host could not start a hooked process.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// The host refused the request.
    #[error("host rejected request: {0}")]
    Rejected(String),
}

/// Host application API consumed by the plugin.
pub trait Host {
    /// Register the plugin. Returns `false` if the host refuses it.
    fn register(&mut self, info: &PluginInfo) -> bool;

    /// Make `command` available to the user.
    fn hook_command(&mut self, command: &CommandSpec) -> Result<(), HostError>;

    /// Value of a plugin option, `None` when unset.
    fn plugin_option(&self, name: &str) -> Option<String>;

    /// Publish help text for a plugin option.
    fn set_option_description(&mut self, name: &str, description: &str);

    /// Current content of `buffer`'s input line.
    fn input(&self, buffer: &BufferId) -> String;

    /// Replace the content of `buffer`'s input line.
    fn set_input(&mut self, buffer: &BufferId, text: &str);

    /// Move `buffer`'s input cursor to character offset `pos`.
    fn set_input_pos(&mut self, buffer: &BufferId, pos: usize);

    /// Execute a host command (e.g. `/window refresh`) on `buffer`.
    fn command(&mut self, buffer: &BufferId, command: &str);

    /// Print a line on `buffer`, or on the core buffer when `None`.
    fn print(&mut self, buffer: Option<&BufferId>, message: &str);

    /// Start `command` in the background and call `callback` once it ends.
    ///
    /// `timeout_ms` of zero means no timeout.
    fn hook_process(
        &mut self,
        command: &str,
        timeout_ms: u64,
        callback: ProcessCallback,
    ) -> Result<HookId, HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_codes_match_weechat_values() {
        assert_eq!(ReturnCode::Ok.as_i32(), 0);
        assert_eq!(ReturnCode::OkEat.as_i32(), 1);
        assert_eq!(ReturnCode::Error.as_i32(), -1);
    }

    #[test]
    fn only_error_is_an_error() {
        assert!(ReturnCode::Error.is_error());
        assert!(!ReturnCode::Ok.is_error());
        assert!(!ReturnCode::OkEat.is_error());
    }

    #[test]
    fn core_buffer_id() {
        assert_eq!(BufferId::core().as_str(), "core.weechat");
        assert_eq!(
            BufferId::new("irc.libera.#rust").to_string(),
            "irc.libera.#rust"
        );
    }
}
