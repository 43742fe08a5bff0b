//! Editor subprocess invocation for weechat-edit.
//!
//! Provides the two ways the plugin runs an editor: a blocking run that waits
//! for the editor in the host's own terminal, and hooked processes whose
//! completion is collected later by the host event loop.

pub mod command;
pub mod error;
pub mod hooks;
pub mod output;
pub mod process;

pub use command::{blocking_argv, external_command_line};
pub use error::ProcessError;
pub use hooks::{HookId, ProcessHooks};
pub use output::{HOOK_PROCESS_ERROR, ProcessOutput};
pub use process::{HookedProcess, OUTPUT_GRACE, run_blocking};
