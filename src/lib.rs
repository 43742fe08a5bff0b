// Library exports for the `edit` plugin and its standalone host.
//
// The plugin is written against the `Host` trait; `StandaloneHost` is the
// implementation used by the `weechat-edit` binary and the integration tests.

/// Plugin version, reported to the host at registration.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod completion;
pub mod edit;
pub mod error;
pub mod host;
pub mod plugin;
pub mod scratch;
pub mod seed;
pub mod standalone;

pub use completion::EditSession;
pub use error::EditError;
pub use host::{BufferId, Host, HostError, ProcessCallback, ReturnCode};
pub use plugin::{EditPlugin, PluginInfo};
pub use scratch::ScratchFile;
pub use standalone::StandaloneHost;

pub use weechat_edit_config as config;
pub use weechat_edit_process as process;
