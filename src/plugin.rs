//! Plugin registration and the per-instance state handed to each command.

use weechat_edit_config::OptionKey;

use crate::completion::EditSession;
use crate::edit::run_edit;
use crate::error::EditError;
use crate::host::{BufferId, Host, ReturnCode};
use crate::scratch::ScratchFile;

/// Metadata the host shows for a loaded plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub version: &'static str,
    pub license: &'static str,
    pub description: &'static str,
}

/// A command offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub args: &'static str,
    pub args_description: &'static str,
    pub completion: &'static str,
}

pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "edit",
    author: "Keith Smiley",
    version: crate::VERSION,
    license: "MIT",
    description: "Open your $EDITOR to compose a message",
};

pub const EDIT_COMMAND: CommandSpec = CommandSpec {
    name: "edit",
    description: "Open your $EDITOR to compose a message",
    args: "[f|fc|<text>]",
    args_description: "   f: start from the content of the paste_file option\n  \
                       fc: same as f, wrapped in a ``` code block\n\
                       text: start the message with this text\n\n\
                       The current input line is appended to the starting text.",
    completion: "f|fc",
};

/// A loaded instance of the plugin.
///
/// Holds the scratch-file location, resolved once at load time and passed
/// explicitly to every edit session.
#[derive(Debug, Clone)]
pub struct EditPlugin {
    scratch: ScratchFile,
}

impl EditPlugin {
    /// Register with `host` and hook the `edit` command, using the scratch
    /// file in the WeeChat cache directory.
    pub fn load<H: Host + ?Sized>(host: &mut H) -> Result<Self, EditError> {
        Self::load_with(host, ScratchFile::resolve())
    }

    /// Register with `host` using an explicit scratch file.
    pub fn load_with<H: Host + ?Sized>(
        host: &mut H,
        scratch: ScratchFile,
    ) -> Result<Self, EditError> {
        if !host.register(&PLUGIN_INFO) {
            return Err(EditError::Registration);
        }
        host.hook_command(&EDIT_COMMAND)?;
        for key in OptionKey::ALL {
            host.set_option_description(key.as_str(), key.description());
        }
        log::info!(
            "{} {} loaded, scratch file {:?}",
            PLUGIN_INFO.name,
            PLUGIN_INFO.version,
            scratch.path()
        );
        Ok(Self { scratch })
    }

    pub fn scratch(&self) -> &ScratchFile {
        &self.scratch
    }

    /// Entry point for `/edit <args>` typed in `buffer`.
    pub fn on_command<H: Host + ?Sized>(
        &self,
        host: &mut H,
        buffer: &BufferId,
        args: &str,
    ) -> ReturnCode {
        let session = EditSession::new(buffer.clone(), self.scratch.clone());
        run_edit(host, &session, args)
    }
}
