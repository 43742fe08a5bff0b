//! Plugin option keys and WeeChat-style value parsing.

use std::fmt;

/// A plugin option recognised by the `edit` command.
///
/// In WeeChat these live under `plugins.var.<lang>.edit.<key>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    /// Editor command plus flags.
    Editor,
    /// Terminal emulator command used for external editing.
    Terminal,
    /// Whether to run the editor in a separate terminal.
    RunExternally,
    /// File providing seed content for `/edit f` and `/edit fc`.
    PasteFile,
}

impl OptionKey {
    /// Every option, in the order they are documented.
    pub const ALL: [OptionKey; 4] = [
        OptionKey::Editor,
        OptionKey::Terminal,
        OptionKey::RunExternally,
        OptionKey::PasteFile,
    ];

    /// Option name as stored in the host's key/value store.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::Editor => "editor",
            OptionKey::Terminal => "terminal",
            OptionKey::RunExternally => "run_externally",
            OptionKey::PasteFile => "paste_file",
        }
    }

    /// Look up an option by its stored name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Help text published alongside the option.
    pub fn description(self) -> &'static str {
        match self {
            OptionKey::Editor => "editor command and flags (default: $EDITOR or \"vim -f\")",
            OptionKey::Terminal => {
                "terminal used when run_externally is on (default: $TERMCMD or \"xterm\")"
            }
            OptionKey::RunExternally => {
                "run the editor in a separate terminal instead of blocking weechat (default: off)"
            }
            OptionKey::PasteFile => "file whose content seeds the message for /edit f and /edit fc",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a boolean option value the way WeeChat does.
///
/// `on`, `yes`, `y`, `true`, `t` and `1` (any case, no surrounding
/// whitespace) are true; every other value, including the empty string, is
/// false.
pub fn parse_boolean(value: &str) -> bool {
    const TRUE_VALUES: [&str; 6] = ["on", "yes", "y", "true", "t", "1"];
    TRUE_VALUES
        .iter()
        .any(|candidate| value.eq_ignore_ascii_case(candidate))
}
