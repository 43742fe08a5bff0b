//! Effective settings for one `/edit` invocation.
//!
//! Each setting is taken from the plugin option when set, then from the
//! environment where one applies, then from [`crate::defaults`]. Empty
//! strings count as unset at every level.

use std::path::PathBuf;

use crate::defaults;
use crate::options::{OptionKey, parse_boolean};
use crate::paths::{env_var, expand_tilde};

/// Settings read fresh for every command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    /// Editor command and flags, e.g. `vim -f`.
    pub editor: String,
    /// Terminal emulator command, e.g. `xterm`.
    pub terminal: String,
    /// Run the editor in a separate terminal without blocking the host.
    pub run_externally: bool,
    /// Source file for paste seeding.
    pub paste_file: PathBuf,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            editor: defaults::EDITOR.to_string(),
            terminal: defaults::TERMINAL.to_string(),
            run_externally: false,
            paste_file: PathBuf::from(defaults::PASTE_FILE),
        }
    }
}

impl EditorSettings {
    /// Resolve settings from plugin options and the process environment.
    pub fn resolve<O>(option: O) -> Self
    where
        O: Fn(OptionKey) -> Option<String>,
    {
        Self::resolve_with(option, env_var)
    }

    /// Resolve settings from plugin options and an explicit environment lookup.
    pub fn resolve_with<O, E>(option: O, env: E) -> Self
    where
        O: Fn(OptionKey) -> Option<String>,
        E: Fn(&str) -> Option<String>,
    {
        let option = |key: OptionKey| option(key).filter(|value: &String| !value.is_empty());
        let env = |name: &str| env(name).filter(|value: &String| !value.is_empty());

        let editor = option(OptionKey::Editor)
            .or_else(|| env(defaults::EDITOR_ENV))
            .unwrap_or_else(|| defaults::EDITOR.to_string());

        let terminal = option(OptionKey::Terminal)
            .or_else(|| env(defaults::TERMINAL_ENV))
            .unwrap_or_else(|| defaults::TERMINAL.to_string());

        let run_externally = option(OptionKey::RunExternally)
            .map(|value| parse_boolean(&value))
            .unwrap_or(false);

        let paste_file = option(OptionKey::PasteFile)
            .map(|value| expand_tilde(&value))
            .unwrap_or_else(|| PathBuf::from(defaults::PASTE_FILE));

        Self {
            editor,
            terminal,
            run_externally,
            paste_file,
        }
    }
}
