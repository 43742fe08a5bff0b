//! Shared integration test helpers for weechat-edit.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{TestContext, writing_editor};
//! ```
//!
//! Editors and terminals are stood in for by small `sh -c` scripts, so the
//! process tests only run on Unix.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use weechat_edit::config::{OptionKey, OptionsFile};
use weechat_edit::{BufferId, EditPlugin, Host, ScratchFile, StandaloneHost};

/// Editor that replaces the scratch file content with `text`.
/// `text` must not contain a single quote.
pub fn writing_editor(text: &str) -> String {
    format!("sh -c 'printf %s \"$1\" > \"$2\"' sh '{text}'")
}

/// Editor that copies the seeded scratch file to `<scratch>.seed` and exits 0
/// without changing it.
pub fn seed_capturing_editor() -> String {
    "sh -c 'cp \"$1\" \"$1.seed\"' sh".to_string()
}

/// Editor that exits with `code` without touching the scratch file.
pub fn failing_editor(code: i32) -> String {
    format!("sh -c 'exit {code}'")
}

/// Terminal that runs the editor command it receives after `-e`.
pub fn evaluating_terminal() -> String {
    "sh -c 'eval \"$2\"' term".to_string()
}

/// Terminal that writes a byte that is not valid UTF-8 to stderr, keeps
/// writing for a moment, then runs the editor command like
/// [`evaluating_terminal`].
pub fn noisy_terminal() -> String {
    r#"sh -c 'printf "\377\n" >&2; sleep 0.3; echo more >&2; eval "$2"' term"#.to_string()
}

/// Terminal that runs the editor command, then exits while a background
/// child still holds its stdout and stderr open.
pub fn forking_terminal() -> String {
    "sh -c 'eval \"$2\"; sleep 3 & exit 0' term".to_string()
}

/// Terminal that writes `message` to stderr and exits with `code`.
pub fn failing_terminal(message: &str, code: i32) -> String {
    format!("sh -c 'echo {message} >&2; exit {code}' term")
}

/// A loaded plugin, its standalone host, and a private scratch directory.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub struct TestContext {
    pub dir: TempDir,
    pub host: StandaloneHost,
    pub plugin: EditPlugin,
    pub buffer: BufferId,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut host = StandaloneHost::new(OptionsFile::default());
        let plugin = EditPlugin::load_with(&mut host, ScratchFile::in_dir(dir.path()))
            .expect("Failed to load plugin");
        Self {
            dir,
            host,
            plugin,
            buffer: BufferId::new("irc.libera.#rust"),
        }
    }

    pub fn with_option(mut self, key: OptionKey, value: impl Into<String>) -> Self {
        self.host.set_option(key, value);
        self
    }

    pub fn with_input(mut self, text: &str) -> Self {
        self.host.set_input(&self.buffer, text);
        self
    }

    /// Write a paste file in the temp dir and point `paste_file` at it.
    pub fn with_paste_file(mut self, contents: &str) -> Self {
        let path = self.dir.path().join("upload.txt");
        fs::write(&path, contents).expect("Failed to write paste file");
        self.host
            .set_option(OptionKey::PasteFile, path.to_string_lossy().into_owned());
        self
    }

    pub fn scratch_path(&self) -> PathBuf {
        self.plugin.scratch().path().to_path_buf()
    }

    /// Content the scratch file had when the editor opened, as captured by
    /// [`seed_capturing_editor`].
    pub fn captured_seed(&self) -> String {
        let mut seed_path = self.scratch_path().into_os_string();
        seed_path.push(".seed");
        fs::read_to_string(seed_path).expect("editor did not capture the seed")
    }

    pub fn run(&mut self, args: &str) -> weechat_edit::ReturnCode {
        self.plugin.on_command(&mut self.host, &self.buffer, args)
    }

    pub fn input(&self) -> String {
        self.host.input_line(&self.buffer).text
    }

    pub fn input_pos(&self) -> usize {
        self.host.input_line(&self.buffer).pos
    }

    pub fn refresh_count(&self) -> usize {
        self.host
            .issued_commands()
            .iter()
            .filter(|(buffer, command)| {
                buffer == &self.buffer && command == "/window refresh"
            })
            .count()
    }
}
