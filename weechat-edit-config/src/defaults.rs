//! Default values used when neither a plugin option nor an environment
//! variable supplies a setting.

/// Editor command when `editor` and `$EDITOR` are both unset.
pub const EDITOR: &str = "vim -f";

/// Terminal command when `terminal` and `$TERMCMD` are both unset.
pub const TERMINAL: &str = "xterm";

/// Paste-file path when `paste_file` is unset.
pub const PASTE_FILE: &str = "/mnt/storage/dl/slack/upload/upload.txt";

/// Environment variable consulted for the editor command.
pub const EDITOR_ENV: &str = "EDITOR";

/// Environment variable consulted for the terminal command.
pub const TERMINAL_ENV: &str = "TERMCMD";

/// File name of the scratch file inside the cache directory.
pub const SCRATCH_FILE_NAME: &str = "message.md";
