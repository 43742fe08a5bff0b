//! Command-line interface for running `/edit` outside WeeChat.
//!
//! `weechat-edit [ARGS]...` runs one edit session against a
//! [`StandaloneHost`] and prints the resulting input line on stdout.
//! `weechat-edit set <KEY> <VALUE>` stores a plugin option in the options
//! file, the standalone counterpart of `/set plugins.var.*.edit.<KEY>`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::config::{OptionKey, OptionsFile};
use crate::host::{BufferId, Host, ReturnCode};
use crate::plugin::EditPlugin;
use crate::scratch::ScratchFile;
use crate::standalone::StandaloneHost;

/// weechat-edit - compose a message in your $EDITOR
#[derive(Parser, Debug)]
#[command(name = "weechat-edit")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Text of the input line before editing
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub input: String,

    /// Editor command (overrides the options file)
    #[arg(long, value_name = "COMMAND")]
    pub editor: Option<String>,

    /// Terminal command for --run-externally (overrides the options file)
    #[arg(long, value_name = "COMMAND")]
    pub terminal: Option<String>,

    /// Open the editor in a separate terminal window
    #[arg(long, overrides_with = "no_run_externally")]
    pub run_externally: bool,

    /// Run the editor in this terminal even if the options file says otherwise
    #[arg(long, overrides_with = "run_externally")]
    pub no_run_externally: bool,

    /// File used by `f` and `fc` (overrides the options file)
    #[arg(long, value_name = "PATH")]
    pub paste_file: Option<String>,

    /// Directory for the scratch file (default: WeeChat cache directory)
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Options file (default: ~/.config/weechat-edit/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level written to the debug log
    #[arg(
        long,
        value_name = "LEVEL",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: Option<String>,

    /// Arguments of the /edit command: `f`, `fc`, or initial text
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a plugin option in the options file
    Set {
        /// Option name: editor, terminal, run_externally or paste_file
        key: String,
        /// New value
        value: String,
    },
}

impl Cli {
    /// Log level requested with `--log-level`, if any.
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
    }

    fn options_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(OptionsFile::default_path)
    }

    /// Options file content with command-line overrides applied.
    fn options(&self) -> Result<OptionsFile> {
        let path = self.options_path();
        let mut options = OptionsFile::load(&path)
            .with_context(|| format!("loading options from {}", path.display()))?;
        if let Some(editor) = &self.editor {
            options.set(OptionKey::Editor, editor.clone());
        }
        if let Some(terminal) = &self.terminal {
            options.set(OptionKey::Terminal, terminal.clone());
        }
        if self.run_externally {
            options.set(OptionKey::RunExternally, "on");
        } else if self.no_run_externally {
            options.set(OptionKey::RunExternally, "off");
        }
        if let Some(paste_file) = &self.paste_file {
            options.set(OptionKey::PasteFile, paste_file.clone());
        }
        Ok(options)
    }
}

/// Execute the parsed command line. Returns the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Some(Commands::Set { key, value }) => {
            set_option(&cli.options_path(), key, value)?;
            Ok(0)
        }
        None => edit_once(&cli),
    }
}

fn set_option(path: &std::path::Path, key: &str, value: &str) -> Result<()> {
    let Some(key) = OptionKey::from_name(key) else {
        bail!(
            "unknown option '{}' (expected one of: {})",
            key,
            OptionKey::ALL.map(OptionKey::as_str).join(", ")
        );
    };
    let mut options = OptionsFile::load(path)?;
    options.set(key, value);
    options
        .save(path)
        .with_context(|| format!("saving options to {}", path.display()))?;
    log::info!("Set {} = {:?} in {:?}", key, value, path);
    Ok(())
}

fn edit_once(cli: &Cli) -> Result<i32> {
    let mut host = StandaloneHost::new(cli.options()?).with_echo(true);
    let scratch = match &cli.scratch_dir {
        Some(dir) => ScratchFile::in_dir(dir),
        None => ScratchFile::resolve(),
    };
    let plugin = EditPlugin::load_with(&mut host, scratch)?;

    let buffer = BufferId::new("standalone");
    host.set_input(&buffer, &cli.input);
    host.set_input_pos(&buffer, cli.input.chars().count());

    let args = cli.args.join(" ");
    let rc = plugin.on_command(&mut host, &buffer, &args);
    host.run_until_idle();

    println!("{}", host.input_line(&buffer).text);

    let failed = rc.is_error()
        || host
            .callback_results()
            .iter()
            .any(|(_, rc)| *rc == ReturnCode::Error);
    Ok(if failed { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn trailing_arguments_are_collected() {
        let cli = Cli::parse_from(["weechat-edit", "--input", "x", "hello", "-world"]);
        assert_eq!(cli.input, "x");
        assert_eq!(cli.args, vec!["hello", "-world"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn set_subcommand_parses() {
        let cli = Cli::parse_from(["weechat-edit", "set", "editor", "nvim -f"]);
        match cli.command {
            Some(Commands::Set { key, value }) => {
                assert_eq!(key, "editor");
                assert_eq!(value, "nvim -f");
            }
            other => panic!("expected Set, got {other:?}"),
        }
    }

    #[test]
    fn set_option_writes_options_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        set_option(&path, "terminal", "kitty").unwrap();
        let options = OptionsFile::load(&path).unwrap();
        assert_eq!(options.get(OptionKey::Terminal), Some("kitty"));
    }

    #[test]
    fn set_option_rejects_unknown_key() {
        let dir = TempDir::new().unwrap();
        let err = set_option(&dir.path().join("config.yaml"), "colour", "red").unwrap_err();
        assert!(err.to_string().contains("unknown option 'colour'"));
    }

    #[test]
    fn command_line_overrides_options_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        set_option(&path, "editor", "nano").unwrap();

        let cli = Cli::parse_from([
            "weechat-edit",
            "--config",
            path.to_str().unwrap(),
            "--editor",
            "vi",
            "--run-externally",
        ]);
        let options = cli.options().unwrap();
        assert_eq!(options.get(OptionKey::Editor), Some("vi"));
        assert_eq!(options.get(OptionKey::RunExternally), Some("on"));
    }

    #[test]
    fn no_run_externally_turns_stored_option_off() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        set_option(&path, "run_externally", "on").unwrap();

        let cli = Cli::parse_from([
            "weechat-edit",
            "--config",
            path.to_str().unwrap(),
            "--no-run-externally",
        ]);
        let options = cli.options().unwrap();
        assert_eq!(options.get(OptionKey::RunExternally), Some("off"));
    }

    #[test]
    fn last_run_externally_flag_wins() {
        let cli = Cli::parse_from(["weechat-edit", "--no-run-externally", "--run-externally"]);
        assert!(cli.run_externally);
        assert!(!cli.no_run_externally);
    }
}
