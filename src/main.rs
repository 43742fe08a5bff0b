use anyhow::Result;
use clap::Parser;
use weechat_edit::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log records go to the debug log file, not the terminal.
    weechat_edit::debug::init_log_bridge(cli.log_level());
    log::info!("Starting weechat-edit {}", weechat_edit::VERSION);

    let code = cli::run(cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
