//! Cache-directory and scratch-file path resolution.
//!
//! The scratch file lives in WeeChat's cache directory when one exists
//! (`$XDG_CACHE_HOME/weechat`, default `~/.cache/weechat`) and otherwise in
//! WeeChat's home (`$WEECHAT_HOME`, default `~/.weechat`).

use std::path::{Path, PathBuf};

use crate::defaults::SCRATCH_FILE_NAME;

/// Read an environment variable, treating an empty value as unset.
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when the home directory is unknown, are
/// returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Directory holding the scratch file, resolved from the process environment.
pub fn weechat_cache_dir() -> PathBuf {
    weechat_cache_dir_with(env_var)
}

/// Directory holding the scratch file, resolved through `env`.
///
/// `env` returns the value of an environment variable, `None` when unset.
pub fn weechat_cache_dir_with<F>(env: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let xdg_cache = env("XDG_CACHE_HOME").unwrap_or_else(|| "~/.cache/".to_string());
    let cache_dir = expand_tilde(&xdg_cache).join("weechat");
    if cache_dir.is_dir() {
        return cache_dir;
    }

    let weechat_home = env("WEECHAT_HOME").unwrap_or_else(|| "~/.weechat/".to_string());
    let home_dir = expand_tilde(&weechat_home);
    log::debug!(
        "{:?} does not exist, falling back to {:?}",
        cache_dir,
        home_dir
    );
    home_dir
}

/// Scratch-file path inside `dir`.
pub fn scratch_path_in(dir: &Path) -> PathBuf {
    dir.join(SCRATCH_FILE_NAME)
}
