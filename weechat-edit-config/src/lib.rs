//! Configuration for the weechat-edit plugin.
//!
//! This crate provides:
//!
//! - The four plugin option keys and WeeChat boolean parsing
//! - Settings resolution (plugin option, then environment, then default)
//! - Cache-directory and scratch-file path resolution
//! - A YAML options file used when running outside WeeChat

pub mod defaults;
pub mod error;
pub mod file;
pub mod options;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use file::OptionsFile;
pub use options::{OptionKey, parse_boolean};
pub use paths::{expand_tilde, scratch_path_in, weechat_cache_dir, weechat_cache_dir_with};
pub use settings::EditorSettings;
