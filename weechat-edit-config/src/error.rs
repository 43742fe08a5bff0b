//! Typed error variants for the weechat-edit-config crate.
//!
//! Produced by [`crate::OptionsFile::load`] and [`crate::OptionsFile::save`].

use thiserror::Error;

/// Errors that can occur when loading or saving the options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the options file.
    #[error("I/O error on options file: {0}")]
    Io(#[from] std::io::Error),

    /// The options file contained invalid YAML.
    #[error("YAML parse error in options file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}
