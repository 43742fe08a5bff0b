//! YAML options file for running `/edit` outside WeeChat.
//!
//! Holds the same four options WeeChat stores under `plugins.var`, at
//! `~/.config/weechat-edit/config.yaml` by default. A missing file is not an
//! error; it yields empty options.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;
use crate::options::OptionKey;

/// Plugin options loaded from disk. Unset entries fall through to the
/// environment and built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,

    /// Accepts a YAML boolean, `0`/`1`, or any WeeChat boolean string.
    #[serde(
        default,
        deserialize_with = "string_or_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub run_externally: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paste_file: Option<String>,
}

impl OptionsFile {
    /// Default location: `~/.config/weechat-edit/config.yaml`.
    pub fn default_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("weechat-edit").join("config.yaml")
            } else {
                PathBuf::from("config.yaml")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".config")
                    .join("weechat-edit")
                    .join("config.yaml")
            } else {
                PathBuf::from("config.yaml")
            }
        }
    }

    /// Load options from `path`, returning empty options if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Options file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading options from {:?}", path);
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(&contents)?)
    }

    /// Save options to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic replace: write a sibling temp file, then rename it over `path`.
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Value stored for `key`, if any.
    pub fn get(&self, key: OptionKey) -> Option<&str> {
        match key {
            OptionKey::Editor => self.editor.as_deref(),
            OptionKey::Terminal => self.terminal.as_deref(),
            OptionKey::RunExternally => self.run_externally.as_deref(),
            OptionKey::PasteFile => self.paste_file.as_deref(),
        }
    }

    /// Store `value` for `key`, replacing any previous value.
    pub fn set(&mut self, key: OptionKey, value: impl Into<String>) {
        let value = Some(value.into());
        match key {
            OptionKey::Editor => self.editor = value,
            OptionKey::Terminal => self.terminal = value,
            OptionKey::RunExternally => self.run_externally = value,
            OptionKey::PasteFile => self.paste_file = value,
        }
    }
}

fn string_or_bool<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Number(i64),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Flag(flag) => flag.to_string(),
        Raw::Number(number) => number.to_string(),
        Raw::Text(text) => text,
    }))
}
