//! The scratch file holding the message while it is being edited.
//!
//! Created when `/edit` runs, read back when the editor exits, then removed.
//! Read and remove failures never reach the user; an absent file after an
//! edit is an expected outcome (the editor may have deleted it, or cleanup
//! already ran).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use weechat_edit_config::{scratch_path_in, weechat_cache_dir};

/// Location of the per-session message file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `message.md` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(scratch_path_in(dir))
    }

    /// `message.md` inside the WeeChat cache directory of this environment.
    pub fn resolve() -> Self {
        Self::in_dir(&weechat_cache_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Overwrite the file with `seed` followed by `input`.
    pub fn write(&self, seed: &str, input: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut contents = String::with_capacity(seed.len() + input.len());
        contents.push_str(seed);
        contents.push_str(input);
        fs::write(&self.path, contents)
    }

    /// File content with surrounding whitespace removed, or `None` if the
    /// file cannot be read.
    pub fn read_trimmed(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Some(text.trim().to_string()),
            Err(e) => {
                log::debug!("Scratch file {:?} not read back: {}", self.path, e);
                None
            }
        }
    }

    /// Delete the file, ignoring any failure. Safe to call repeatedly.
    pub fn remove(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::debug!("Scratch file {:?} not removed: {}", self.path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_concatenates_seed_and_input() {
        let dir = TempDir::new().unwrap();
        let scratch = ScratchFile::in_dir(dir.path());
        scratch.write("hello ", "world").unwrap();
        assert_eq!(fs::read_to_string(scratch.path()).unwrap(), "hello world");
        assert_eq!(scratch.path().file_name().unwrap(), "message.md");
    }

    #[test]
    fn write_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let scratch = ScratchFile::in_dir(&dir.path().join("weechat"));
        scratch.write("", "x").unwrap();
        assert!(scratch.exists());
    }

    #[test]
    fn read_trimmed_strips_whitespace() {
        let dir = TempDir::new().unwrap();
        let scratch = ScratchFile::in_dir(dir.path());
        fs::write(scratch.path(), "\n\t  draft message \n\n").unwrap();
        assert_eq!(scratch.read_trimmed().as_deref(), Some("draft message"));
    }

    #[test]
    fn read_trimmed_of_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ScratchFile::in_dir(dir.path()).read_trimmed(), None);
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let scratch = ScratchFile::in_dir(dir.path());
        scratch.write("a", "").unwrap();
        scratch.remove();
        assert!(!scratch.exists());
        scratch.remove();
        assert!(!scratch.exists());
    }
}
