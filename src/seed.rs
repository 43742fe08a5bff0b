//! Initial scratch-file content.
//!
//! `/edit f` seeds the message from the paste file, `/edit fc` does the same
//! inside a fenced code block, and any other argument text is used as is.

use std::fs;
use std::path::Path;

use crate::error::EditError;

/// Argument selecting the paste file as seed.
pub const PASTE_ARG: &str = "f";

/// Argument selecting the paste file, fenced as a code block.
pub const PASTE_FENCED_ARG: &str = "fc";

/// Code-block delimiter line.
pub const FENCE: &str = "```";

/// Where the message starts from before the editor opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// The command arguments, verbatim.
    Literal(String),
    /// The paste file content.
    PasteFile,
    /// The paste file content between fence lines.
    PasteFileFenced,
}

impl Seed {
    /// Select the seed for a command argument string. Only an exact `f` or
    /// `fc` selects the paste file.
    pub fn from_args(args: &str) -> Self {
        match args {
            PASTE_ARG => Seed::PasteFile,
            PASTE_FENCED_ARG => Seed::PasteFileFenced,
            other => Seed::Literal(other.to_string()),
        }
    }

    /// Produce the seed text, reading `paste_file` when selected.
    pub fn content(&self, paste_file: &Path) -> Result<String, EditError> {
        match self {
            Seed::Literal(text) => Ok(text.clone()),
            Seed::PasteFile => read_paste_file(paste_file),
            Seed::PasteFileFenced => {
                let contents = read_paste_file(paste_file)?;
                Ok(fence(&contents))
            }
        }
    }
}

/// Wrap `contents` in opening and closing fence lines.
pub fn fence(contents: &str) -> String {
    format!("{FENCE}\n{contents}\n{FENCE}")
}

fn read_paste_file(path: &Path) -> Result<String, EditError> {
    fs::read_to_string(path).map_err(|source| EditError::PasteFile {
        path: path.to_path_buf(),
        source,
    })
}
