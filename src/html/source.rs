use crate::common::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Longest input that is still considered as a possible file path.
pub const MAX_PATH_LEN: usize = 4096;

/// Where the HTML markup comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlSource {
    /// Literal markup
    Markup(String),
    /// Path to a file holding the markup
    File(PathBuf),
}

impl HtmlSource {
    /// Classify `input` as a file path or literal markup.
    ///
    /// The input is a path only if it is short enough to be one and names an
    /// existing regular file; everything else is markup.
    pub fn detect(input: impl Into<String>) -> Self {
        let input = input.into();
        if input.len() <= MAX_PATH_LEN && Path::new(&input).is_file() {
            Self::File(PathBuf::from(input))
        } else {
            Self::Markup(input)
        }
    }

    /// Load the markup.
    pub fn read(&self) -> Result<String> {
        match self {
            Self::Markup(html) => Ok(html.clone()),
            Self::File(path) => {
                let bytes = fs::read(path)?;
                String::from_utf8(bytes).map_err(|e| {
                    Error::Parse(format!("{} is not valid UTF-8: {}", path.display(), e))
                })
            },
        }
    }
}

impl From<&str> for HtmlSource {
    fn from(input: &str) -> Self {
        Self::detect(input)
    }
}

impl From<String> for HtmlSource {
    fn from(input: String) -> Self {
        Self::detect(input)
    }
}

impl From<PathBuf> for HtmlSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for HtmlSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}
