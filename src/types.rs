use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A page file reported by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScannedFile {
    /// Path relative to the scan root, `/`-separated.
    pub relative_path: String,
    pub absolute_path: PathBuf,
}

impl ScannedFile {
    pub fn new(relative_path: impl Into<String>, absolute_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
            absolute_path: absolute_path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    #[default]
    All,
    Client,
    Server,
}

impl RouteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}
