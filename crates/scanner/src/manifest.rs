//! The JSON manifest handed to the front end.
//!
//! Top level is an object keyed by library directory (forward slashes); each
//! value is the list of games found there. Written pretty-printed with a
//! four-space indent and always overwritten as a whole.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// A discovered game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameEntry {
    /// A game folder listed in an id → path mapping (RPCS3).
    Folder {
        name: String,
        path: String,
        id: String,
        icon_path: Option<String>,
    },
    /// A game file found in a library directory.
    File {
        filename: String,
        icon_path: Option<String>,
    },
}

impl GameEntry {
    /// Name shown to the player.
    pub fn display_name(&self) -> &str {
        match self {
            GameEntry::Folder { name, .. } => name,
            GameEntry::File { filename, .. } => filename,
        }
    }

    pub fn icon_path(&self) -> Option<&str> {
        match self {
            GameEntry::Folder { icon_path, .. } | GameEntry::File { icon_path, .. } => {
                icon_path.as_deref()
            }
        }
    }
}

/// Library directory → games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    dirs: BTreeMap<String, Vec<GameEntry>>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the games of `directory`, replacing any earlier list for it.
    ///
    /// The key is normalized to forward slashes. Empty keys and empty lists
    /// are ignored so every key in the output has at least one game.
    pub fn insert(&mut self, directory: &str, games: Vec<GameEntry>) {
        let key = normalize_path(directory);
        if key.is_empty() || games.is_empty() {
            return;
        }
        self.dirs.insert(key, games);
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Number of library directories.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Total number of games across all directories.
    pub fn game_count(&self) -> usize {
        self.dirs.values().map(Vec::len).sum()
    }

    pub fn get(&self, directory: &str) -> Option<&[GameEntry]> {
        self.dirs.get(&normalize_path(directory)).map(Vec::as_slice)
    }

    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.dirs.keys().map(String::as_str)
    }

    /// Serializes with a four-space indent.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>, ScanError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }

    /// Writes the manifest to `path`, creating the parent directory if needed.
    pub fn write_to(&self, path: &Path) -> Result<(), ScanError> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reads a manifest previously written by [`Manifest::write_to`].
    pub fn read_from(path: &Path) -> Result<Self, ScanError> {
        let content = std::fs::read(path)?;
        Ok(serde_json::from_slice(&content)?)
    }
}

/// Converts any backslash separators to forward slashes.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
