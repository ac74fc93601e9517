use std::fs;
use std::path::Path;

use lexicon_types::{Chamber, LexiconEntry, Snapshot};

use crate::error::{Error, Result};

/// Earliest-use index: key → entry with the minimum date seen so far.
///
/// Dates are ISO `YYYY-MM-DD` strings and compare lexicographically. On an
/// exact date tie the entry already stored wins, so results are stable with
/// respect to input order.
#[derive(Debug, Default)]
pub struct Lexicon {
    entries: Snapshot,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a previously saved snapshot. A missing or undecodable file
    /// is an error, never an empty lexicon.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Snapshot = serde_json::from_str(&json).map_err(|source| Error::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { entries })
    }

    /// Write the snapshot, keys sorted, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| Error::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    /// Would an occurrence of `key` dated `date` replace the stored entry?
    pub fn would_accept(&self, key: &str, date: &str) -> bool {
        self.entries.get(key).is_none_or(|e| date < e.date.as_str())
    }

    /// Record an occurrence; returns whether the index changed.
    pub fn update(&mut self, key: &str, date: &str, snippet: String, chamber: Chamber, source: &str) -> bool {
        if !self.would_accept(key, date) {
            return false;
        }
        self.entries.insert(
            key.to_string(),
            LexiconEntry {
                word: key.to_string(),
                date: date.to_string(),
                snippet,
                chamber,
                source: source.to_string(),
            },
        );
        true
    }

    pub fn get(&self, key: &str) -> Option<&LexiconEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
