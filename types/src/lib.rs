use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Chamber ──────────────────────────────────────────────────────────────

/// Which house a sitting was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    Commons,
    Lords,
}

impl Chamber {
    /// Tag name of this chamber's sitting element.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Commons => "housecommons",
            Self::Lords => "houselords",
        }
    }
}

// ── Lexicon entry ────────────────────────────────────────────────────────

/// Earliest recorded use of a word or phrase.
///
/// Persisted as a `[word, date, snippet, chamber, source]` array so that
/// snapshots stay compact and diff line-by-line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryTuple", into = "EntryTuple")]
pub struct LexiconEntry {
    /// Case-folded lexicon key
    pub word: String,
    /// ISO `YYYY-MM-DD` date after override correction
    pub date: String,
    /// Original-case quotation around the first use
    pub snippet: String,
    pub chamber: Chamber,
    /// File name of the transcript the snippet came from
    pub source: String,
}

type EntryTuple = (String, String, String, Chamber, String);

impl From<EntryTuple> for LexiconEntry {
    fn from((word, date, snippet, chamber, source): EntryTuple) -> Self {
        Self {
            word,
            date,
            snippet,
            chamber,
            source,
        }
    }
}

impl From<LexiconEntry> for EntryTuple {
    fn from(e: LexiconEntry) -> Self {
        (e.word, e.date, e.snippet, e.chamber, e.source)
    }
}

// ── Snapshot format ──────────────────────────────────────────────────────

/// On-disk lexicon: key → entry, sorted by key.
pub type Snapshot = BTreeMap<String, LexiconEntry>;
