use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while building or auditing the lexicon.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read transcript {}: {source}", path.display())]
    ReadDocument {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        source: roxmltree::Error,
    },

    #[error("{source_id}: <{element}> has no <date> child")]
    MissingDate { source_id: String, element: String },

    #[error("{source_id}: <date> element has no format attribute")]
    MissingDateFormat { source_id: String },

    #[error("cannot decode lexicon snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The tokenizer and the snippet scanner disagree about the text.
    #[error("token {key:?} cannot be located in {source_id}")]
    UnmatchedToken { key: String, source_id: String },
}

impl Error {
    /// Errors confined to one input file; the run moves on to the next file.
    pub fn is_document_local(&self) -> bool {
        matches!(
            self,
            Self::ReadDocument { .. }
                | Self::Xml { .. }
                | Self::MissingDate { .. }
                | Self::MissingDateFormat { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
