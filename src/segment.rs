//! Splitting a sitting into independently dated units.
//!
//! A sitting usually carries one date, but some embed sub-debates recorded
//! under a different date (adjourned business printed with the next day,
//! written answers). Each such child gets its own unit so its words are
//! dated correctly; the sitting's remaining prose forms the last unit.

use std::collections::HashSet;

use lexicon_types::Chamber;
use roxmltree::{Document, Node};

use crate::dates::DateFixes;
use crate::document::{self, DATE_TAG};
use crate::error::Result;
use crate::flatten::flatten;

/// A block of flattened prose with a single corrected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub date: String,
    pub chamber: Chamber,
    pub source: String,
    pub text: String,
}

/// Segment one sitting element.
///
/// Dated children come first in document order, then the sitting itself
/// with those children excluded.
pub fn segment(house: Node, chamber: Chamber, source_id: &str, fixes: &DateFixes) -> Result<Vec<Unit>> {
    let mut claimed = HashSet::new();
    let mut units = Vec::new();

    for child in house.children().filter(Node::is_element) {
        let Some(date) = document::child_element(child, DATE_TAG) else {
            continue;
        };
        let raw = document::date_format(date, source_id)?;
        units.push(Unit {
            date: fixes.normalize(raw, source_id),
            chamber,
            source: source_id.to_string(),
            text: flatten(child, &claimed),
        });
        claimed.insert(child.id());
    }

    let raw = document::own_date(house, source_id)?;
    units.push(Unit {
        date: fixes.normalize(raw, source_id),
        chamber,
        source: source_id.to_string(),
        text: flatten(house, &claimed),
    });

    Ok(units)
}

/// Segment every sitting of a parsed transcript.
pub fn segment_document(doc: &Document, source_id: &str, fixes: &DateFixes) -> Result<Vec<Unit>> {
    let mut units = Vec::new();
    for (chamber, house) in document::sittings(doc) {
        units.extend(segment(house, chamber, source_id, fixes)?);
    }
    Ok(units)
}

// ── Date stream for the auditor ──────────────────────────────────────

/// One `<date>` element as encountered in a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRecord {
    /// `format` attribute exactly as recorded
    pub raw: String,
    /// After override correction
    pub date: String,
    /// The element's printed text, e.g. "Tuesday, 17th December, 1996."
    pub excerpt: String,
}

/// Every `<date>` in the transcript, in document order.
pub fn date_records(doc: &Document, source_id: &str, fixes: &DateFixes) -> Result<Vec<DateRecord>> {
    doc.descendants()
        .filter(|n| n.has_tag_name(DATE_TAG))
        .map(|n| -> Result<DateRecord> {
            let raw = document::date_format(n, source_id)?;
            Ok(DateRecord {
                raw: raw.trim().to_string(),
                date: fixes.normalize(raw, source_id),
                excerpt: document::inner_text(n),
            })
        })
        .collect()
}
