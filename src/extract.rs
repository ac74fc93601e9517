use std::collections::HashSet;
use std::path::Path;

use crate::dates::DateFixes;
use crate::document;
use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use crate::segment::{self, Unit};
use crate::snippet::snippet_for;
use crate::tokenize::{key, tokenize};

/// Counters for one processed transcript.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    pub units: usize,
    pub candidates: usize,
    pub updated: usize,
}

/// Feed one unit into the lexicon.
///
/// Each key is considered once per unit, at its first occurrence; a snippet
/// is only cut when the unit's date could beat what the lexicon holds.
/// Returns `(candidates, updated)`.
pub fn process_unit(lexicon: &mut Lexicon, unit: &Unit) -> Result<(usize, usize)> {
    let text: Vec<char> = unit.text.chars().collect();
    let mut seen = HashSet::new();
    let mut updated = 0;

    for span in tokenize(&text) {
        let word = key(&text, span);
        if !seen.insert(word.clone()) || !lexicon.would_accept(&word, &unit.date) {
            continue;
        }
        let snippet = snippet_for(&text, span).ok_or_else(|| Error::UnmatchedToken {
            key: word.clone(),
            source_id: unit.source.clone(),
        })?;
        if lexicon.update(&word, &unit.date, snippet, unit.chamber, &unit.source) {
            updated += 1;
        }
    }

    Ok((seen.len(), updated))
}

/// Read, segment and tokenise one transcript.
pub fn process_file(path: &Path, lexicon: &mut Lexicon, fixes: &DateFixes) -> Result<FileStats> {
    let xml = document::read_transcript(path)?;
    let doc = document::parse_transcript(path, &xml)?;
    let source_id = document::source_id(path);

    // Segment the whole file before touching the lexicon so a malformed
    // sitting late in the file leaves no partial updates behind.
    let units = segment::segment_document(&doc, &source_id, fixes)?;

    let mut stats = FileStats {
        units: units.len(),
        ..Default::default()
    };
    for unit in &units {
        let (candidates, updated) = process_unit(lexicon, unit)?;
        stats.candidates += candidates;
        stats.updated += updated;
    }

    tracing::debug!(
        file = %source_id,
        units = stats.units,
        updated = stats.updated,
        "processed transcript"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicon_types::Chamber;

    fn unit(date: &str, text: &str) -> Unit {
        Unit {
            date: date.to_string(),
            chamber: Chamber::Commons,
            source: "f.xml".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_unit_populates_words_and_phrases() {
        let mut lex = Lexicon::new();
        let (candidates, updated) =
            process_unit(&mut lex, &unit("1850-02-01", "New York City is large.")).unwrap();
        assert_eq!(candidates, 8);
        assert_eq!(updated, 8);
        assert_eq!(lex.get("new york city").unwrap().snippet, "New York City is large.");
        assert_eq!(lex.get("large").unwrap().date, "1850-02-01");
    }

    #[test]
    fn test_first_occurrence_in_unit_supplies_snippet() {
        let mut lex = Lexicon::new();
        process_unit(&mut lex, &unit("1850-02-01", "Order. The order stands.")).unwrap();
        assert_eq!(lex.get("order").unwrap().snippet, "Order.");
    }

    #[test]
    fn test_seeded_entry_replaced_only_by_earlier_unit() {
        let mut lex = Lexicon::new();
        lex.update("test", "2000-01-01", "Seed test.".into(), Chamber::Lords, "seed.xml");

        process_unit(&mut lex, &unit("1990-01-01", "A test of nerve.")).unwrap();
        assert_eq!(lex.get("test").unwrap().date, "1990-01-01");
        assert_eq!(lex.get("test").unwrap().snippet, "A test of nerve.");

        let (_, updated) = process_unit(&mut lex, &unit("1999-01-01", "Another test.")).unwrap();
        assert_eq!(updated, 1); // "another"
        assert_eq!(lex.get("test").unwrap().date, "1990-01-01");
        assert_eq!(lex.get("test").unwrap().snippet, "A test of nerve.");
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let text = "Mr. Speaker, the Bill is read a Second Time.";
        let mut a = Lexicon::new();
        let mut b = Lexicon::new();
        process_unit(&mut a, &unit("1900-01-01", text)).unwrap();
        process_unit(&mut b, &unit("1900-01-01", text)).unwrap();
        let (_, updated) = process_unit(&mut a, &unit("1900-01-01", text)).unwrap();
        assert_eq!(updated, 0);
        assert_eq!(a.len(), b.len());
        assert_eq!(a.get("second time"), b.get("second time"));
    }

    #[test]
    fn test_process_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("S5LV0576P0.xml");
        std::fs::write(
            &path,
            r#"<hansard><houselords>
                <date format="1996-02-17">Tuesday, 17th December 1996.</date>
                <p>The Lord Chancellor took his seat on the Woolsack.</p>
            </houselords></hansard>"#,
        )
        .unwrap();

        let mut lex = Lexicon::new();
        let stats = process_file(&path, &mut lex, DateFixes::builtin()).unwrap();
        assert_eq!(stats.units, 1);
        let e = lex.get("woolsack").unwrap();
        assert_eq!(e.date, "1996-12-17");
        assert_eq!(e.chamber, Chamber::Lords);
        assert_eq!(e.source, "S5LV0576P0.xml");
        assert_eq!(lex.get("the lord chancellor").unwrap().snippet, e.snippet);
    }

    #[test]
    fn test_malformed_file_is_document_local() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, "<hansard><housecommons>").unwrap();

        let mut lex = Lexicon::new();
        let err = process_file(&path, &mut lex, DateFixes::builtin()).unwrap_err();
        assert!(err.is_document_local());
        assert!(lex.is_empty());
    }

    #[test]
    fn test_undated_sitting_leaves_lexicon_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("undated.xml");
        std::fs::write(
            &path,
            r#"<hansard>
                <housecommons><date format="1900-01-01"/><p>Dated words.</p></housecommons>
                <houselords><p>Undated words.</p></houselords>
            </hansard>"#,
        )
        .unwrap();

        let mut lex = Lexicon::new();
        let err = process_file(&path, &mut lex, DateFixes::builtin()).unwrap_err();
        assert!(matches!(err, Error::MissingDate { .. }));
        assert!(lex.is_empty());
    }
}
