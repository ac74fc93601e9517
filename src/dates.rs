//! Sitting-date correction.
//!
//! Transcribed sitting dates occasionally carry typos (a wrong month, a
//! transposed year). Left alone they would make a word look decades older
//! than it is. Known-bad values are repaired from a curated table keyed by
//! the raw string *and* the file it appears in, since the same raw string is
//! perfectly valid elsewhere.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;

/// Curated corrections: ((raw date, source file), corrected date).
///
/// New rows come from `audit` output after a human has checked the printed
/// page; never add a row the auditor did not flag.
pub const DATE_FIXES: &[((&str, &str), &str)] = &[
    (("1996-02-17", "S5LV0576P0.xml"), "1996-12-17"),
];

static BUILTIN: LazyLock<DateFixes> =
    LazyLock::new(|| DateFixes::from_entries(DATE_FIXES.iter().copied()));

/// Override table for raw sitting dates.
#[derive(Debug, Default)]
pub struct DateFixes {
    fixes: HashMap<(String, String), String>,
}

impl DateFixes {
    /// The table compiled into the binary.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = ((&'a str, &'a str), &'a str)>) -> Self {
        let fixes = entries
            .into_iter()
            .map(|((raw, source), fixed)| ((raw.to_string(), source.to_string()), fixed.to_string()))
            .collect();
        Self { fixes }
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    /// Correct `raw` as recorded in `source_id`.
    ///
    /// Unknown values are returned trimmed but otherwise untouched.
    pub fn normalize(&self, raw: &str, source_id: &str) -> String {
        let raw = raw.trim();
        self.fixes
            .get(&(raw.to_string(), source_id.to_string()))
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_iso(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}
