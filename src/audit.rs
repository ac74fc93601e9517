//! Date-gap audit.
//!
//! Within one transcript, consecutive `<date>` elements should be close
//! together. A jump of more than the allowable gap almost always means one
//! of the two was mistyped. Each jump is reported with a ready-to-paste
//! override row for `dates::DATE_FIXES`; fixing the row's target value is
//! left to whoever checks the printed page.

use std::io::{self, Write};

use chrono::NaiveDate;

use crate::dates::parse_iso;
use crate::segment::DateRecord;

/// Gap used when none is configured.
pub const DEFAULT_GAP_DAYS: i64 = 250;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateAnomaly {
    /// Two consecutive dates further apart than allowed.
    Gap {
        previous: NaiveDate,
        current: NaiveDate,
        /// `format` attribute of the later date, as recorded
        raw: String,
        /// Printed text of the later date element
        excerpt: String,
        /// First date of the file, to help decide which side is wrong
        first: NaiveDate,
    },
    /// A date that is not a valid ISO calendar date at all.
    Unparsable { raw: String, excerpt: String },
}

/// Flag every adjacent pair further apart than `gap_days`.
///
/// Unparsable dates are reported on their own and do not take part in the
/// comparison.
pub fn audit(records: &[DateRecord], gap_days: i64) -> Vec<DateAnomaly> {
    let mut anomalies = Vec::new();
    let mut first: Option<NaiveDate> = None;
    let mut previous: Option<NaiveDate> = None;

    for record in records {
        let Some(current) = parse_iso(&record.date) else {
            anomalies.push(DateAnomaly::Unparsable {
                raw: record.raw.clone(),
                excerpt: record.excerpt.clone(),
            });
            continue;
        };

        if let Some(prev) = previous
            && (current - prev).num_days().abs() > gap_days
        {
            anomalies.push(DateAnomaly::Gap {
                previous: prev,
                current,
                raw: record.raw.clone(),
                excerpt: record.excerpt.clone(),
                first: first.unwrap_or(prev),
            });
        }

        first.get_or_insert(current);
        previous = Some(current);
    }

    anomalies
}

/// Print anomalies for one file, each followed by an override-table row.
pub fn write_report(out: &mut impl Write, source_id: &str, anomalies: &[DateAnomaly]) -> io::Result<()> {
    for anomaly in anomalies {
        match anomaly {
            DateAnomaly::Gap {
                previous,
                current,
                raw,
                excerpt,
                first,
            } => {
                writeln!(out, "  {previous} -> {current} [{excerpt}] - (first date {first})")?;
                writeln!(out, "  ((\"{raw}\", \"{source_id}\"), \"{current}\"),")?;
            }
            DateAnomaly::Unparsable { raw, excerpt } => {
                writeln!(out, "  unparsable date {raw:?} [{excerpt}]")?;
                writeln!(out, "  ((\"{raw}\", \"{source_id}\"), \"YYYY-MM-DD\"),")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
