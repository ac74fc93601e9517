//! Quotation around a token's first use.
//!
//! The snippet grows outwards from the token while the text stays
//! "readable": letters, digits, spaces and in-sentence punctuation. A period
//! normally ends the snippet, except where it abbreviates a title or a
//! middle initial ("Mr. Speaker", "J. Smith"), which would otherwise cut a
//! name in half.

use crate::tokenize::Span;

/// Words whose trailing period is not a sentence end.
pub const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "messrs", "dr", "hon", "rt", "esq", "no", "nos", "&c", "col", "cols", "viz",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Expand from a token edge over readable context.
///
/// `Left` starts at the token's first character and returns the index of the
/// leftmost accepted character. `Right` starts one past the token's last
/// character and returns one past the rightmost accepted character.
pub fn boundary(text: &[char], index: usize, direction: Direction) -> usize {
    let mut i = index.min(text.len());
    match direction {
        Direction::Left => {
            while i > 0 && is_readable(text, i - 1) {
                i -= 1;
            }
        }
        Direction::Right => {
            while i < text.len() && is_readable(text, i) {
                i += 1;
            }
        }
    }
    i
}

/// Original-case quotation around `span`, closed with the sentence
/// terminator (and closing quote) that stopped the scan, if any.
///
/// Returns `None` if `span` does not sit on a word in `text`.
pub fn snippet_for(text: &[char], span: Span) -> Option<String> {
    if span.start >= span.end || span.end > text.len() || !text[span.start].is_alphabetic() {
        return None;
    }

    let left = boundary(text, span.start, Direction::Left);
    let right = boundary(text, span.end, Direction::Right);
    let mut snippet = text[left..right].iter().collect::<String>().trim().to_string();

    if let Some(&end) = text.get(right)
        && matches!(end, '.' | '?' | '!')
    {
        snippet.push(end);
        if text.get(right + 1) == Some(&'"') {
            snippet.push('"');
        }
    }

    Some(snippet)
}

fn is_readable(text: &[char], i: usize) -> bool {
    let c = text[i];
    if c.is_alphabetic() || c.is_ascii_digit() {
        return true;
    }
    match c {
        ':' | ';' | ' ' | '\'' | ',' | '-' | '(' | ')' | '&' | '"' => true,
        '.' => is_initial(text, i) || follows_abbreviation(text, i),
        _ => false,
    }
}

/// "J. Smith": a single letter between a space and the period.
fn is_initial(text: &[char], i: usize) -> bool {
    i >= 2 && text[i - 2] == ' ' && text[i - 1].is_alphabetic()
}

fn follows_abbreviation(text: &[char], i: usize) -> bool {
    ABBREVIATIONS.iter().any(|abbr| {
        let n = abbr.chars().count();
        if i < n {
            return false;
        }
        let word = &text[i - n..i];
        let matches = word
            .iter()
            .zip(abbr.chars())
            .all(|(c, a)| c.to_lowercase().eq(std::iter::once(a)));
        matches && (i == n || !text[i - n - 1].is_alphabetic())
    })
}
