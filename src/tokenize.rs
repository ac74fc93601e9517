//! Word and capitalised-phrase candidates for the lexicon.
//!
//! Positions are `char` indices into the flattened text, so the snippet
//! scanner can walk outwards from exactly the characters the tokenizer saw.
//!
//! Rules:
//! - A token starts at any alphabetic character.
//! - It runs through letters, and through `'`, `-` or `.` when the next
//!   character is a letter ("don't", "well-known", "U.S").
//! - When a run that began with a capital meets a single space followed by
//!   another capital, the run keeps going into the next word. Every phrase
//!   open at that point is emitted ending before the space, and a new phrase
//!   opens after it.
//!
//! Example:
//!   "New York City is" →
//!   [New][New York][York][New York City][York City][City][is]

/// Half-open `char` range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Scan `text` left to right and return every candidate span.
pub fn tokenize(text: &[char]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < text.len() {
        if !text[i].is_alphabetic() {
            i += 1;
            continue;
        }

        let run_start = i;
        let mut open = vec![run_start];
        let mut j = i;

        loop {
            while j < text.len() && continues_word(text, j) {
                j += 1;
            }
            if chains_phrase(text, run_start, j) {
                spans.extend(open.iter().map(|&start| Span { start, end: j }));
                open.push(j + 1);
                j += 1;
                continue;
            }
            break;
        }

        spans.extend(open.iter().map(|&start| Span { start, end: j }));
        i = j;
    }

    spans
}

/// Case-folded lexicon key for a span.
pub fn key(text: &[char], span: Span) -> String {
    fold(text[span.start..span.end].iter().copied())
}

/// Caseless form of a word or phrase.
///
/// Lowercasing plus the full folds that change length or merge letters
/// lowercasing keeps apart: "Straße" and "STRASSE" share a key, as do the
/// long s and ligatures of older typesetting and their plain spellings.
pub fn fold(chars: impl IntoIterator<Item = char>) -> String {
    let mut out = String::new();
    for c in chars {
        match c {
            'ß' | 'ẞ' => out.push_str("ss"),
            'ſ' => out.push('s'),
            'ς' => out.push('σ'),
            'ﬀ' => out.push_str("ff"),
            'ﬁ' => out.push_str("fi"),
            'ﬂ' => out.push_str("fl"),
            'ﬃ' => out.push_str("ffi"),
            'ﬄ' => out.push_str("ffl"),
            'ﬅ' | 'ﬆ' => out.push_str("st"),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

fn continues_word(text: &[char], j: usize) -> bool {
    let c = text[j];
    if c.is_alphabetic() {
        return true;
    }
    matches!(c, '\'' | '-' | '.') && text.get(j + 1).is_some_and(|n| n.is_alphabetic())
}

/// A single space at `j` joining two capitalised words.
fn chains_phrase(text: &[char], run_start: usize, j: usize) -> bool {
    text.get(j) == Some(&' ')
        && text[run_start].is_uppercase()
        && text.get(j + 1).is_some_and(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn keys(s: &str) -> Vec<String> {
        let text = chars(s);
        tokenize(&text).into_iter().map(|sp| key(&text, sp)).collect()
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(keys("the house rose."), vec!["the", "house", "rose"]);
    }

    #[test]
    fn test_apostrophe_and_hyphen_inside_word() {
        assert_eq!(keys("don't well-known"), vec!["don't", "well-known"]);
    }

    #[test]
    fn test_trailing_apostrophe_and_hyphen_end_word() {
        assert_eq!(keys("members' self- interest"), vec!["members", "self", "interest"]);
    }

    #[test]
    fn test_digits_are_not_words() {
        assert_eq!(keys("clause 12a, 1803"), vec!["clause", "a"]);
    }

    #[test]
    fn test_dotted_abbreviation_is_one_token() {
        assert_eq!(keys("the u.s. fleet"), vec!["the", "u.s", "fleet"]);
    }

    #[test]
    fn test_capitalised_chain_yields_all_suffix_phrases() {
        let got: HashSet<String> = keys("New York City is large.").into_iter().collect();
        let want: HashSet<String> = [
            "new", "york", "city", "new york", "york city", "new york city", "is", "large",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_capitalised_chain_exact_order() {
        assert_eq!(
            keys("New York City"),
            vec!["new", "new york", "york", "new york city", "york city", "city"]
        );
    }

    #[test]
    fn test_chain_yields_each_word_and_full_phrase() {
        let text = "the Chancellor Of The Exchequer spoke";
        let got = keys(text);
        for w in ["chancellor", "of", "the", "exchequer", "chancellor of the exchequer"] {
            assert!(got.contains(&w.to_string()), "missing {w}");
        }
    }

    #[test]
    fn test_chain_requires_capital_start() {
        assert_eq!(keys("said London"), vec!["said", "london"]);
    }

    #[test]
    fn test_chain_broken_by_punctuation_or_double_space() {
        assert_eq!(keys("Mr. Speaker"), vec!["mr", "speaker"]);
        assert_eq!(keys("Lord  Derby"), vec!["lord", "derby"]);
        assert_eq!(keys("Lord, Derby"), vec!["lord", "derby"]);
    }

    #[test]
    fn test_dot_continuation_and_chain_apply_independently() {
        let got = keys("U.S Department");
        assert!(got.contains(&"u.s department".to_string()));
        assert!(got.contains(&"department".to_string()));
        assert_eq!(keys("U.S. Department"), vec!["u.s", "department"]);
    }

    #[test]
    fn test_spans_point_at_original_characters() {
        let text = chars("Ça va, Señor Núñez");
        let spans = tokenize(&text);
        let words: Vec<String> = spans
            .iter()
            .map(|sp| text[sp.start..sp.end].iter().collect())
            .collect();
        assert_eq!(words, vec!["Ça", "va", "Señor", "Señor Núñez", "Núñez"]);
        assert!(spans.iter().all(|sp| sp.end > sp.start));
    }

    #[test]
    fn test_keys_fold_sharp_s() {
        assert_eq!(
            keys("STRASSE Straße"),
            vec!["strasse", "strasse strasse", "strasse"]
        );
    }

    #[test]
    fn test_fold_merges_old_letterforms() {
        assert_eq!(fold("Poſſeſſion".chars()), "possession");
        assert_eq!(fold("ﬁnance ﬂoor".chars()), "finance floor");
        assert_eq!(fold("ΟΔΟΣ".chars()), "οδοσ");
        assert_eq!(fold("οδος".chars()), "οδοσ");
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let text = chars("The Prime Minister's answer was well-received.");
        assert_eq!(tokenize(&text), tokenize(&text));
    }
}
