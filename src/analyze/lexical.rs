//! Lexical signal: exact, case-insensitive substring matches against a phrase list.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LexicalSignal {
    pub count: usize,
    /// Matched phrases in the list's canonical order.
    pub matched: Vec<String>,
}

/// Scan `text` for every phrase in `phrases`. Phrases are expected lower-case.
pub fn detect_phrases(text: &str, phrases: &[&str]) -> LexicalSignal {
    let lowered = text.to_lowercase();
    let matched: Vec<String> = phrases
        .iter()
        .filter(|p| lowered.contains(**p))
        .map(|p| p.to_string())
        .collect();
    LexicalSignal {
        count: matched.len(),
        matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::phrases::SUSPICIOUS_PHRASES;

    #[test]
    fn empty_text_has_no_matches() {
        let s = detect_phrases("", SUSPICIOUS_PHRASES);
        assert_eq!(s.count, 0);
        assert!(s.matched.is_empty());
    }

    #[test]
    fn matches_keep_list_order_not_text_order() {
        let s = detect_phrases("ACT NOW and claim your FREE MONEY!", SUSPICIOUS_PHRASES);
        assert_eq!(s.matched, vec!["free money", "act now"]);
        assert_eq!(s.count, 2);
    }

    #[test]
    fn no_fuzzy_matching() {
        let s = detect_phrases("free  money, act-now", SUSPICIOUS_PHRASES);
        assert_eq!(s.count, 0);
    }

    #[test]
    fn overlapping_phrases_each_count_once() {
        // "guaranteed income" also contains "guaranteed"
        let s = detect_phrases("Guaranteed income for everyone", SUSPICIOUS_PHRASES);
        assert_eq!(s.matched, vec!["guaranteed income", "guaranteed"]);
    }
}
