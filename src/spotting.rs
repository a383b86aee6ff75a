// src/spotting.rs
//
// Report standalone Latin acronyms (2-8 uppercase letters/digits) in text,
// using the same word-character class as the expansion matcher.

use std::collections::BTreeSet;

use fancy_regex::Regex;
use once_cell::sync::Lazy;
use tracing::warn;

use crate::pattern::WORD_CHAR_CLASS_CONTENT;

static ACRONYM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?<![{cls}])[A-Z0-9]{{2,8}}(?![{cls}])",
        cls = WORD_CHAR_CLASS_CONTENT.as_str()
    ))
    .expect("valid regex")
});

/// Sorted, de-duplicated acronyms found in `text`.
///
/// Pure digit runs such as years are skipped.
pub fn find_acronyms(text: &str) -> Vec<String> {
    let mut found = BTreeSet::new();
    for m in ACRONYM_RE.find_iter(text) {
        match m {
            Ok(m) if m.as_str().chars().any(|c| c.is_ascii_uppercase()) => {
                found.insert(m.as_str().to_string());
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Acronym scan stopped early: {}", e);
                break;
            }
        }
    }
    found.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_standalone_acronyms() {
        assert_eq!(
            find_acronyms("le KPI du SP, et encore KPI (CRM)."),
            ["CRM", "KPI", "SP"]
        );
    }

    #[test]
    fn test_respects_word_boundaries() {
        assert!(find_acronyms("SPX1234567890 منSP SPمن xKPI").is_empty());
        assert_eq!(find_acronyms("SPX"), ["SPX"]);
    }

    #[test]
    fn test_length_limits() {
        assert!(find_acronyms("A I").is_empty());
        assert!(find_acronyms("ABCDEFGHI").is_empty());
        assert_eq!(find_acronyms("ABCDEFGH"), ["ABCDEFGH"]);
    }

    #[test]
    fn test_digits() {
        assert_eq!(find_acronyms("en 2024 la 5G"), ["5G"]);
    }

    #[test]
    fn test_after_normalization_output() {
        assert_eq!(find_acronyms("DD SP avance"), ["DD", "SP"]);
    }
}
