// src/registry.rs
//
// Acronym registry (short code -> full phrase) and the whole-word matcher
// compiled from its keys.

use std::collections::BTreeMap;

use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::pattern::is_word_char;

/// Immutable mapping from short code to full phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcronymRegistry {
    entries: BTreeMap<String, String>,
}

impl AcronymRegistry {
    /// Build a registry from any short -> long mapping. Empty short codes
    /// can never match and are dropped.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (short, long) in entries {
            let short = short.into();
            if short.is_empty() {
                warn!("Ignoring registry entry with an empty short code");
                continue;
            }
            map.insert(short, long.into());
        }
        Self { entries: map }
    }

    /// Full phrase for `short`, if registered.
    pub fn get(&self, short: &str) -> Option<&str> {
        self.entries.get(short).map(String::as_str)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compile a whole-word matcher over every short code.
    pub fn compile(&self) -> BoundaryMatcher {
        BoundaryMatcher::new(self.codes())
    }

    /// Codes whose full phrase itself contains a standalone occurrence of
    /// some registered code. Expansion is only idempotent when this is empty.
    pub fn reintroducing_codes(&self) -> Vec<String> {
        let matcher = self.compile();
        self.entries
            .iter()
            .filter(|(_, long)| matcher.is_match(long))
            .map(|(short, _)| short.clone())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AcronymRegistry {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// A standalone occurrence of a registered code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit<'m> {
    /// Byte offset of the first byte of the code.
    pub start: usize,
    /// Byte offset one past the last byte of the code.
    pub end: usize,
    pub code: &'m str,
}

/// Literal multi-key matcher that only reports hits not touching a word
/// character on either side.
///
/// Keys are ordered longest first, so where several keys could start a
/// match at the same position the longest one that satisfies the boundary
/// condition wins.
#[derive(Debug, Clone)]
pub struct BoundaryMatcher {
    automaton: Option<AhoCorasick>,
    keys: Vec<String>,
}

impl BoundaryMatcher {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.as_ref().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        // Longest first; ties broken lexically so construction is deterministic.
        keys.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        keys.dedup();

        if keys.is_empty() {
            return Self {
                automaton: None,
                keys,
            };
        }

        // Standard semantics so overlapping search reports every candidate;
        // priority and boundaries are resolved in `find_iter`.
        let automaton = match AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&keys)
        {
            Ok(automaton) => {
                info!("Compiled acronym matcher over {} keys", keys.len());
                Some(automaton)
            }
            Err(e) => {
                error!("Failed to build acronym matcher over {} keys: {}", keys.len(), e);
                None
            }
        };

        Self { automaton, keys }
    }

    /// A matcher that never matches.
    pub fn empty() -> Self {
        Self {
            automaton: None,
            keys: Vec::new(),
        }
    }

    /// Keys in priority order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Non-overlapping boundary-respecting hits, left to right.
    pub fn find_iter<'m>(&'m self, text: &str) -> Vec<Hit<'m>> {
        let Some(automaton) = &self.automaton else {
            return Vec::new();
        };

        // (start, key index) orders candidates by position, then longest key.
        let mut candidates: Vec<(usize, usize, usize)> = automaton
            .find_overlapping_iter(text)
            .map(|m| (m.start(), m.pattern().as_usize(), m.end()))
            .collect();
        candidates.sort_unstable();

        let mut hits = Vec::new();
        let mut cursor = 0;
        for (start, key, end) in candidates {
            if start < cursor || !is_standalone(text, start, end) {
                continue;
            }
            hits.push(Hit {
                start,
                end,
                code: &self.keys[key],
            });
            cursor = end;
        }
        hits
    }

    pub fn is_match(&self, text: &str) -> bool {
        !self.find_iter(text).is_empty()
    }
}

/// True if `text[start..end]` is not glued to a word character.
fn is_standalone(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes<'a>(matcher: &'a BoundaryMatcher, text: &str) -> Vec<&'a str> {
        matcher.find_iter(text).into_iter().map(|h| h.code).collect()
    }

    #[test]
    fn test_keys_sorted_longest_first() {
        let matcher = BoundaryMatcher::new(["SP", "ATF", "A", "NLP"]);
        assert_eq!(matcher.keys(), ["ATF", "NLP", "SP", "A"]);
    }

    #[test]
    fn test_whole_word_only() {
        let matcher = BoundaryMatcher::new(["SP"]);
        assert_eq!(codes(&matcher, "SP"), ["SP"]);
        assert_eq!(codes(&matcher, "the SP, again (SP)."), ["SP", "SP"]);
        assert!(codes(&matcher, "SPX").is_empty());
        assert!(codes(&matcher, "XSP").is_empty());
        assert!(codes(&matcher, "SP_1").is_empty());
        assert!(codes(&matcher, "SP2").is_empty());
    }

    #[test]
    fn test_arabic_neighbours_block_latin_code() {
        let matcher = BoundaryMatcher::new(["SP"]);
        assert!(codes(&matcher, "منSP").is_empty());
        assert!(codes(&matcher, "SPمن").is_empty());
        assert_eq!(codes(&matcher, "من SP من"), ["SP"]);
    }

    #[test]
    fn test_latin_neighbours_block_arabic_code() {
        let matcher = BoundaryMatcher::new(["سوفريكوم"]);
        assert!(codes(&matcher, "xسوفريكوم").is_empty());
        assert_eq!(codes(&matcher, "(سوفريكوم)"), ["سوفريكوم"]);
    }

    #[test]
    fn test_non_ascii_latin_is_not_a_word_char() {
        // accented letters sit outside the class, so they do not block
        let matcher = BoundaryMatcher::new(["SP"]);
        assert_eq!(codes(&matcher, "éSPé"), ["SP"]);
    }

    #[test]
    fn test_longer_key_preferred_at_same_start() {
        let matcher = BoundaryMatcher::new(["A.I", "A.I."]);
        assert_eq!(codes(&matcher, "the A.I. team"), ["A.I."]);
    }

    #[test]
    fn test_falls_back_to_shorter_key_when_longer_fails_boundary() {
        let matcher = BoundaryMatcher::new(["AI", "AI-X"]);
        // "AI-X" is glued to "Y"; "AI" still stands alone before "-"
        assert_eq!(codes(&matcher, "AI-XY"), ["AI"]);
        assert_eq!(codes(&matcher, "AI-X y"), ["AI-X"]);
    }

    #[test]
    fn test_hits_do_not_overlap() {
        let matcher = BoundaryMatcher::new(["A B", "B C"]);
        let hits = matcher.find_iter("A B C");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "A B");
    }

    #[test]
    fn test_hit_offsets() {
        let matcher = BoundaryMatcher::new(["KPI"]);
        let hits = matcher.find_iter("le KPI.");
        assert_eq!(hits, [Hit { start: 3, end: 6, code: "KPI" }]);
    }

    #[test]
    fn test_empty_matcher() {
        let matcher = AcronymRegistry::default().compile();
        assert!(matcher.keys().is_empty());
        assert!(!matcher.is_match("SP anything"));
        assert!(!BoundaryMatcher::empty().is_match("SP"));
    }

    #[test]
    fn test_registry_drops_empty_codes() {
        let registry = AcronymRegistry::new([("", "nothing"), ("SP", "Sofrecom Products")]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("SP"), Some("Sofrecom Products"));
        assert_eq!(registry.get("XX"), None);
    }

    #[test]
    fn test_reintroducing_codes() {
        let registry = AcronymRegistry::new([
            ("SP", "Sofrecom Products"),
            ("سوفريكوم", "منتجات سوفريكوم"),
        ]);
        assert_eq!(registry.reintroducing_codes(), ["سوفريكوم"]);

        let clean = AcronymRegistry::new([("SP", "Sofrecom Products"), ("UX", "User Experience")]);
        assert!(clean.reintroducing_codes().is_empty());
    }
}
