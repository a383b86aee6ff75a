// src/pattern.rs
//
// Character classes and the compiled-in rule tables for Arabic spellings of
// Latin letter names, plus the ordered multi-token pattern table.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::error::{Error, Result};
use crate::punctuation::TokenStream;

// ----- WORD CHARACTER CLASS -----

/// Arabic, Arabic Supplement and Arabic Extended-A.
pub const ARABIC_RANGES: [(char, char); 3] = [
    ('\u{0600}', '\u{06FF}'),
    ('\u{0750}', '\u{077F}'),
    ('\u{08A0}', '\u{08FF}'),
];

/// Same class as [`is_word_char`], as regex character-class content.
pub static WORD_CHAR_CLASS_CONTENT: Lazy<String> = Lazy::new(|| {
    let mut class = String::from("0-9A-Za-z_");
    for (lo, hi) in ARABIC_RANGES {
        class.push(lo);
        class.push('-');
        class.push(hi);
    }
    class
});

/// ASCII letters, digits, underscore, and the three Arabic blocks.
///
/// Shared by both scripts: a Latin acronym glued to an Arabic word is not a
/// standalone word, and neither is an Arabic code glued to a Latin one.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || ARABIC_RANGES
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&c))
}

// ----- DEFAULT TABLES -----

/// Single ASR tokens that stand for several merged letter names.
pub static COLLAPSED_TOKENS: &[(&str, &str)] = &[
    ("سبي", "SP"), // "إس بي"
    ("ريم", "RM"), // "آر إم"
];

/// Multi-token letter-name sequences. Order is priority: the first pattern
/// whose window matches at a position wins, whatever its length.
pub static LETTER_SEQUENCES: &[(&[&str], &str)] = &[
    (&["دي", "دي"], "DD"),
    (&["اس", "بي"], "SP"),
    (&["إس", "بي"], "SP"),
    (&["سي", "ار", "ام"], "CRM"),
    (&["سي", "آر", "ام"], "CRM"),
    (&["ار", "ام"], "RM"),
    (&["آر", "ام"], "RM"),
    (&["ام", "تي"], "MT"),
    (&["ايم", "تي"], "MT"),
    (&["كيو", "اي"], "QA"),
    (&["كْيو", "اي"], "QA"),
];

/// Arabic spellings of Latin letter names. Several spellings may map to
/// the same letter.
pub static LETTER_NAMES: &[(&str, char)] = &[
    ("اي", 'A'),
    ("آي", 'I'),
    ("إي", 'E'),
    ("بي", 'B'),
    ("سي", 'C'),
    ("دي", 'D'),
    ("اف", 'F'),
    ("إف", 'F'),
    ("جي", 'G'),
    ("اتش", 'H'),
    ("إتش", 'H'),
    ("كي", 'K'),
    ("ام", 'M'),
    ("ايم", 'M'),
    ("ان", 'N'),
    ("إن", 'N'),
    ("اين", 'N'),
    ("او", 'O'),
    ("أو", 'O'),
    ("كيو", 'Q'),
    ("ار", 'R'),
    ("آر", 'R'),
    ("اس", 'S'),
    ("إس", 'S'),
    ("س", 'S'), // alif sometimes dropped by the recognizer
    ("تي", 'T'),
    ("يو", 'U'),
    ("في", 'V'),
    ("اكس", 'X'),
    ("إكس", 'X'),
    ("واي", 'Y'),
    ("زد", 'Z'),
    ("زين", 'Z'),
    ("زي", 'Z'),
];

/// Registry used when no registry file is available.
pub static SEED_ACRONYMS: &[(&str, &str)] = &[
    ("SP", "Sofrecom Products"),
    ("CR", "Client Report"),
    ("ATF", "Advanced Test Framework"),
    ("AI", "Artificial Intelligence"),
    ("NLP", "Natural Language Processing"),
    ("IoT", "Internet of Things"),
    ("UX", "User Experience"),
    ("API", "Application Programming Interface"),
    ("KPI", "Key Performance Indicator"),
    ("سوفريكوم", "منتجات سوفريكوم"),
];

pub fn default_collapsed_tokens() -> HashMap<String, String> {
    COLLAPSED_TOKENS
        .iter()
        .map(|&(core, acronym)| (core.to_string(), acronym.to_string()))
        .collect()
}

pub fn default_letter_names() -> HashMap<String, char> {
    LETTER_NAMES
        .iter()
        .map(|&(core, letter)| (core.to_string(), letter))
        .collect()
}

pub fn default_letter_patterns() -> Vec<LetterPattern> {
    LETTER_SEQUENCES
        .iter()
        .map(|&(tokens, acronym)| LetterPattern::new(tokens.iter().copied(), acronym))
        .collect()
}

pub fn seed_registry() -> HashMap<String, String> {
    SEED_ACRONYMS
        .iter()
        .map(|&(short, long)| (short.to_string(), long.to_string()))
        .collect()
}

/// Default table compiled once; cloned by [`PatternTable::default`].
static DEFAULT_PATTERN_TABLE: Lazy<PatternTable> =
    Lazy::new(|| PatternTable::new(default_letter_patterns()));

// ----- PATTERN TABLE -----

/// An ordered tuple of letter-name cores and the acronym it spells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterPattern {
    pub tokens: Vec<String>,
    pub acronym: String,
}

impl LetterPattern {
    pub fn new<I, S>(tokens: I, acronym: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            acronym: acronym.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True if the cores starting at `start` equal this pattern exactly.
    pub fn matches_at(&self, stream: &TokenStream<'_>, start: usize) -> bool {
        start + self.len() <= stream.len()
            && self
                .tokens
                .iter()
                .enumerate()
                .all(|(offset, expected)| stream.core(start + offset) == expected.as_str())
    }

    /// True if `self` is shorter than `other` and `other` begins with it.
    fn is_strict_prefix_of(&self, other: &LetterPattern) -> bool {
        self.len() < other.len() && other.tokens.starts_with(&self.tokens)
    }
}

/// Patterns tried in declaration order at each start position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable {
    patterns: Vec<LetterPattern>,
}

impl Default for PatternTable {
    fn default() -> Self {
        DEFAULT_PATTERN_TABLE.clone()
    }
}

impl PatternTable {
    /// Build a table, keeping declared order.
    ///
    /// Empty patterns are dropped. Shadowed patterns are kept (order wins)
    /// but logged.
    pub fn new(patterns: Vec<LetterPattern>) -> Self {
        let patterns: Vec<LetterPattern> = patterns
            .into_iter()
            .filter(|p| {
                if p.is_empty() {
                    warn!("Dropping empty letter pattern for acronym '{}'", p.acronym);
                }
                !p.is_empty()
            })
            .collect();

        let table = Self { patterns };
        for (earlier, later) in table.shadowed() {
            warn!(
                "Letter pattern #{} ({}) is a prefix of #{} ({}) and will always win",
                earlier, table.patterns[earlier].acronym, later, table.patterns[later].acronym
            );
        }
        table
    }

    /// Build a table, refusing empty patterns and any pattern that is a
    /// strict prefix of a later, longer one.
    pub fn strict(patterns: Vec<LetterPattern>) -> Result<Self> {
        if let Some(index) = patterns.iter().position(LetterPattern::is_empty) {
            return Err(Error::EmptyPattern(index));
        }

        let table = Self { patterns };
        if let Some(&(earlier, later)) = table.shadowed().first() {
            return Err(Error::ShadowedPattern {
                earlier,
                earlier_acronym: table.patterns[earlier].acronym.clone(),
                later,
                later_acronym: table.patterns[later].acronym.clone(),
            });
        }
        Ok(table)
    }

    /// `(earlier, later)` index pairs where the earlier pattern is a strict
    /// prefix of the later one, so the later one can never match from that
    /// start position.
    pub fn shadowed(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, earlier) in self.patterns.iter().enumerate() {
            for (j, later) in self.patterns.iter().enumerate().skip(i + 1) {
                if earlier.is_strict_prefix_of(later) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// First pattern in table order matching at `start`.
    pub fn first_match(&self, stream: &TokenStream<'_>, start: usize) -> Option<&LetterPattern> {
        self.patterns.iter().find(|p| p.matches_at(stream, start))
    }

    /// Insert `extra` ahead of the existing patterns, giving it priority.
    pub fn prepend(&mut self, extra: Vec<LetterPattern>) {
        let mut merged = extra;
        merged.append(&mut self.patterns);
        *self = Self::new(merged);
    }

    pub fn patterns(&self) -> &[LetterPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
