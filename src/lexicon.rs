// src/lexicon.rs
//
// The three letter-name tables bundled together, with override merging
// for embedding applications.

use std::collections::HashMap;

use crate::pattern::{self, LetterPattern, PatternTable};

/// Collapsed tokens, multi-token patterns and single letter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    /// Single core -> acronym. Checked before anything else.
    pub collapsed: HashMap<String, String>,
    /// Ordered multi-token patterns.
    pub patterns: PatternTable,
    /// Single core -> Latin letter, for runs of two or more.
    pub letter_names: HashMap<String, char>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            collapsed: pattern::default_collapsed_tokens(),
            patterns: PatternTable::default(),
            letter_names: pattern::default_letter_names(),
        }
    }
}

/// Additions layered over a [`Lexicon`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexiconOverrides {
    pub collapsed: Vec<(String, String)>,
    /// Tried before every existing pattern, in the order given.
    pub patterns: Vec<LetterPattern>,
    pub letter_names: Vec<(String, char)>,
}

impl LexiconOverrides {
    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty() && self.patterns.is_empty() && self.letter_names.is_empty()
    }
}

impl Lexicon {
    /// A lexicon with no entries; normalization becomes a passthrough.
    pub fn empty() -> Self {
        Self {
            collapsed: HashMap::new(),
            patterns: PatternTable::new(Vec::new()),
            letter_names: HashMap::new(),
        }
    }

    /// Layer `overrides` on top of this lexicon.
    ///
    /// Keyed entries replace existing ones; extra patterns take priority over
    /// the existing table.
    pub fn merge(mut self, overrides: LexiconOverrides) -> Self {
        self.collapsed.extend(overrides.collapsed);
        self.letter_names.extend(overrides.letter_names);
        if !overrides.patterns.is_empty() {
            self.patterns.prepend(overrides.patterns);
        }
        self
    }

    pub fn with_collapsed(mut self, core: impl Into<String>, acronym: impl Into<String>) -> Self {
        self.collapsed.insert(core.into(), acronym.into());
        self
    }

    pub fn with_letter_name(mut self, core: impl Into<String>, letter: char) -> Self {
        self.letter_names.insert(core.into(), letter);
        self
    }

    pub fn with_patterns(mut self, patterns: PatternTable) -> Self {
        self.patterns = patterns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_tables() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.collapsed["سبي"], "SP");
        assert_eq!(lexicon.collapsed["ريم"], "RM");
        assert_eq!(lexicon.letter_names["دي"], 'D');
        assert!(!lexicon.patterns.is_empty());
    }

    #[test]
    fn test_merge_overrides_keys() {
        let overrides = LexiconOverrides {
            collapsed: vec![("ريم".to_string(), "REM".to_string())],
            patterns: vec![],
            letter_names: vec![("ال".to_string(), 'L')],
        };
        let lexicon = Lexicon::default().merge(overrides);
        assert_eq!(lexicon.collapsed["ريم"], "REM");
        assert_eq!(lexicon.collapsed["سبي"], "SP");
        assert_eq!(lexicon.letter_names["ال"], 'L');
    }

    #[test]
    fn test_merge_prepends_patterns() {
        let before = Lexicon::default().patterns.len();
        let overrides = LexiconOverrides {
            patterns: vec![LetterPattern::new(["جي", "بي", "تي"], "GPT")],
            ..Default::default()
        };
        let lexicon = Lexicon::default().merge(overrides);
        assert_eq!(lexicon.patterns.len(), before + 1);
        assert_eq!(lexicon.patterns.patterns()[0].acronym, "GPT");
    }

    #[test]
    fn test_builders() {
        let lexicon = Lexicon::empty()
            .with_collapsed("كيوا", "QA")
            .with_letter_name("بي", 'B');
        assert_eq!(lexicon.collapsed.len(), 1);
        assert_eq!(lexicon.letter_names.len(), 1);
        assert!(lexicon.patterns.is_empty());
    }
}
