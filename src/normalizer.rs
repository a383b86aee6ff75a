// src/normalizer.rs
//
// Collapses Arabic spellings of Latin letter names back into acronyms.
// One left-to-right pass; priority at each position is
// collapsed token > multi-token pattern > generic letter run > passthrough.

use serde::Deserialize;
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::punctuation::{tokenize, TokenStream};

/// What happens to the punctuation of tokens consumed by a multi-token
/// pattern or a generic letter run. Collapsed single tokens always keep
/// theirs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPunctuation {
    /// Emit the bare acronym.
    #[default]
    Drop,
    /// Keep the leading punctuation of the first consumed token and the
    /// trailing punctuation of the last one.
    KeepOuter,
}

/// Letter-sequence normalizer over an immutable [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    lexicon: Lexicon,
    run_punctuation: RunPunctuation,
}

/// A decision taken at one token position.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Collapsed(String),
    Run { acronym: String, consumed: usize },
    Keep,
}

impl Normalizer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            run_punctuation: RunPunctuation::default(),
        }
    }

    pub fn with_run_punctuation(mut self, policy: RunPunctuation) -> Self {
        self.run_punctuation = policy;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Normalize `text`, leaving everything that is not a recognized
    /// letter sequence byte-for-byte intact.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let stream = tokenize(text);
        let mut out = String::with_capacity(text.len());
        let mut collapsed = 0usize;
        let mut i = 0;

        while i < stream.len() {
            let spaced = &stream.tokens[i];
            out.push_str(spaced.space_before);

            match self.step_at(&stream, i) {
                Step::Collapsed(acronym) => {
                    out.push_str(&spaced.token.rewrap(&acronym));
                    collapsed += 1;
                    i += 1;
                }
                Step::Run { acronym, consumed } => {
                    let last = &stream.tokens[i + consumed - 1].token;
                    match self.run_punctuation {
                        RunPunctuation::Drop => out.push_str(&acronym),
                        RunPunctuation::KeepOuter => {
                            out.push_str(spaced.token.leading);
                            out.push_str(&acronym);
                            out.push_str(last.trailing);
                        }
                    }
                    collapsed += 1;
                    i += consumed;
                }
                Step::Keep => {
                    out.push_str(&spaced.token.raw());
                    i += 1;
                }
            }
        }
        out.push_str(stream.tail);

        if collapsed > 0 {
            debug!(
                "Collapsed {} letter sequence(s) across {} tokens",
                collapsed,
                stream.len()
            );
        }
        out
    }

    fn step_at(&self, stream: &TokenStream<'_>, i: usize) -> Step {
        let core = stream.core(i);

        if let Some(acronym) = self.lexicon.collapsed.get(core) {
            return Step::Collapsed(acronym.clone());
        }

        if let Some(pattern) = self.lexicon.patterns.first_match(stream, i) {
            return Step::Run {
                acronym: pattern.acronym.clone(),
                consumed: pattern.len(),
            };
        }

        let letters: String = (i..stream.len())
            .map_while(|j| self.lexicon.letter_names.get(stream.core(j)).copied())
            .collect();
        let run = letters.chars().count();
        if run >= 2 {
            return Step::Run {
                acronym: letters,
                consumed: run,
            };
        }

        Step::Keep
    }
}
