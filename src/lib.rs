//! acronorm - spoken-letter normalization and acronym expansion for
//! transcripts that mix Arabic, French and English.
//!
//! Two text-to-text stages:
//! - [`Normalizer`] collapses Arabic spellings of Latin letter names
//!   ("دي دي", "سبي") back into acronyms ("DD", "SP")
//! - [`AcronymExpander`] rewrites the first standalone mention of a
//!   registered code as "Full Phrase (CODE)" and later ones as "Full Phrase"
//!
//! [`TranscriptProcessor`] chains them. Rule tables are compiled once and
//! are read-only afterwards, so a processor can be shared across threads.

pub mod error;
pub mod expander;
pub mod lexicon;
pub mod loader;
pub mod normalizer;
pub mod pattern;
pub mod pipeline;
pub mod punctuation;
pub mod registry;
pub mod spotting;

pub use error::{Error, Result};
pub use expander::{AcronymExpander, SeenSet, SharedExpander};
pub use lexicon::{Lexicon, LexiconOverrides};
pub use loader::{load_registry, parse_registry, save_registry, seed_registry, Settings};
pub use normalizer::{Normalizer, RunPunctuation};
pub use pattern::{LetterPattern, PatternTable};
pub use pipeline::TranscriptProcessor;
pub use registry::{AcronymRegistry, BoundaryMatcher, Hit};
pub use spotting::find_acronyms;

/// Normalize then expand `text` with the default lexicon and `registry`.
///
/// Compiles the registry on every call; build a [`TranscriptProcessor`]
/// once when processing more than a handful of texts.
pub fn process(text: &str, registry: AcronymRegistry) -> String {
    TranscriptProcessor::new(Normalizer::default(), AcronymExpander::new(registry)).process(text)
}
