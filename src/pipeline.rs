// src/pipeline.rs
//
// raw transcript -> letter-sequence normalization -> acronym expansion

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::expander::{AcronymExpander, SeenSet, SharedExpander};
use crate::normalizer::Normalizer;

/// Normalizer plus a handle to the current expander.
///
/// Cheap to clone; clones share the same expander handle, so a registry
/// swap through one is seen by all.
#[derive(Debug, Clone)]
pub struct TranscriptProcessor {
    normalizer: Arc<Normalizer>,
    expander: SharedExpander,
}

impl TranscriptProcessor {
    pub fn new(normalizer: Normalizer, expander: impl Into<SharedExpander>) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
            expander: expander.into(),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn expander(&self) -> &SharedExpander {
        &self.expander
    }

    /// Normalize then expand one transcript with fresh first-mention state.
    pub fn process(&self, text: &str) -> String {
        let expander = self.expander.snapshot();
        self.run(&expander, text, &mut SeenSet::new())
    }

    /// Like [`process`](Self::process), carrying first-mention state across
    /// calls for a transcript handed over in chunks.
    pub fn process_with(&self, text: &str, seen: &mut SeenSet) -> String {
        let expander = self.expander.snapshot();
        self.run(&expander, text, seen)
    }

    /// Process independent transcripts in parallel, preserving order. Every
    /// transcript sees the same registry snapshot.
    pub fn process_batch<S>(&self, texts: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        let expander = self.expander.snapshot();
        debug!("Processing batch of {} transcripts", texts.len());
        texts
            .par_iter()
            .map(|text| self.run(&expander, text.as_ref(), &mut SeenSet::new()))
            .collect()
    }

    fn run(&self, expander: &AcronymExpander, text: &str, seen: &mut SeenSet) -> String {
        if text.is_empty() {
            return String::new();
        }
        let normalized = self.normalizer.normalize(text);
        expander.expand_with(&normalized, seen)
    }
}
