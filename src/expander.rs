// src/expander.rs
//
// First-mention acronym expansion: the first standalone occurrence of a
// code becomes "Full Phrase (CODE)", later ones become "Full Phrase".

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::registry::{AcronymRegistry, BoundaryMatcher};

/// Codes already expanded in full.
///
/// [`AcronymExpander::expand`] starts from an empty set on every call. Pass
/// one explicitly to [`AcronymExpander::expand_with`] to carry first-mention
/// state across chunks of the same transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    codes: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Returns true if `code` had not been seen yet.
    pub fn insert(&mut self, code: &str) -> bool {
        if self.codes.contains(code) {
            return false;
        }
        self.codes.insert(code.to_string())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }
}

/// A registry compiled into a matcher. Immutable after construction, so
/// one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct AcronymExpander {
    registry: AcronymRegistry,
    matcher: BoundaryMatcher,
}

impl Default for AcronymExpander {
    fn default() -> Self {
        Self::new(AcronymRegistry::default())
    }
}

impl AcronymExpander {
    pub fn new(registry: AcronymRegistry) -> Self {
        let matcher = registry.compile();
        Self { registry, matcher }
    }

    pub fn registry(&self) -> &AcronymRegistry {
        &self.registry
    }

    pub fn matcher(&self) -> &BoundaryMatcher {
        &self.matcher
    }

    /// Expand `text` with a fresh first-mention state.
    pub fn expand(&self, text: &str) -> String {
        let mut seen = SeenSet::new();
        self.expand_with(text, &mut seen)
    }

    /// Expand `text`, reading and updating `seen`.
    ///
    /// Text outside matched codes is copied through untouched. A code that
    /// already appears in its expanded form `Full Phrase (CODE)` is left as
    /// is on first mention and shortened to `Full Phrase` afterwards, so
    /// running the expander over its own output changes nothing.
    pub fn expand_with(&self, text: &str, seen: &mut SeenSet) -> String {
        if text.is_empty() || self.registry.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        let mut substitutions = 0usize;

        for hit in self.matcher.find_iter(text) {
            if hit.start < cursor {
                continue;
            }
            let long = self.registry.get(hit.code).unwrap_or(hit.code);
            let opening = format!("{long} (");
            let before = &text[cursor..hit.start];

            if before.ends_with(&opening) && text[hit.end..].starts_with(')') {
                let close = hit.end + ')'.len_utf8();
                if seen.insert(hit.code) {
                    out.push_str(&text[cursor..close]);
                } else {
                    out.push_str(&before[..before.len() - opening.len()]);
                    out.push_str(long);
                    substitutions += 1;
                }
                cursor = close;
                continue;
            }

            out.push_str(before);
            if seen.insert(hit.code) {
                out.push_str(long);
                out.push_str(" (");
                out.push_str(hit.code);
                out.push(')');
            } else {
                out.push_str(long);
            }
            substitutions += 1;
            cursor = hit.end;
        }
        out.push_str(&text[cursor..]);

        if substitutions > 0 {
            debug!(
                "Expanded {} acronym mention(s), {} distinct code(s) seen",
                substitutions,
                seen.len()
            );
        }
        out
    }
}

/// Handle to the current expander. Readers take a snapshot; reconfiguration
/// compiles a new expander and swaps it in, so in-flight calls keep the
/// snapshot they started with.
#[derive(Debug, Clone)]
pub struct SharedExpander {
    current: Arc<RwLock<Arc<AcronymExpander>>>,
}

impl SharedExpander {
    pub fn new(expander: AcronymExpander) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(expander))),
        }
    }

    pub fn snapshot(&self) -> Arc<AcronymExpander> {
        self.current.read().clone()
    }

    /// Compile `registry` and make it visible to new calls. Returns the
    /// previous expander.
    pub fn replace(&self, registry: AcronymRegistry) -> Arc<AcronymExpander> {
        let count = registry.len();
        let next = Arc::new(AcronymExpander::new(registry));
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!("Swapped acronym registry ({} entries)", count);
        previous
    }

    pub fn expand(&self, text: &str) -> String {
        self.snapshot().expand(text)
    }
}

impl From<AcronymExpander> for SharedExpander {
    fn from(expander: AcronymExpander) -> Self {
        Self::new(expander)
    }
}
