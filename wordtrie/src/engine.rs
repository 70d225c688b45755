use tracing::debug;

use crate::frequency::FrequencyTracker;
use crate::trie::{Extremes, Trie, Words};

/// The dictionary together with its search statistics.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    trie: Trie,
    frequency: FrequencyTracker,
}

impl Engine {
    pub fn new() -> Self {
        Engine::default()
    }

    pub fn with_parts(trie: Trie, frequency: FrequencyTracker) -> Self {
        Engine { trie, frequency }
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn trie_mut(&mut self) -> &mut Trie {
        &mut self.trie
    }

    pub fn frequency(&self) -> &FrequencyTracker {
        &self.frequency
    }

    pub fn frequency_mut(&mut self) -> &mut FrequencyTracker {
        &mut self.frequency
    }

    pub fn insert(&mut self, word: &str) -> bool {
        self.trie.insert(word)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.trie.contains_word(word)
    }

    pub fn delete(&mut self, word: &str) -> bool {
        self.trie.delete(word)
    }

    pub fn words(&self) -> Words<'_> {
        self.trie.words()
    }

    pub fn extremal_words(&self) -> Extremes {
        self.trie.extremal_words()
    }

    /// Returns the words starting with `prefix`, or None if there are no
    /// stored paths for it.
    ///
    /// Only a prefix that is found counts as a search in the statistics.
    pub fn suggest(&mut self, prefix: &str) -> Option<Words<'_>> {
        let subtree = match self.trie.find_prefix(prefix) {
            Some(subtree) => subtree,
            None => {
                debug!("no suggestions for {:?}", prefix);
                return None;
            }
        };
        let count = self.frequency.record_query(prefix);
        debug!("prefix {:?} searched {} times", prefix, count);
        Some(subtree.words())
    }
}
