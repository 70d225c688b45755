#![warn(missing_debug_implementations)]

mod engine;
mod error;
mod frequency;
mod session;
pub mod store;
mod trie;

pub use crate::engine::Engine;
pub use crate::error::StoreError;
pub use crate::frequency::{FrequencyEntry, FrequencyTracker};
pub use crate::session::SessionLedger;
pub use crate::trie::{Extremes, Subtree, Trie, TrieNode, Words, ALPHABET_SIZE};

/// Brings user input into the form the dictionary stores: surrounding
/// whitespace removed and `A`-`Z` lowercased. Every other character is
/// left alone, so input the trie can't store stays unstorable.
pub fn normalize(word: &str) -> String {
    word.trim().to_ascii_lowercase()
}
