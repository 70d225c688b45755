use std::collections::VecDeque;

use tracing::debug;

use crate::engine::Engine;

/// Words added and deleted since the program started.
#[derive(Clone, Debug, Default)]
pub struct SessionLedger {
    added: VecDeque<String>,
    deleted: VecDeque<String>,
    /// If set, each list only remembers this many of its latest words.
    limit: Option<usize>,
}

impl SessionLedger {
    pub fn new() -> Self {
        SessionLedger::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        SessionLedger {
            limit: Some(limit),
            ..SessionLedger::default()
        }
    }

    pub fn added(&self) -> impl ExactSizeIterator<Item = &str> {
        self.added.iter().map(String::as_str)
    }

    pub fn deleted(&self) -> impl ExactSizeIterator<Item = &str> {
        self.deleted.iter().map(String::as_str)
    }

    pub fn record_added(&mut self, word: &str) {
        push_limited(&mut self.added, word, self.limit);
    }

    /// Remembers a deletion. If the word was added earlier in the session,
    /// the earliest matching entry is taken off the added list. Later
    /// duplicates stay.
    pub fn record_deleted(&mut self, word: &str) {
        if let Some(pos) = self.added.iter().position(|w| w == word) {
            self.added.remove(pos);
        }
        push_limited(&mut self.deleted, word, self.limit);
    }

    /// Puts the most recently deleted word back into `engine` and returns
    /// it, or returns None if nothing was deleted.
    pub fn undo_delete(&mut self, engine: &mut Engine) -> Option<String> {
        let word = self.deleted.pop_back()?;
        engine.insert(&word);
        debug!("restored {:?}", word);
        self.record_added(&word);
        Some(word)
    }
}

fn push_limited(list: &mut VecDeque<String>, word: &str, limit: Option<usize>) {
    if limit == Some(0) {
        return;
    }
    list.push_back(word.to_string());
    if let Some(limit) = limit {
        while list.len() > limit {
            list.pop_front();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_delete_reconciles_added() {
        let mut ledger = SessionLedger::new();
        ledger.record_added("alpha");
        ledger.record_added("beta");
        ledger.record_deleted("alpha");
        ledger.record_deleted("gamma");

        assert_eq!(vec!["beta"], ledger.added().collect::<Vec<_>>());
        assert_eq!(vec!["alpha", "gamma"], ledger.deleted().collect::<Vec<_>>());
    }

    #[test]
    fn test_delete_takes_earliest_added() {
        let mut ledger = SessionLedger::new();
        for word in ["alpha", "beta", "alpha"] {
            ledger.record_added(word);
        }
        ledger.record_deleted("alpha");

        assert_eq!(vec!["beta", "alpha"], ledger.added().collect::<Vec<_>>());
        assert_eq!(vec!["alpha"], ledger.deleted().collect::<Vec<_>>());
    }

    #[test]
    fn test_undo_delete() {
        let mut engine = Engine::new();
        let mut ledger = SessionLedger::new();
        engine.insert("alpha");
        engine.insert("beta");

        for word in ["alpha", "beta"] {
            engine.delete(word);
            ledger.record_deleted(word);
        }

        assert_eq!(Some("beta".to_string()), ledger.undo_delete(&mut engine));
        assert!(engine.contains_word("beta"));
        assert!(!engine.contains_word("alpha"));
        assert_eq!(vec!["alpha"], ledger.deleted().collect::<Vec<_>>());
        assert_eq!(vec!["beta"], ledger.added().collect::<Vec<_>>());

        assert_eq!(Some("alpha".to_string()), ledger.undo_delete(&mut engine));
        assert_eq!(None, ledger.undo_delete(&mut engine));
        assert_eq!(0, ledger.deleted().len());
    }

    #[test]
    fn test_limit() {
        let mut ledger = SessionLedger::with_limit(2);
        for word in ["one", "two", "three"] {
            ledger.record_added(word);
        }
        assert_eq!(vec!["two", "three"], ledger.added().collect::<Vec<_>>());

        let mut ledger = SessionLedger::with_limit(0);
        ledger.record_added("one");
        assert_eq!(0, ledger.added().len());
    }
}
