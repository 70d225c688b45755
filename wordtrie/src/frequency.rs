use fnv::FnvHashMap;
use itertools::Itertools;

/// How often a word or prefix has been looked up for suggestions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub key: String,
    pub count: u64,
}

/// Counts suggestion queries per key.
///
/// Entries keep the order in which their keys were first seen and are
/// never removed.
#[derive(Clone, Debug, Default)]
pub struct FrequencyTracker {
    entries: Vec<FrequencyEntry>,
    index: FnvHashMap<String, usize>,
}

impl FrequencyTracker {
    pub fn new() -> Self {
        FrequencyTracker::default()
    }

    /// Counts one query for `key` and returns its new count.
    pub fn record_query(&mut self, key: &str) -> u64 {
        self.add(key, 1)
    }

    /// Adds a previously saved count. A key that is already present gets
    /// the counts summed.
    pub fn restore(&mut self, key: &str, count: u64) {
        self.add(key, count);
    }

    fn add(&mut self, key: &str, count: u64) -> u64 {
        if let Some(&i) = self.index.get(key) {
            let entry = &mut self.entries[i];
            entry.count = entry.count.saturating_add(count);
            return entry.count;
        }
        self.index.insert(key.to_string(), self.entries.len());
        self.entries.push(FrequencyEntry {
            key: key.to_string(),
            count,
        });
        count
    }

    pub fn count(&self, key: &str) -> u64 {
        self.index.get(key).map_or(0, |&i| self.entries[i].count)
    }

    /// All entries, first-queried first.
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// All entries, most queried first. Equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<&FrequencyEntry> {
        self.entries
            .iter()
            .sorted_by(|a, b| b.count.cmp(&a.count))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
