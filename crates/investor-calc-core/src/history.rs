//! Bounded most-recent-first log of calculator runs.
//!
//! Each calculator session owns one ledger; nothing is persisted across
//! sessions. Entries are keyed by input equality, so re-running the same
//! calculation refreshes its timestamp and moves it to the front instead of
//! duplicating it.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Most entries a ledger retains.
pub const MAX_ENTRIES: usize = 10;

/// One recorded calculation: the inputs, the result they produced, and when.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry<I, R> {
    pub inputs: I,
    pub result: R,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct HistoryLedger<I, R> {
    entries: Vec<HistoryEntry<I, R>>,
}

impl<I: PartialEq, R> HistoryLedger<I, R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record one calculation. An earlier entry with equal inputs is removed
    /// first, the new entry is prepended, and the ledger is truncated to
    /// [`MAX_ENTRIES`].
    pub fn record(&mut self, inputs: I, result: R) {
        self.entries.retain(|e| e.inputs != inputs);
        self.entries.insert(
            0,
            HistoryEntry {
                inputs,
                result,
                recorded_at: Utc::now(),
            },
        );
        self.entries.truncate(MAX_ENTRIES);
    }

    /// All retained entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry<I, R>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I: PartialEq, R> Default for HistoryLedger<I, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_entry_first() {
        let mut ledger: HistoryLedger<i32, &str> = HistoryLedger::new();
        ledger.record(1, "first");
        ledger.record(2, "second");

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].inputs, 2);
        assert_eq!(ledger.entries()[1].inputs, 1);
    }

    #[test]
    fn test_equal_inputs_replace_and_move_to_front() {
        let mut ledger: HistoryLedger<i32, &str> = HistoryLedger::new();
        ledger.record(1, "stale");
        ledger.record(2, "other");
        ledger.record(1, "fresh");

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].inputs, 1);
        assert_eq!(ledger.entries()[0].result, "fresh");
        assert_eq!(ledger.entries()[1].inputs, 2);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut ledger: HistoryLedger<i32, i32> = HistoryLedger::new();
        for n in 0..11 {
            ledger.record(n, n * 10);
        }

        assert_eq!(ledger.len(), MAX_ENTRIES);
        assert_eq!(ledger.entries()[0].inputs, 10);
        // The first recording fell off the end
        assert!(ledger.entries().iter().all(|e| e.inputs != 0));
    }

    #[test]
    fn test_empty_ledger() {
        let ledger: HistoryLedger<i32, i32> = HistoryLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(ledger.entries().is_empty());
    }
}
