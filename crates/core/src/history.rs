use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::entries::Entry;
use crate::spin::SpinOutcome;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinnerRecord {
    pub winner: Entry,
    pub index: usize,
    pub at: DateTime<Local>,
}

/// Winners of past spins, newest first.
#[derive(Debug, Clone, Default)]
pub struct WinnerHistory {
    records: VecDeque<WinnerRecord>,
    capacity: Option<usize>,
}

impl WinnerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only the `capacity` most recent winners.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn record(&mut self, outcome: &SpinOutcome, at: DateTime<Local>) {
        self.records.push_front(WinnerRecord {
            winner: outcome.winner.clone(),
            index: outcome.winning_index,
            at,
        });
        if let Some(capacity) = self.capacity {
            self.records.truncate(capacity);
        }
    }

    pub fn record_now(&mut self, outcome: &SpinOutcome) {
        self.record(outcome, Local::now());
    }

    pub fn latest(&self) -> Option<&WinnerRecord> {
        self.records.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WinnerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
