use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_ENTRIES: usize = 100;
pub const DEFAULT_NUMBER_MIN: i64 = 0;
pub const DEFAULT_NUMBER_MAX: i64 = 99;
pub const ROULETTE_MAX: i64 = 36;

/// One label on the wheel. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(String);

impl Entry {
    /// Builds an entry from user text, trimming it. Blank text is rejected.
    pub fn parse(text: &str) -> Result<Self, EntryError> {
        if !is_valid_entry(text) {
            return Err(EntryError::Empty);
        }
        Ok(Self(text.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Entry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("entry is empty")]
    Empty,
    #[error("the wheel already holds the maximum of {max} entries")]
    LimitReached { max: usize },
    #[error("no entry at position {index}")]
    OutOfBounds { index: usize },
    #[error("invalid number range {min}-{max} (allowed {allowed_min}-{allowed_max})")]
    InvalidRange {
        min: i64,
        max: i64,
        allowed_min: i64,
        allowed_max: i64,
    },
}

/// Caller-owned limits for the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPolicy {
    pub max_entries: usize,
    pub number_min: i64,
    pub number_max: i64,
}

impl Default for EntryPolicy {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            number_min: DEFAULT_NUMBER_MIN,
            number_max: DEFAULT_NUMBER_MAX,
        }
    }
}

/// True when `text` still has something left after trimming.
pub fn is_valid_entry(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Splits text on newlines, trims each line and drops blanks.
pub fn parse_entries(text: &str) -> Vec<Entry> {
    text.lines().filter_map(|line| Entry::parse(line).ok()).collect()
}

/// `start..=end` rendered as entries.
pub fn number_range(start: i64, end: i64) -> Vec<Entry> {
    (start..=end).map(|n| Entry(n.to_string())).collect()
}

/// The classic European roulette numbers, 0 to 36.
pub fn default_roulette_numbers() -> Vec<Entry> {
    number_range(0, ROULETTE_MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryList {
    entries: Vec<Entry>,
    policy: EntryPolicy,
}

impl EntryList {
    pub const fn new(policy: EntryPolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    pub fn with_entries(policy: EntryPolicy, entries: Vec<Entry>) -> Self {
        let mut list = Self::new(policy);
        list.set(entries);
        list
    }

    pub fn roulette(policy: EntryPolicy) -> Self {
        Self::with_entries(policy, default_roulette_numbers())
    }

    pub const fn policy(&self) -> EntryPolicy {
        self.policy
    }

    /// Applies a new policy, dropping entries past the new cap.
    pub fn set_policy(&mut self, policy: EntryPolicy) {
        self.policy = policy;
        self.entries.truncate(policy.max_entries);
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.policy.max_entries
    }

    pub fn count(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.entries.len())
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Replaces the whole list, keeping at most `max_entries`.
    pub fn set(&mut self, mut entries: Vec<Entry>) {
        entries.truncate(self.policy.max_entries);
        self.entries = entries;
    }

    pub fn add(&mut self, text: &str) -> Result<&Entry, EntryError> {
        let entry = Entry::parse(text)?;
        if self.is_full() {
            return Err(EntryError::LimitReached {
                max: self.policy.max_entries,
            });
        }
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Adds one entry per non-blank line. Lines past the cap are dropped;
    /// returns how many were added.
    pub fn add_bulk(&mut self, text: &str) -> Result<usize, EntryError> {
        let parsed = parse_entries(text);
        if parsed.is_empty() {
            return Err(EntryError::Empty);
        }
        let room = self.policy.max_entries.saturating_sub(self.entries.len());
        if room == 0 {
            return Err(EntryError::LimitReached {
                max: self.policy.max_entries,
            });
        }
        let added = parsed.len().min(room);
        self.entries.extend(parsed.into_iter().take(added));
        Ok(added)
    }

    pub fn remove(&mut self, index: usize) -> Result<Entry, EntryError> {
        if index >= self.entries.len() {
            return Err(EntryError::OutOfBounds { index });
        }
        Ok(self.entries.remove(index))
    }

    pub fn edit(&mut self, index: usize, text: &str) -> Result<(), EntryError> {
        let entry = Entry::parse(text)?;
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(EntryError::OutOfBounds { index })?;
        *slot = entry;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces the list with the numbers `min..=max`.
    pub fn generate_range(&mut self, min: i64, max: i64) -> Result<usize, EntryError> {
        let policy = self.policy;
        if min > max || min < policy.number_min || max > policy.number_max {
            return Err(EntryError::InvalidRange {
                min,
                max,
                allowed_min: policy.number_min,
                allowed_max: policy.number_max,
            });
        }
        self.entries = (min..=max)
            .take(policy.max_entries)
            .map(|n| Entry(n.to_string()))
            .collect();
        Ok(self.entries.len())
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_policy(max_entries: usize) -> EntryPolicy {
        EntryPolicy {
            max_entries,
            ..EntryPolicy::default()
        }
    }

    #[test]
    fn add_trims_and_rejects_blank() {
        let mut list = EntryList::new(EntryPolicy::default());
        assert_eq!(list.add("  Alice ").map(Entry::to_string), Ok("Alice".to_string()));
        assert_eq!(list.add("   "), Err(EntryError::Empty));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut list = EntryList::new(EntryPolicy::default());
        list.add("Bob").unwrap();
        list.add("Bob").unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn add_respects_cap() {
        let mut list = EntryList::new(small_policy(2));
        list.add("a").unwrap();
        list.add("b").unwrap();
        assert_eq!(list.add("c"), Err(EntryError::LimitReached { max: 2 }));
    }

    #[test]
    fn bulk_add_skips_blank_lines_and_stops_at_cap() {
        let mut list = EntryList::new(small_policy(3));
        let added = list.add_bulk("one\n\n  two  \n three\nfour\n").unwrap();
        assert_eq!(added, 3);
        let labels: Vec<&str> = list.iter().map(Entry::as_str).collect();
        assert_eq!(labels, ["one", "two", "three"]);
        assert_eq!(list.add_bulk("five"), Err(EntryError::LimitReached { max: 3 }));
        assert_eq!(list.add_bulk("\n \n"), Err(EntryError::Empty));
    }

    #[test]
    fn edit_and_remove_check_bounds() {
        let mut list = EntryList::with_entries(EntryPolicy::default(), parse_entries("a\nb\nc"));
        list.edit(1, " beta ").unwrap();
        assert_eq!(list.get(1).map(Entry::as_str), Some("beta"));
        assert_eq!(list.edit(1, " "), Err(EntryError::Empty));
        assert_eq!(list.edit(9, "x"), Err(EntryError::OutOfBounds { index: 9 }));
        assert_eq!(list.remove(0).map(|e| e.to_string()), Ok("a".to_string()));
        assert_eq!(list.remove(5), Err(EntryError::OutOfBounds { index: 5 }));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn generate_range_validates_bounds() {
        let mut list = EntryList::new(EntryPolicy::default());
        assert_eq!(list.generate_range(5, 9), Ok(5));
        assert_eq!(list.get(0).map(Entry::as_str), Some("5"));
        assert!(matches!(
            list.generate_range(9, 5),
            Err(EntryError::InvalidRange { .. })
        ));
        assert!(matches!(
            list.generate_range(0, 100),
            Err(EntryError::InvalidRange { allowed_max: 99, .. })
        ));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn generate_range_truncates_to_cap() {
        let mut list = EntryList::new(small_policy(36));
        assert_eq!(list.generate_range(0, 99), Ok(36));
        assert_eq!(list.as_slice().last().map(Entry::as_str), Some("35"));
    }

    #[test]
    fn huge_range_stops_building_at_cap() {
        let mut list = EntryList::new(EntryPolicy {
            max_entries: 100,
            number_min: 0,
            number_max: i64::MAX,
        });
        assert_eq!(list.generate_range(0, i64::MAX), Ok(100));
        assert_eq!(list.as_slice().last().map(Entry::as_str), Some("99"));
        assert_eq!(list.generate_range(i64::MAX - 2, i64::MAX), Ok(3));
    }

    #[test]
    fn validity_ignores_surrounding_whitespace() {
        assert!(!is_valid_entry(""));
        assert!(!is_valid_entry(" \t\n "));
        assert!(is_valid_entry("  Ann  "));
        assert_eq!(Entry::parse(" \t"), Err(EntryError::Empty));
        assert_eq!(Entry::parse("  Ann  ").map(|e| e.to_string()), Ok("Ann".to_string()));
    }

    #[test]
    fn roulette_has_thirty_seven_numbers() {
        let list = EntryList::roulette(EntryPolicy::default());
        assert_eq!(list.len(), 37);
        assert_eq!(list.get(36).map(Entry::as_str), Some("36"));
    }

    #[test]
    fn shrinking_policy_truncates() {
        let mut list = EntryList::roulette(EntryPolicy::default());
        list.set_policy(small_policy(10));
        assert_eq!(list.len(), 10);
        assert!(list.is_full());
    }

    #[test]
    fn entry_serializes_as_plain_string() {
        let entry = Entry::parse("Carol").unwrap();
        assert_eq!(serde_json::to_string(&entry).unwrap(), "\"Carol\"");
    }
}
