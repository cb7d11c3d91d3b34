//! Day-1 history and effective cycle start resolution.
//!
//! Users can retroactively mark any date as Day 1 of menstruation. The
//! history keeps every confirmed Day 1; cycle math for a target date uses
//! the latest recorded start at or before that date, so a correction
//! changes the calendar from that date forward without renumbering
//! anything else.

use crate::store::KeyValueStore;
use crate::Day1History;
use chrono::NaiveDate;

/// Store key for the Day-1 history
pub const DAY1_HISTORY_KEY: &str = "day1_history";

impl Day1History {
    /// Load the history from the store, empty when absent or unreadable
    pub fn load(store: &impl KeyValueStore) -> Self {
        store.get_json(DAY1_HISTORY_KEY).unwrap_or_else(|| {
            tracing::debug!("No Day-1 history found, starting empty");
            Self::default()
        })
    }

    /// Persist the history
    pub fn save(&self, store: &impl KeyValueStore) {
        store.set_json(DAY1_HISTORY_KEY, self);
    }

    /// Record a confirmed Day 1; duplicates are ignored
    ///
    /// Returns true if the date was newly added.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    /// Remove a previously recorded Day 1
    ///
    /// Returns true if the date was present.
    pub fn remove(&mut self, date: NaiveDate) -> bool {
        self.dates.remove(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Most recent recorded Day 1, if any
    pub fn latest(&self) -> Option<NaiveDate> {
        self.dates.iter().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// The cycle start to use for a given target date
///
/// Picks the latest entry of {profile start} ∪ history that is on or
/// before `target`; when the target precedes everything known, the profile
/// start is the fallback. History dates are deduplicated, so "latest
/// qualifying" selects exactly one start for any target.
pub fn effective_cycle_start(
    target: NaiveDate,
    profile_start: NaiveDate,
    history: &Day1History,
) -> NaiveDate {
    let mut all: Vec<NaiveDate> = history.dates.iter().copied().collect();
    all.push(profile_start);
    all.sort();

    let mut best = profile_start;
    for date in all {
        if date <= target {
            best = date;
        }
    }
    best
}
