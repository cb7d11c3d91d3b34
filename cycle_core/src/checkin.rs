//! Daily check-in persistence.
//!
//! One record per calendar date, stored under `checkins/<YYYY-MM-DD>`.
//! Saving merges into any existing record for the date, so a user can log
//! a mood in the morning and symptoms in the evening without losing either.

use crate::store::KeyValueStore;
use crate::{CheckIn, CheckInUpdate};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Store key prefix for check-in records
pub const CHECKIN_KEY_PREFIX: &str = "checkins/";

/// Store key for a date's check-in
pub fn checkin_key(date: NaiveDate) -> String {
    format!("{}{}", CHECKIN_KEY_PREFIX, date.format("%Y-%m-%d"))
}

impl CheckIn {
    /// Fresh, empty record for a date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            recorded_at: Utc::now(),
            scores: Default::default(),
            symptoms: Vec::new(),
            vitamins: Vec::new(),
            note: None,
        }
    }

    /// Load the record for a date, if one exists
    pub fn load(store: &impl KeyValueStore, date: NaiveDate) -> Option<Self> {
        store.get_json(&checkin_key(date))
    }

    /// Merge an update into this record
    ///
    /// Score entries overwrite per key; list and note fields replace only
    /// when the update provides them. The record keeps its id; the
    /// timestamp moves to the latest write.
    pub fn apply(&mut self, update: CheckInUpdate) {
        self.scores.extend(update.scores);
        if let Some(symptoms) = update.symptoms {
            self.symptoms = symptoms;
        }
        if let Some(vitamins) = update.vitamins {
            self.vitamins = vitamins;
        }
        if let Some(note) = update.note {
            self.note = Some(note);
        }
        self.recorded_at = Utc::now();
    }
}

/// Merge an update into the stored record for a date and persist it
///
/// Creates the record if the date has none yet. Returns the merged record.
pub fn upsert_check_in(
    store: &impl KeyValueStore,
    date: NaiveDate,
    update: CheckInUpdate,
) -> CheckIn {
    let mut record = CheckIn::load(store, date).unwrap_or_else(|| CheckIn::new(date));
    record.apply(update);
    store.set_json(&checkin_key(date), &record);
    tracing::debug!("Saved check-in for {}", date);
    record
}

/// All stored check-ins, sorted by date ascending
pub fn load_all_check_ins(store: &impl KeyValueStore) -> Vec<CheckIn> {
    let mut records: Vec<CheckIn> = store
        .list_keys_with_prefix(CHECKIN_KEY_PREFIX)
        .into_iter()
        .filter_map(|key| store.get_json(&key))
        .collect();

    records.sort_by_key(|r| r.date);
    tracing::debug!("Loaded {} check-ins", records.len());
    records
}
