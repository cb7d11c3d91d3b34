//! Core domain types for the Lunara cycle tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Cycle phases
//! - The user profile
//! - Daily check-ins and their merge patches
//! - The Day-1 history used for retroactive corrections

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

// ============================================================================
// Phase Types
// ============================================================================

/// One of the four segments partitioning a cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulatory,
    Luteal,
}

impl Phase {
    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Menstrual => "Menstrual",
            Phase::Follicular => "Follicular",
            Phase::Ovulatory => "Ovulatory",
            Phase::Luteal => "Luteal",
        }
    }

    /// The phase that follows this one in the cycle
    pub fn next(&self) -> Phase {
        match self {
            Phase::Menstrual => Phase::Follicular,
            Phase::Follicular => Phase::Ovulatory,
            Phase::Ovulatory => Phase::Luteal,
            Phase::Luteal => Phase::Menstrual,
        }
    }

    /// All phases in cycle order
    pub fn all() -> [Phase; 4] {
        [
            Phase::Menstrual,
            Phase::Follicular,
            Phase::Ovulatory,
            Phase::Luteal,
        ]
    }
}

// ============================================================================
// Profile Types
// ============================================================================

/// Self-reported pregnancy status collected at onboarding
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Pregnancy {
    No,
    Yes,
    NotSure,
}

/// User profile recorded at onboarding and editable in settings
///
/// `last_period_start` is the reference Day 1 for all cycle math until a
/// more recent Day 1 is recorded in the history. The length fields are
/// validated at the persistence boundary, never inside the engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: Option<String>,
    pub country: Option<String>,
    pub age_range: Option<String>,
    pub last_period_start: NaiveDate,
    pub cycle_length: u32,
    pub period_length: u32,
    pub pregnant: Option<Pregnancy>,
}

// ============================================================================
// Check-in Types
// ============================================================================

/// A daily check-in, one per calendar date
///
/// Scores map scorecard keys (see the catalog) to a 1..=5 rating.
/// Re-saving a date merges into the existing record rather than replacing it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CheckIn {
    pub id: Uuid,
    pub date: NaiveDate,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub scores: BTreeMap<String, u8>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub vitamins: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Partial check-in data to merge into a date's record
///
/// Absent fields leave the stored record untouched; `scores` entries are
/// merged key by key.
#[derive(Clone, Debug, Default)]
pub struct CheckInUpdate {
    pub scores: BTreeMap<String, u8>,
    pub symptoms: Option<Vec<String>>,
    pub vitamins: Option<Vec<String>>,
    pub note: Option<String>,
}

// ============================================================================
// Day-1 History
// ============================================================================

/// Recorded menstruation Day-1 dates, sorted and deduplicated
///
/// Entries are never renumbered or rewritten when one is added or removed;
/// effective-start resolution picks the right entry per target date.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Day1History {
    pub dates: BTreeSet<NaiveDate>,
}
