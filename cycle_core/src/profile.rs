//! Profile persistence and boundary validation.
//!
//! The profile is validated where user input is accepted (on save), so the
//! calculation engine can assume its lengths are sane without re-checking
//! them.

use crate::store::KeyValueStore;
use crate::{Error, Profile, Result};
use chrono::NaiveDate;

/// Store key for the profile record
pub const PROFILE_KEY: &str = "profile";

/// Accepted cycle length range, inclusive
pub const CYCLE_LENGTH_RANGE: (u32, u32) = (21, 35);

/// Accepted period length range, inclusive
pub const PERIOD_LENGTH_RANGE: (u32, u32) = (2, 8);

impl Profile {
    /// Minimal profile with defaults for everything optional
    pub fn new(last_period_start: NaiveDate, cycle_length: u32, period_length: u32) -> Self {
        Self {
            name: None,
            country: None,
            age_range: None,
            last_period_start,
            cycle_length,
            period_length,
            pregnant: None,
        }
    }

    /// Check the length fields against their accepted domains
    pub fn validate(&self) -> Result<()> {
        let (cycle_min, cycle_max) = CYCLE_LENGTH_RANGE;
        if !(cycle_min..=cycle_max).contains(&self.cycle_length) {
            return Err(Error::Profile(format!(
                "cycle length must be between {} and {} days, got {}",
                cycle_min, cycle_max, self.cycle_length
            )));
        }

        let (period_min, period_max) = PERIOD_LENGTH_RANGE;
        if !(period_min..=period_max).contains(&self.period_length) {
            return Err(Error::Profile(format!(
                "period length must be between {} and {} days, got {}",
                period_min, period_max, self.period_length
            )));
        }

        Ok(())
    }

    /// Load the profile from the store
    ///
    /// `None` means no (usable) profile has been saved yet; callers degrade
    /// to their "insufficient data" rendering.
    pub fn load(store: &impl KeyValueStore) -> Option<Self> {
        store.get_json(PROFILE_KEY)
    }

    /// Validate and persist the profile
    pub fn save(&self, store: &impl KeyValueStore) -> Result<()> {
        self.validate()?;
        store.set_json(PROFILE_KEY, self);
        tracing::debug!("Saved profile");
        Ok(())
    }
}
