//! Lunar phase estimation.
//!
//! A calendar approximation against a fixed reference new moon and the mean
//! synodic period. Internally consistent and monotonic across the cycle;
//! not intended to match real ephemerides. Entirely independent of cycle
//! data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mean synodic month in days
const SYNODIC_MONTH_DAYS: f64 = 29.53;

/// Reference new moon used as the phase epoch (2000-01-06)
fn reference_new_moon() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 6).expect("reference new moon is a valid date")
}

/// The eight named moon phases
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LunarPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl LunarPhase {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            LunarPhase::NewMoon => "New Moon",
            LunarPhase::WaxingCrescent => "Waxing Crescent",
            LunarPhase::FirstQuarter => "First Quarter",
            LunarPhase::WaxingGibbous => "Waxing Gibbous",
            LunarPhase::FullMoon => "Full Moon",
            LunarPhase::WaningGibbous => "Waning Gibbous",
            LunarPhase::LastQuarter => "Last Quarter",
            LunarPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Short tip line shown alongside the phase
    pub fn tip(&self) -> &'static str {
        match self {
            LunarPhase::NewMoon => "A quieter moment in the cycle. Good for planning inward.",
            LunarPhase::WaxingCrescent => "Small steps forward. Good for initial momentum.",
            LunarPhase::FirstQuarter => "Energy building. Decisions come a bit easier.",
            LunarPhase::WaxingGibbous => {
                "Review plans, adjust details or finish what's already underway rather than start new big things."
            }
            LunarPhase::FullMoon => "Peak illumination. A good time to complete and share.",
            LunarPhase::WaningGibbous => {
                "Good for wrapping up, reflecting and letting go of what didn't work."
            }
            LunarPhase::LastQuarter => "Clearing space. Focus on what actually needs your energy.",
            LunarPhase::WaningCrescent => "Rest and reset. Renewal is close.",
        }
    }

    /// Single-character glyph for compact calendar cells
    pub fn glyph(&self) -> &'static str {
        match self {
            LunarPhase::NewMoon => "🌙",
            LunarPhase::WaxingCrescent => "🌒",
            LunarPhase::FirstQuarter => "🌓",
            LunarPhase::WaxingGibbous => "🌔",
            LunarPhase::FullMoon => "●",
            LunarPhase::WaningGibbous => "🌖",
            LunarPhase::LastQuarter => "🌗",
            LunarPhase::WaningCrescent => "🌘",
        }
    }

    /// New and full moons get highlighted in the calendar
    pub fn is_special(&self) -> bool {
        matches!(self, LunarPhase::NewMoon | LunarPhase::FullMoon)
    }
}

/// Estimated lunar phase for a calendar date
///
/// Buckets the floored-modulo position within the synodic month against
/// fixed thresholds; anything past the Last Quarter band wraps around to
/// Waning Crescent.
pub fn lunar_phase(date: NaiveDate) -> LunarPhase {
    let days_since_epoch = (date - reference_new_moon()).num_days() as f64;
    let cycle = days_since_epoch.rem_euclid(SYNODIC_MONTH_DAYS);

    if cycle < 1.85 {
        LunarPhase::NewMoon
    } else if cycle < 7.38 {
        LunarPhase::WaxingCrescent
    } else if cycle < 9.22 {
        LunarPhase::FirstQuarter
    } else if cycle < 14.77 {
        LunarPhase::WaxingGibbous
    } else if cycle < 16.61 {
        LunarPhase::FullMoon
    } else if cycle < 22.15 {
        LunarPhase::WaningGibbous
    } else if cycle < 23.99 {
        LunarPhase::LastQuarter
    } else {
        LunarPhase::WaningCrescent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_epoch_is_new_moon() {
        assert_eq!(lunar_phase(date("2000-01-06")), LunarPhase::NewMoon);
    }

    #[test]
    fn test_dates_before_epoch_are_defined() {
        // floored modulo keeps pre-epoch dates inside the cycle
        let phase = lunar_phase(date("1999-12-20"));
        assert_eq!(phase, lunar_phase(date("1999-12-20")));
    }

    #[test]
    fn test_full_cycle_is_monotonic() {
        // Walking one synodic month from the epoch visits the phases in
        // order with no backtracking.
        let order = [
            LunarPhase::NewMoon,
            LunarPhase::WaxingCrescent,
            LunarPhase::FirstQuarter,
            LunarPhase::WaxingGibbous,
            LunarPhase::FullMoon,
            LunarPhase::WaningGibbous,
            LunarPhase::LastQuarter,
            LunarPhase::WaningCrescent,
        ];
        let mut last_index = 0;
        for offset in 0..29 {
            let d = date("2000-01-06") + chrono::Duration::days(offset);
            let index = order
                .iter()
                .position(|p| *p == lunar_phase(d))
                .expect("phase in order table");
            assert!(index >= last_index, "phase went backwards at +{}d", offset);
            last_index = index;
        }
    }

    #[test]
    fn test_mid_cycle_is_full_moon() {
        // ~14.8 days after a new moon
        assert_eq!(lunar_phase(date("2000-01-21")), LunarPhase::FullMoon);
    }

    #[test]
    fn test_special_flags() {
        assert!(LunarPhase::NewMoon.is_special());
        assert!(LunarPhase::FullMoon.is_special());
        assert!(!LunarPhase::WaxingGibbous.is_special());
    }
}
