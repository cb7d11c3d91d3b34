//! Cycle-phase calculation engine.
//!
//! Pure date/numeric functions mapping a tracked cycle start, cycle length,
//! and period length into a cycle day and a phase classification. Every
//! function here is side-effect-free and takes all required data as explicit
//! parameters; persistence and display live elsewhere.

use crate::Phase;
use chrono::NaiveDate;

/// Assumed cycle length when a caller has no profile value
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// Assumed period length when a caller has no profile value
pub const DEFAULT_PERIOD_LENGTH: u32 = 5;

/// Cycle day for a signed day offset from the cycle start
///
/// Uses floored modulo so the result wraps correctly for offsets beyond one
/// cycle in either direction. Defined for any integer offset and any
/// `cycle_length >= 1`; an offset of zero is always day 1.
pub fn cycle_day_for_offset(offset_days: i64, cycle_length: u32) -> u32 {
    (offset_days.rem_euclid(i64::from(cycle_length)) + 1) as u32
}

/// Cycle day of `target` relative to the cycle starting at `start`
///
/// `target` may precede `start`; the result is always in
/// `[1, cycle_length]`. Callers must guarantee `cycle_length >= 1`.
pub fn cycle_day(start: NaiveDate, cycle_length: u32, target: NaiveDate) -> u32 {
    let offset = (target - start).num_days();
    cycle_day_for_offset(offset, cycle_length)
}

/// Estimated ovulation day for a cycle of the given length
///
/// Centers ovulation roughly 14 days before the next period, clamped to
/// `[10, cycle_length - 10]` so it stays in a sane window for short and
/// long cycles alike.
pub fn ovulation_day(cycle_length: u32) -> u32 {
    let len = i64::from(cycle_length);
    (len - 14).min(len - 10).max(10) as u32
}

/// Phase of a given cycle day
///
/// Ordered first-match partition: menstrual, follicular, ovulatory, luteal.
/// When the period abuts the ovulation window the follicular range is empty
/// and simply skipped; ranges may be empty, never invalid, and every day
/// resolves to exactly one phase.
pub fn phase_for_day(cycle_day: u32, cycle_length: u32, period_length: u32) -> Phase {
    let ovulation = ovulation_day(cycle_length);

    if (1..=period_length).contains(&cycle_day) {
        Phase::Menstrual
    } else if cycle_day > period_length && cycle_day + 1 <= ovulation {
        Phase::Follicular
    } else if (ovulation..=ovulation + 2).contains(&cycle_day) {
        Phase::Ovulatory
    } else {
        // [ovulation + 3, cycle_length], plus the safe fallback for any
        // day the rounding edge cases leave uncovered
        Phase::Luteal
    }
}

/// Phase of an arbitrary date, or `None` when inputs are insufficient
///
/// The single entry point display layers should call, so calendar rendering
/// and the daily check-in screen can never diverge. Returns `None` when the
/// cycle start is missing or either length is zero; callers treat that as
/// "insufficient data to render a phase".
pub fn phase_for_date(
    target: NaiveDate,
    cycle_start: Option<NaiveDate>,
    cycle_length: u32,
    period_length: u32,
) -> Option<Phase> {
    let start = cycle_start?;
    if cycle_length == 0 || period_length == 0 {
        return None;
    }

    let day = cycle_day(start, cycle_length, target);
    Some(phase_for_day(day, cycle_length, period_length))
}

/// Whether a cycle day falls in the late-luteal window
///
/// True iff the phase is luteal and the next predicted period is at most 6
/// days away. Switches advice copy only; the classification itself is
/// unchanged.
pub fn is_late_luteal(cycle_day: u32, cycle_length: u32, period_length: u32) -> bool {
    phase_for_day(cycle_day, cycle_length, period_length) == Phase::Luteal
        && cycle_length.saturating_sub(cycle_day) <= 6
}

/// Days remaining until the next predicted period
pub fn days_until_next_period(cycle_day: u32, cycle_length: u32) -> u32 {
    cycle_length.saturating_sub(cycle_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_offset_zero_is_day_one() {
        for len in 1..=40 {
            assert_eq!(cycle_day_for_offset(0, len), 1);
        }
    }

    #[test]
    fn test_cycle_day_in_range_and_periodic() {
        for len in 1u32..=35 {
            for offset in -100i64..=100 {
                let day = cycle_day_for_offset(offset, len);
                assert!(
                    (1..=len).contains(&day),
                    "offset {} len {} gave day {}",
                    offset,
                    len,
                    day
                );
                assert_eq!(day, cycle_day_for_offset(offset + i64::from(len), len));
            }
        }
    }

    #[test]
    fn test_cycle_day_wraps_for_past_dates() {
        let start = date("2024-03-01");
        // 1 day before the start of a 28-day cycle is day 28
        assert_eq!(cycle_day(start, 28, date("2024-02-29")), 28);
        // the start itself is day 1
        assert_eq!(cycle_day(start, 28, start), 1);
        // a full cycle later is day 1 again
        assert_eq!(cycle_day(start, 28, date("2024-03-29")), 1);
    }

    #[test]
    fn test_ovulation_day_clamp() {
        assert_eq!(ovulation_day(28), 14);
        assert_eq!(ovulation_day(35), 21);
        // short cycle: L-14 = 7 is clamped up to 10
        assert_eq!(ovulation_day(21), 10);
        assert_eq!(ovulation_day(24), 10);
    }

    #[test]
    fn test_phase_partition_28_5() {
        for day in 1..=5 {
            assert_eq!(phase_for_day(day, 28, 5), Phase::Menstrual);
        }
        for day in 6..=13 {
            assert_eq!(phase_for_day(day, 28, 5), Phase::Follicular);
        }
        for day in 14..=16 {
            assert_eq!(phase_for_day(day, 28, 5), Phase::Ovulatory);
        }
        for day in 17..=28 {
            assert_eq!(phase_for_day(day, 28, 5), Phase::Luteal);
        }
    }

    #[test]
    fn test_phase_partition_exhaustive_over_grid() {
        // Every day resolves to exactly one phase for the whole supported
        // domain of lengths; first-match evaluation makes overlap
        // impossible, so exhaustiveness is the property to check.
        for cycle_length in 21..=35 {
            for period_length in 2..=8 {
                let mut seen_menstrual = 0;
                for day in 1..=cycle_length {
                    if phase_for_day(day, cycle_length, period_length) == Phase::Menstrual {
                        seen_menstrual += 1;
                    }
                }
                assert_eq!(seen_menstrual, period_length);
                assert_eq!(
                    phase_for_day(cycle_length, cycle_length, period_length),
                    Phase::Luteal
                );
            }
        }
    }

    #[test]
    fn test_follicular_skipped_when_period_abuts_ovulation() {
        // L=21 places ovulation on day 10; P=8 leaves room for a single
        // follicular day (9), while larger periods would leave none.
        assert_eq!(phase_for_day(9, 21, 8), Phase::Follicular);
        // day 10 is ovulatory even right after the period ends
        assert_eq!(phase_for_day(10, 21, 8), Phase::Ovulatory);
    }

    #[test]
    fn test_late_luteal_flag() {
        assert!(is_late_luteal(25, 28, 5)); // 28 - 25 = 3 <= 6
        assert!(!is_late_luteal(20, 28, 5)); // 28 - 20 = 8 > 6
        assert!(!is_late_luteal(3, 28, 5)); // menstrual, never late-luteal
    }

    #[test]
    fn test_phase_for_date_composes() {
        let start = date("2024-01-01");
        assert_eq!(
            phase_for_date(date("2024-01-03"), Some(start), 28, 5),
            Some(Phase::Menstrual)
        );
        assert_eq!(
            phase_for_date(date("2024-01-15"), Some(start), 28, 5),
            Some(Phase::Ovulatory)
        );
    }

    #[test]
    fn test_phase_for_date_unavailable_without_inputs() {
        let target = date("2024-01-15");
        assert_eq!(phase_for_date(target, None, 28, 5), None);
        assert_eq!(
            phase_for_date(target, Some(date("2024-01-01")), 0, 5),
            None
        );
        assert_eq!(
            phase_for_date(target, Some(date("2024-01-01")), 28, 0),
            None
        );
    }

    #[test]
    fn test_days_until_next_period() {
        assert_eq!(days_until_next_period(1, 28), 27);
        assert_eq!(days_until_next_period(28, 28), 0);
    }
}
