#![forbid(unsafe_code)]

//! Core domain model and calculation engine for the Lunara cycle tracker.
//!
//! This crate provides:
//! - Domain types (profile, phases, check-ins, Day-1 history)
//! - The cycle-phase calculation engine (pure date/numeric functions)
//! - Lunar phase estimation
//! - Key-value persistence (in-memory and file-backed)
//! - Phase guidance catalog and check-in scorecard
//! - CSV export

pub mod types;
pub mod error;
pub mod engine;
pub mod lunar;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod profile;
pub mod history;
pub mod checkin;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{
    cycle_day, cycle_day_for_offset, days_until_next_period, is_late_luteal, ovulation_day,
    phase_for_date, phase_for_day, DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_LENGTH,
};
pub use lunar::{lunar_phase, LunarPhase};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use history::effective_cycle_start;
pub use checkin::{load_all_check_ins, upsert_check_in};
pub use export::export_check_ins;
