//! CSV export of check-in history.
//!
//! Each row carries the stored check-in plus the cycle day and phase the
//! engine computes for that date, using effective-start resolution so rows
//! before a retroactive Day-1 correction stay correct.

use crate::store::KeyValueStore;
use crate::{checkin, engine, history, CheckIn, Day1History, Profile, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    recorded_at: String,
    cycle_day: Option<u32>,
    phase: Option<&'static str>,
    scores: String,
    symptoms: String,
    vitamins: String,
    note: Option<String>,
}

impl CsvRow {
    fn build(record: &CheckIn, profile: Option<&Profile>, day1: &Day1History) -> Self {
        let (cycle_day, phase) = match profile {
            Some(profile) => {
                let start =
                    history::effective_cycle_start(record.date, profile.last_period_start, day1);
                let day = engine::cycle_day(start, profile.cycle_length, record.date);
                let phase = engine::phase_for_date(
                    record.date,
                    Some(start),
                    profile.cycle_length,
                    profile.period_length,
                );
                (Some(day), phase.map(|p| p.label()))
            }
            None => (None, None),
        };

        CsvRow {
            date: record.date.format("%Y-%m-%d").to_string(),
            recorded_at: record.recorded_at.to_rfc3339(),
            cycle_day,
            phase,
            scores: record
                .scores
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(";"),
            symptoms: record.symptoms.join(";"),
            vitamins: record.vitamins.join(";"),
            note: record.note.clone(),
        }
    }
}

/// Export every stored check-in to a CSV file
///
/// Overwrites `out`. Returns the number of rows written.
pub fn export_check_ins(
    store: &impl KeyValueStore,
    profile: Option<&Profile>,
    day1: &Day1History,
    out: &Path,
) -> Result<usize> {
    let records = checkin::load_all_check_ins(store);

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(out)?;

    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);

    for record in &records {
        writer.serialize(CsvRow::build(record, profile, day1))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} check-ins to {:?}", records.len(), out);
    Ok(records.len())
}
