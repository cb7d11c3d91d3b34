use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use cycle_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lunara")]
#[command(about = "Personal cycle tracking from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or replace the profile (onboarding)
    Setup {
        /// First day of the last period (YYYY-MM-DD)
        #[arg(long)]
        last_period: NaiveDate,

        /// Cycle length in days (21-35)
        #[arg(long)]
        cycle_length: Option<u32>,

        /// Period length in days (2-8)
        #[arg(long)]
        period_length: Option<u32>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        age_range: Option<String>,

        /// Pregnancy status (no, yes, not-sure)
        #[arg(long, value_parser = parse_pregnancy)]
        pregnant: Option<Pregnancy>,
    },

    /// Show today's cycle day, phase, and guidance (default)
    Today {
        /// Compute for this date instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Phase lookup for an arbitrary date
    Phase {
        #[arg(long)]
        date: NaiveDate,
    },

    /// Mark a date as Day 1 of menstruation
    MarkDay1 { date: NaiveDate },

    /// Remove a Day 1 marker
    UnmarkDay1 { date: NaiveDate },

    /// List recorded Day 1 dates
    History,

    /// Log or update today's check-in
    Checkin {
        /// Check-in date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Scorecard rating as key=value (1-5), repeatable
        #[arg(long = "score", value_parser = parse_score)]
        scores: Vec<(String, u8)>,

        /// Symptom, repeatable (replaces the stored list)
        #[arg(long = "symptom")]
        symptoms: Vec<String>,

        /// Supplement taken, repeatable (replaces the stored list)
        #[arg(long = "vitamin")]
        vitamins: Vec<String>,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },

    /// Show the estimated lunar phase
    Moon {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Export all check-ins to CSV
    Export {
        /// Output file
        #[arg(long, default_value = "checkins.csv")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    cycle_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = FileStore::new(data_dir.join("store"));

    match cli.command {
        Some(Commands::Setup {
            last_period,
            cycle_length,
            period_length,
            name,
            country,
            age_range,
            pregnant,
        }) => {
            let mut profile = Profile::new(
                last_period,
                cycle_length.unwrap_or(config.cycle.default_cycle_length),
                period_length.unwrap_or(config.cycle.default_period_length),
            );
            profile.name = name;
            profile.country = country;
            profile.age_range = age_range;
            profile.pregnant = pregnant;
            cmd_setup(&store, profile)
        }
        Some(Commands::Today { date }) => cmd_today(&store, resolve_date(date)),
        Some(Commands::Phase { date }) => cmd_phase(&store, date),
        Some(Commands::MarkDay1 { date }) => cmd_mark_day1(&store, date),
        Some(Commands::UnmarkDay1 { date }) => cmd_unmark_day1(&store, date),
        Some(Commands::History) => cmd_history(&store),
        Some(Commands::Checkin {
            date,
            scores,
            symptoms,
            vitamins,
            note,
        }) => cmd_checkin(&store, resolve_date(date), scores, symptoms, vitamins, note),
        Some(Commands::Moon { date }) => cmd_moon(resolve_date(date)),
        Some(Commands::Export { out }) => cmd_export(&store, &out),
        None => {
            // Default to "today" command
            cmd_today(&store, resolve_date(None))
        }
    }
}

fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

fn cmd_setup(store: &FileStore, profile: Profile) -> Result<()> {
    profile.save(store)?;

    println!("✓ Profile saved");
    println!(
        "  Cycle: {} days, period: {} days, last Day 1: {}",
        profile.cycle_length, profile.period_length, profile.last_period_start
    );
    Ok(())
}

fn cmd_today(store: &FileStore, date: NaiveDate) -> Result<()> {
    let Some(profile) = Profile::load(store) else {
        println!("No profile yet — run `lunara setup --last-period <YYYY-MM-DD>` first.");
        return Ok(());
    };

    let day1 = Day1History::load(store);
    let start = effective_cycle_start(date, profile.last_period_start, &day1);
    let day = cycle_day(start, profile.cycle_length, date);
    let phase = phase_for_day(day, profile.cycle_length, profile.period_length);

    display_today(&profile, date, day, phase);
    Ok(())
}

fn cmd_phase(store: &FileStore, date: NaiveDate) -> Result<()> {
    let resolved = Profile::load(store).and_then(|p| {
        let day1 = Day1History::load(store);
        let start = effective_cycle_start(date, p.last_period_start, &day1);
        let phase = phase_for_date(date, Some(start), p.cycle_length, p.period_length)?;
        Some((cycle_day(start, p.cycle_length, date), phase))
    });

    match resolved {
        Some((day, phase)) => {
            println!("{}: day {} — {}", date, day, phase.label());
            println!("  {}", catalog::guidance_for(phase).context);
        }
        None => {
            println!("{}: no phase information — set up a profile first.", date);
        }
    }

    let moon = lunar_phase(date);
    println!("  Moon: {} {}", moon.glyph(), moon.name());
    Ok(())
}

fn cmd_mark_day1(store: &FileStore, date: NaiveDate) -> Result<()> {
    let Some(mut profile) = Profile::load(store) else {
        println!("No profile yet — run `lunara setup --last-period <YYYY-MM-DD>` first.");
        return Ok(());
    };

    let mut day1 = Day1History::load(store);
    if !day1.insert(date) {
        println!("{} is already marked as Day 1.", date);
        return Ok(());
    }
    day1.save(store);

    // The profile tracks the marked date; effective-start resolution keeps
    // older targets anchored to their own Day 1 entries.
    profile.last_period_start = date;
    profile.save(store)?;

    println!("✓ Marked {} as Day 1 of menstruation", date);
    Ok(())
}

fn cmd_unmark_day1(store: &FileStore, date: NaiveDate) -> Result<()> {
    let mut day1 = Day1History::load(store);
    if !day1.remove(date) {
        println!("{} was not marked as Day 1.", date);
        return Ok(());
    }
    day1.save(store);

    if let Some(mut profile) = Profile::load(store) {
        if profile.last_period_start == date {
            match day1.latest() {
                Some(newest) => {
                    profile.last_period_start = newest;
                    profile.save(store)?;
                    println!("  Profile start moved to {}", newest);
                }
                None => {
                    tracing::warn!(
                        "Removed the only Day 1 entry; profile start left at {}",
                        date
                    );
                }
            }
        }
    }

    println!("✓ Removed Day 1 marker for {}", date);
    Ok(())
}

fn cmd_history(store: &FileStore) -> Result<()> {
    let day1 = Day1History::load(store);
    let profile_start = Profile::load(store).map(|p| p.last_period_start);

    if day1.is_empty() && profile_start.is_none() {
        println!("No Day 1 dates recorded yet.");
        return Ok(());
    }

    println!("Recorded Day 1 dates:");
    for date in &day1.dates {
        if Some(*date) == profile_start {
            println!("  {} (current cycle start)", date);
        } else {
            println!("  {}", date);
        }
    }
    if let Some(start) = profile_start {
        if !day1.contains(start) {
            println!("  {} (profile)", start);
        }
    }
    Ok(())
}

fn cmd_checkin(
    store: &FileStore,
    date: NaiveDate,
    scores: Vec<(String, u8)>,
    symptoms: Vec<String>,
    vitamins: Vec<String>,
    note: Option<String>,
) -> Result<()> {
    // Validate user input here, at the boundary
    for (key, value) in &scores {
        if catalog::scorecard_item(key).is_none() {
            return Err(Error::Other(format!(
                "unknown scorecard key: {} (expected one of: {})",
                key,
                catalog::scorecard()
                    .iter()
                    .map(|item| item.key)
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        if !(1..=5).contains(value) {
            return Err(Error::Other(format!(
                "score for {} must be between 1 and 5, got {}",
                key, value
            )));
        }
    }

    let update = CheckInUpdate {
        scores: scores.into_iter().collect(),
        symptoms: if symptoms.is_empty() {
            None
        } else {
            Some(symptoms)
        },
        vitamins: if vitamins.is_empty() {
            None
        } else {
            Some(vitamins)
        },
        note,
    };

    let record = upsert_check_in(store, date, update);

    println!("✓ Check-in saved for {}", date);
    for (key, value) in &record.scores {
        let answer = catalog::scorecard_item(key)
            .zip((*value as usize).checked_sub(1))
            .and_then(|(item, index)| item.options.get(index))
            .copied()
            .unwrap_or("?");
        println!("  {}: {} ({})", key, value, answer);
    }
    if !record.symptoms.is_empty() {
        println!("  Symptoms: {}", record.symptoms.join(", "));
    }
    if !record.vitamins.is_empty() {
        println!("  Vitamins: {}", record.vitamins.join(", "));
    }
    if let Some(ref note) = record.note {
        println!("  Note: {}", note);
    }
    Ok(())
}

fn cmd_moon(date: NaiveDate) -> Result<()> {
    let moon = lunar_phase(date);

    println!("{}: {} {}", date, moon.glyph(), moon.name());
    println!("  {}", moon.tip());
    Ok(())
}

fn cmd_export(store: &FileStore, out: &std::path::Path) -> Result<()> {
    let profile = Profile::load(store);
    let day1 = Day1History::load(store);

    let count = export_check_ins(store, profile.as_ref(), &day1, out)?;

    println!("✓ Exported {} check-ins", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn display_today(profile: &Profile, date: NaiveDate, day: u32, phase: Phase) {
    let guidance = catalog::guidance_for(phase);
    let days_left = days_until_next_period(day, profile.cycle_length);
    let late = is_late_luteal(day, profile.cycle_length, profile.period_length);
    let moon = lunar_phase(date);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} PHASE", phase.label().to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!();
    if let Some(ref name) = profile.name {
        println!("  Hello, {}", name);
    }
    println!(
        "  {} — day {} of {} ({} days until next period)",
        date, day, profile.cycle_length, days_left
    );
    println!();
    println!("  {}", guidance.context);
    println!();
    println!("  Energy:   {}", guidance.energy);
    println!("  Focus:    {}", guidance.focus);
    println!("  Social:   {}", guidance.social);
    println!("  Physical: {}", guidance.physical);
    println!();

    if late {
        println!("  → {}", catalog::LATE_LUTEAL_ADVICE);
    } else {
        for line in guidance.advice {
            println!("  → {}", line);
        }
    }

    // Moon context only on the days the calendar highlights
    if moon.is_special() {
        println!();
        println!("  {} {} — {}", moon.glyph(), moon.name(), moon.tip());
    }

    println!();
    println!("  Next phase: {}", phase.next().label());
    println!();
}

fn parse_score(s: &str) -> std::result::Result<(String, u8), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {:?}", s))?;
    let value: u8 = value
        .parse()
        .map_err(|_| format!("score for {} must be a number 1-5", key))?;
    Ok((key.to_string(), value))
}

fn parse_pregnancy(s: &str) -> std::result::Result<Pregnancy, String> {
    match s.to_lowercase().as_str() {
        "no" => Ok(Pregnancy::No),
        "yes" => Ok(Pregnancy::Yes),
        "not-sure" | "not_sure" | "unsure" => Ok(Pregnancy::NotSure),
        other => Err(format!("unknown pregnancy status: {}", other)),
    }
}
