//! `datebook` CLI: a personal calendar with recurring events and conflict
//! checks, stored in a JSON file.
//!
//! ## Usage
//!
//! ```sh
//! # Month grid around today (or any date), optionally filtered
//! datebook month
//! datebook month --date 2024-03-01 --search standup
//!
//! # Everything on one day
//! datebook day --date 2024-03-08
//!
//! # Add a one-off event, or a series
//! datebook add --title "Dentist" --date 2024-03-12 --start 08:00 --end 09:00
//! datebook add --title "Yoga" --date 2024-03-04 --start 18:30 --end 19:30 \
//!     --repeat weekly --interval 2 --on mon,thu --until 2024-06-30
//!
//! # Edit, move (a whole series moves with its anchor) and delete
//! datebook edit <ID> --start 09:00
//! datebook move <ID> --to 2024-03-05
//! datebook delete <ID> --all
//! ```
//!
//! Create, edit and move refuse to overlap an existing event on the same day
//! and exit with status 2; pass `--force` to schedule anyway.

mod config;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use datebook_engine::calendar_math::{format_display_date, format_month_year};
use datebook_engine::event::{Occurrence, RecurrencePattern, WeekDay};
use datebook_engine::form::default_pattern;
use datebook_engine::{
    CalendarMonth, EventForm, EventService, EventStore, JsonFileStore, MutationOutcome,
};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Exit status when a mutation was refused because of a conflict.
const EXIT_CONFLICT: i32 = 2;

#[derive(Parser)]
#[command(name = "datebook", version, about = "Personal calendar with recurring events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to <config dir>/datebook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Events file, overriding `data_file` from the config
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid containing a date
    Month {
        /// Any date in the month (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Only show events whose title or description contains this text
        #[arg(long)]
        search: Option<String>,
        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the occurrences on one day
    Day {
        /// The day (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        search: Option<String>,
    },
    /// List stored events
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Add an event
    Add {
        #[command(flatten)]
        fields: EventFields,
        /// Store the event even if it overlaps another one
        #[arg(long)]
        force: bool,
    },
    /// Edit an event; omitted fields keep their current value
    Edit {
        id: String,
        #[command(flatten)]
        fields: EventFields,
        #[arg(long)]
        force: bool,
    },
    /// Delete an event
    Delete {
        id: String,
        /// Delete the whole series
        #[arg(long)]
        all: bool,
    },
    /// Move an event to another day (moves a whole series by its anchor)
    Move {
        id: String,
        /// The new date
        #[arg(long)]
        to: NaiveDate,
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct EventFields {
    #[arg(long)]
    title: Option<String>,
    /// Date as YYYY-MM-DD (the first occurrence for a series)
    #[arg(long)]
    date: Option<String>,
    /// Start time as HH:MM
    #[arg(long)]
    start: Option<String>,
    /// End time as HH:MM
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    color: Option<String>,
    /// none, daily, weekly, monthly or custom
    #[arg(long)]
    repeat: Option<String>,
    /// Repeat every N days/weeks/months
    #[arg(long)]
    interval: Option<u32>,
    /// Comma-separated weekdays for weekly repeats (e.g. mon,thu)
    #[arg(long)]
    on: Option<String>,
    /// Last date the series may occur on
    #[arg(long)]
    until: Option<NaiveDate>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(cli.debug, &config.log_level);

    let data_file = cli.data.clone().unwrap_or_else(|| config.data_file.clone());
    debug!(path = %data_file.display(), "using events file");
    let service = EventService::new(JsonFileStore::new(data_file));
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Month { date, search, json } => {
            let month = service.month(date.unwrap_or(today), search.as_deref(), today);
            if json {
                println!("{}", serde_json::to_string_pretty(&month)?);
            } else {
                print_month(&month);
            }
        }
        Commands::Day { date, search } => {
            let date = date.unwrap_or(today);
            println!("{}", format_display_date(date));
            let occurrences = service.day(date, search.as_deref());
            if occurrences.is_empty() {
                println!("  No events");
            }
            for occurrence in &occurrences {
                println!("  {}", describe(occurrence));
            }
        }
        Commands::List { search } => {
            let events = service.events();
            let events = match search.as_deref() {
                Some(term) => datebook_engine::filter_events(&events, term),
                None => events,
            };
            for event in &events {
                println!(
                    "{}  {}  {}-{}  {}  [{}]",
                    event.id,
                    event.date,
                    event.start_time.format("%H:%M"),
                    event.end_time.format("%H:%M"),
                    event.title,
                    event.recurrence.pattern.name(),
                );
            }
        }
        Commands::Add { fields, force } => {
            let mut form = EventForm::for_date(today);
            form.color = config.default_color.clone();
            fields.apply(&mut form)?;
            let outcome = service.create(&form)?;
            finish(&service, outcome, force, "Created", None)?;
        }
        Commands::Edit { id, fields, force } => {
            let existing = service
                .events()
                .into_iter()
                .find(|event| event.id == id)
                .with_context(|| format!("No event with id '{}'", id))?;
            let mut form = EventForm::from_event(&existing);
            fields.apply(&mut form)?;
            let outcome = service.update(&id, &form)?;
            finish(&service, outcome, force, "Updated", Some(&id))?;
        }
        Commands::Delete { id, all } => {
            let before = service.events().len();
            let after = service.delete(&id, all)?.len();
            if before == after {
                anyhow::bail!("No event with id '{}'", id);
            }
            println!("Deleted {}", id);
        }
        Commands::Move { id, to, force } => {
            if !service.events().iter().any(|event| event.id == id) {
                anyhow::bail!("No event with id '{}'", id);
            }
            let outcome = service.move_event(&id, to)?;
            finish(&service, outcome, force, "Moved", Some(&id))?;
        }
    }

    Ok(())
}

impl EventFields {
    /// Overwrite the form fields that were given on the command line.
    fn apply(self, form: &mut EventForm) -> Result<()> {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(date) = self.date {
            form.date = date;
        }
        if let Some(start) = self.start {
            form.start_time = start;
        }
        if let Some(end) = self.end {
            form.end_time = end;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(color) = self.color {
            form.color = color;
        }

        if let Some(name) = self.repeat.as_deref() {
            form.recurrence.pattern = default_pattern(name).with_context(|| {
                format!(
                    "Unknown repeat '{}'. Available: none, daily, weekly, monthly, custom",
                    name
                )
            })?;
        }
        if let Some(interval) = self.interval {
            set_interval(&mut form.recurrence.pattern, interval)?;
        }
        if let Some(on) = self.on.as_deref() {
            let days = parse_week_days(on)?;
            match &mut form.recurrence.pattern {
                RecurrencePattern::Weekly { week_days, .. } => *week_days = days.into_iter().collect(),
                _ => anyhow::bail!("--on only applies to weekly repeats"),
            }
        }
        if let Some(until) = self.until {
            form.recurrence.end_date = Some(until);
        }

        Ok(())
    }
}

fn set_interval(pattern: &mut RecurrencePattern, value: u32) -> Result<()> {
    match pattern {
        RecurrencePattern::Daily { interval }
        | RecurrencePattern::Weekly { interval, .. }
        | RecurrencePattern::Monthly { interval } => *interval = value,
        RecurrencePattern::Custom { interval_days } => *interval_days = value,
        RecurrencePattern::None => anyhow::bail!("--interval needs --repeat"),
    }
    Ok(())
}

fn parse_week_days(raw: &str) -> Result<Vec<WeekDay>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<WeekDay>().map_err(anyhow::Error::msg))
        .collect()
}

/// Report a mutation outcome; `id` is `None` for a newly created event. A
/// conflict is either forced through or ends the process with
/// [`EXIT_CONFLICT`].
fn finish<S: EventStore>(
    service: &EventService<S>,
    outcome: MutationOutcome,
    force: bool,
    verb: &str,
    id: Option<&str>,
) -> Result<()> {
    match outcome {
        MutationOutcome::Applied(events) => {
            // A created event is appended last.
            let id = id.or_else(|| events.last().map(|event| event.id.as_str()));
            println!("{} {}", verb, id.unwrap_or_default());
            Ok(())
        }
        MutationOutcome::Conflict(report) if force => {
            let id = report.proposed.id.clone();
            service.force_apply(report.proposed)?;
            println!("{} {} (overlaps {})", verb, id, report.conflicting.event.title);
            Ok(())
        }
        MutationOutcome::Conflict(report) => {
            eprintln!(
                "Conflict: '{}' overlaps {}",
                report.proposed.title,
                describe(&report.conflicting)
            );
            eprintln!("Use --force to schedule it anyway.");
            process::exit(EXIT_CONFLICT);
        }
    }
}

fn describe(occurrence: &Occurrence) -> String {
    let event = &occurrence.event;
    let mut line = format!(
        "{} {}-{}  {}  [{}]",
        occurrence.occurrence_date,
        event.start_time.format("%H:%M"),
        event.end_time.format("%H:%M"),
        event.title,
        occurrence.series_id(),
    );
    if occurrence.is_instance() {
        line.push_str(" (repeats)");
    }
    line
}

fn print_month(month: &CalendarMonth) {
    if let Some(first) = month.days.iter().find(|day| day.is_in_target_month) {
        println!("{}", format_month_year(first.date));
    }
    println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");
    for week in month.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|day| {
                let marker = if day.is_today { '*' } else { ' ' };
                let count = if day.occurrences.is_empty() {
                    ' '
                } else {
                    '+'
                };
                if day.is_in_target_month {
                    format!("{}{:>2}{}", marker, day.date.day(), count)
                } else {
                    "    ".to_string()
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }

    for day in month.days.iter().filter(|day| day.is_in_target_month) {
        for occurrence in &day.occurrences {
            println!("{}", describe(occurrence));
        }
    }
}

fn init_tracing(debug: bool, log_level: &str) {
    let filter = if debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(log_level))
            .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
