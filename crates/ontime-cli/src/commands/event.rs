use clap::Subcommand;
use ontime_core::storage::Database;
use ontime_core::timing::format::{delay_to_string, millis_to_string, overlap_label, parse_time_entry};
use ontime_core::{OntimeEvent, RundownEntry, TimeField};

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event at the end of the rundown
    Add {
        /// Event title
        title: String,
        /// Start time (HH:MM, HH:MM:SS or milliseconds)
        #[arg(long)]
        start: String,
        /// End time (HH:MM, HH:MM:SS or milliseconds)
        #[arg(long)]
        end: String,
        /// Cue label
        #[arg(long)]
        cue: Option<String>,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },
    /// List events
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an event by id
    Del {
        id: String,
    },
    /// Move an entry to a new position
    Move {
        from: usize,
        to: usize,
    },
    /// Edit one time field (start, end or duration); the other fields are
    /// reconciled and committed together
    SetTime {
        id: String,
        /// Field to edit: start, end or duration
        field: String,
        /// New value (HH:MM, HH:MM:SS or milliseconds)
        value: String,
    },
}

fn parse_time(text: &str) -> Result<i64, Box<dyn std::error::Error>> {
    parse_time_entry(text).ok_or_else(|| format!("cannot parse time value '{text}'").into())
}

fn parse_field(text: &str) -> Result<TimeField, Box<dyn std::error::Error>> {
    match text {
        "start" => Ok(TimeField::TimeStart),
        "end" => Ok(TimeField::TimeEnd),
        "duration" => Ok(TimeField::DurationOverride),
        other => Err(format!("unknown time field '{other}' (expected start, end or duration)").into()),
    }
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        EventAction::Add {
            title,
            start,
            end,
            cue,
            note,
        } => {
            let mut event = OntimeEvent::new(title, parse_time(&start)?, parse_time(&end)?);
            let mut db = Database::open()?;
            let mut rundown = db.load_rundown()?;
            if let Some(cue) = cue {
                event.cue = cue;
            }
            if let Some(note) = note {
                event.note = note;
            }
            let id = event.id.clone();
            rundown.push(RundownEntry::Event(event));
            db.save_rundown(&rundown)?;
            println!("Event created: {id}");
        }
        EventAction::List { json } => {
            let db = Database::open()?;
            let rundown = db.load_rundown()?;
            let events: Vec<&OntimeEvent> = rundown
                .entries()
                .iter()
                .filter_map(RundownEntry::as_event)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                for event in events {
                    let delay = delay_to_string(event.delay);
                    let delay = if delay.is_empty() {
                        delay
                    } else {
                        format!(" ({delay})")
                    };
                    println!(
                        "{}  {}  {} - {}{}  {}",
                        event.id,
                        event.cue,
                        millis_to_string(event.time_start),
                        millis_to_string(event.time_end),
                        delay,
                        event.title,
                    );
                }
            }
        }
        EventAction::Del { id } => {
            let mut db = Database::open()?;
            let mut rundown = db.load_rundown()?;
            rundown.remove(&id)?;
            db.save_rundown(&rundown)?;
            println!("Event deleted: {id}");
        }
        EventAction::Move { from, to } => {
            let mut db = Database::open()?;
            let mut rundown = db.load_rundown()?;
            rundown.move_entry(from, to)?;
            db.save_rundown(&rundown)?;
            println!("moved {from} -> {to}");
        }
        EventAction::SetTime { id, field, value } => {
            let mut db = Database::open()?;
            let mut rundown = db.load_rundown()?;

            let field = parse_field(&field)?;
            let value = parse_time(&value)?;
            let (validation, _change) = rundown.update_event_times(&id, field, value)?;

            // Warnings are advisory; the commit already happened.
            db.save_rundown(&rundown)?;

            let event = rundown.event(&id).expect("event was just updated");
            println!(
                "{} - {} ({})",
                millis_to_string(event.time_start),
                millis_to_string(event.time_end),
                millis_to_string(event.duration),
            );
            if let Some(warning) = &validation.warnings.start {
                println!("warning: {warning}");
            }
            if let Some(label) = overlap_label(validation.overlap_ms) {
                println!("{label}");
            }
        }
    }
    Ok(())
}
