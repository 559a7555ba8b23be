use clap::Subcommand;
use ontime_core::storage::{Config, Database};
use ontime_core::timing::format::{delay_to_string, millis_to_string};
use ontime_core::RundownEntry;

#[derive(Subcommand)]
pub enum RundownAction {
    /// Show the full rundown, blocks and delays included
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete every entry
    Clear,
}

pub fn run(action: RundownAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RundownAction::Show { json } => {
            let db = Database::open()?;
            let rundown = db.load_rundown()?;
            if json {
                println!("{}", serde_json::to_string_pretty(rundown.entries())?);
                return Ok(());
            }

            let config = Config::load_or_default();
            println!("{} ({} entries)", config.project.name, rundown.len());
            for (index, entry) in rundown.entries().iter().enumerate() {
                match entry {
                    RundownEntry::Event(e) => {
                        let delay = delay_to_string(e.delay);
                        let delay = if delay.is_empty() {
                            delay
                        } else {
                            format!(" ({delay})")
                        };
                        println!(
                            "{index:3}  {} - {}{}  {}",
                            millis_to_string(e.time_start),
                            millis_to_string(e.time_end),
                            delay,
                            e.title,
                        );
                    }
                    RundownEntry::Block(b) => println!("{index:3}  --- {} ---", b.title),
                    RundownEntry::Delay(d) => {
                        println!("{index:3}  delay {}", delay_to_string(d.duration))
                    }
                }
            }
        }
        RundownAction::Clear => {
            let mut db = Database::open()?;
            let mut rundown = db.load_rundown()?;
            rundown.clear();
            db.save_rundown(&rundown)?;
            println!("rundown cleared");
        }
    }
    Ok(())
}
