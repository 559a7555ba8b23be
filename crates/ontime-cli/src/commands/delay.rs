use clap::Subcommand;
use ontime_core::storage::Database;
use ontime_core::timing::format::parse_time_entry;
use ontime_core::{OntimeBlock, OntimeDelay, RundownEntry};

#[derive(Subcommand)]
pub enum DelayAction {
    /// Add a delay entry (shifts displayed times of following events)
    Add {
        /// Delay amount (HH:MM, HH:MM:SS or milliseconds, may be negative)
        duration: String,
        /// Position to insert at (default: end)
        #[arg(long)]
        at: Option<usize>,
    },
    /// Add a block marker (resets accumulated delay)
    Block {
        title: String,
        /// Position to insert at (default: end)
        #[arg(long)]
        at: Option<usize>,
    },
    /// Fold accumulated delays into stored times and drop the delay entries
    Apply,
}

pub fn run(action: DelayAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DelayAction::Add { duration, at } => {
            let duration = parse_time_entry(&duration)
                .ok_or_else(|| format!("cannot parse delay value '{duration}'"))?;
            let mut db = Database::open()?;
            let mut rundown = db.load_rundown()?;
            let entry = RundownEntry::Delay(OntimeDelay::new(duration));
            match at {
                Some(index) => {
                    rundown.insert_at(index, entry)?;
                }
                None => {
                    rundown.push(entry);
                }
            }
            db.save_rundown(&rundown)?;
            println!("delay added");
        }
        DelayAction::Block { title, at } => {
            let mut db = Database::open()?;
            let mut rundown = db.load_rundown()?;
            let entry = RundownEntry::Block(OntimeBlock::new(title));
            match at {
                Some(index) => {
                    rundown.insert_at(index, entry)?;
                }
                None => {
                    rundown.push(entry);
                }
            }
            db.save_rundown(&rundown)?;
            println!("block added");
        }
        DelayAction::Apply => {
            let mut db = Database::open()?;
            let mut rundown = db.load_rundown()?;
            let shifted = rundown.apply_delays();
            db.save_rundown(&rundown)?;
            println!("delays applied to {shifted} events");
        }
    }
    Ok(())
}
