use clap::Subcommand;
use ontime_core::storage::{Config, Database};
use ontime_core::{InMemorySheet, SheetClient, SheetMirror, SheetRow, SyncState};

const SNAPSHOT_KEY: &str = "sheet_snapshot";

#[derive(Subcommand)]
pub enum SheetAction {
    /// Mirror the rundown into the configured sheet layout (dry run
    /// against the stored snapshot)
    Push,
    /// Compare the last pushed snapshot against the current rundown
    Status,
}

fn seeded_sheet(config: &Config) -> Result<InMemorySheet, Box<dyn std::error::Error>> {
    let mut sheet = InMemorySheet::new();
    // Header rows occupy the offset area; the first carries the
    // worksheet name.
    for index in 0..config.sheet.row_offset {
        let label = if index == 0 {
            config.sheet.worksheet.clone()
        } else {
            String::new()
        };
        sheet.insert_row(index, SheetRow::new(vec![label]))?;
    }
    Ok(sheet)
}

pub fn run(action: SheetAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SheetAction::Push => {
            let config = Config::load_or_default();
            let db = Database::open()?;
            let rundown = db.load_rundown()?;

            let mut mirror = SheetMirror::new(seeded_sheet(&config)?, config.sheet.row_offset);
            mirror.push_all(&rundown)?;

            for row in mirror.client().rows() {
                println!("{}", row.cells.join(" | "));
            }
            db.kv_set(SNAPSHOT_KEY, &serde_json::to_string(mirror.client())?)?;
            match &config.sheet.spreadsheet_id {
                Some(id) => println!("pushed {} rows (target spreadsheet {id})", rundown.len()),
                None => println!("pushed {} rows (no spreadsheet configured, dry run)", rundown.len()),
            }
        }
        SheetAction::Status => {
            let config = Config::load_or_default();
            let db = Database::open()?;
            let rundown = db.load_rundown()?;

            let Some(snapshot) = db.kv_get(SNAPSHOT_KEY)? else {
                println!("never pushed");
                return Ok(());
            };
            let sheet: InMemorySheet = serde_json::from_str(&snapshot)?;
            let mirror = SheetMirror::new(sheet, config.sheet.row_offset);
            match mirror.check_sync(&rundown)? {
                SyncState::InSync => println!("in sync ({} entries)", rundown.len()),
                SyncState::OutOfSync { expected, found } => {
                    println!("out of sync: expected {expected} rows, found {found}")
                }
            }
        }
    }
    Ok(())
}
