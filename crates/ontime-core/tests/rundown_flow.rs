//! End-to-end flow over the core library: mutate a rundown, persist it,
//! mirror it into a sheet, and verify drift detection.

use ontime_core::storage::database::Database;
use ontime_core::{
    InMemorySheet, OntimeBlock, OntimeDelay, OntimeEvent, Rundown, RundownEntry, SheetClient,
    SheetMirror, SheetRow, SyncState, TimeField,
};

fn build_show() -> Rundown {
    let mut rundown = Rundown::new();
    rundown.push(RundownEntry::Event(OntimeEvent::new(
        "Doors open",
        9 * 3_600_000,
        10 * 3_600_000,
    )));
    rundown.push(RundownEntry::Event(OntimeEvent::new(
        "Welcome",
        10 * 3_600_000,
        10 * 3_600_000 + 900_000,
    )));
    rundown.push(RundownEntry::Block(OntimeBlock::new("Main programme")));
    rundown.push(RundownEntry::Event(OntimeEvent::new(
        "Keynote",
        10 * 3_600_000 + 900_000,
        12 * 3_600_000,
    )));
    rundown
}

#[test]
fn edits_persist_and_mirror_consistently() {
    let mut rundown = build_show();

    // Pull the keynote forward; validation reports the overlap with the
    // welcome slot but the commit still happens.
    let keynote_id = rundown.entries()[3].id().to_string();
    let (validation, change) = rundown
        .update_event_times(&keynote_id, TimeField::TimeStart, 10 * 3_600_000)
        .unwrap();
    assert_eq!(validation.overlap_ms, -900_000);
    assert!(validation.is_valid);

    // Mirror with one header row.
    let mut sheet = InMemorySheet::new();
    sheet
        .insert_row(0, SheetRow::new(vec!["Event schedule".into()]))
        .unwrap();
    let mut mirror = SheetMirror::new(sheet, 1);
    mirror.push_all(&rundown).unwrap();
    mirror.apply(&change, &rundown).unwrap();
    assert_eq!(mirror.check_sync(&rundown).unwrap(), SyncState::InSync);

    // Persist through SQLite and reload.
    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::open_at(&dir.path().join("ontime.db")).unwrap();
    db.save_rundown(&rundown).unwrap();
    let reloaded = db.load_rundown().unwrap();
    assert_eq!(reloaded, rundown);

    // The reloaded rundown still matches the mirrored rows.
    assert_eq!(mirror.check_sync(&reloaded).unwrap(), SyncState::InSync);
}

#[test]
fn delay_lifecycle_survives_persistence() {
    let mut rundown = build_show();
    rundown
        .insert_at(2, RundownEntry::Delay(OntimeDelay::new(600_000)))
        .unwrap();

    // The delay sits right before the block, so no event is shifted yet.
    let welcome = rundown.entries()[1].as_event().unwrap();
    assert_eq!(welcome.delay, 0);
    let keynote = rundown.entries()[4].as_event().unwrap();
    assert_eq!(keynote.delay, 0, "block resets the accumulated delay");

    // Move the delay above the welcome slot and check the shift shows up.
    rundown.move_entry(2, 1).unwrap();
    let welcome = rundown.entries()[2].as_event().unwrap();
    assert_eq!(welcome.delay, 600_000);
    assert_eq!(welcome.effective_start(), 10 * 3_600_000 + 600_000);

    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::open_at(&dir.path().join("ontime.db")).unwrap();
    db.save_rundown(&rundown).unwrap();
    let mut reloaded = db.load_rundown().unwrap();
    assert_eq!(reloaded, rundown);

    // Folding the delay into stored times drops the delay entry.
    let shifted = reloaded.apply_delays();
    assert_eq!(shifted, 1);
    let welcome = reloaded.entries()[1].as_event().unwrap();
    assert_eq!(welcome.time_start, 10 * 3_600_000 + 600_000);
    assert_eq!(welcome.duration, 900_000);
    assert_eq!(welcome.delay, 0);
}

#[test]
fn external_sheet_edits_show_as_out_of_sync() {
    let rundown = build_show();
    let mut mirror = SheetMirror::new(InMemorySheet::new(), 0);
    mirror.push_all(&rundown).unwrap();

    let mut tampered = mirror.into_client();
    tampered.rows_mut()[0].cells[1] = "Renamed in the sheet".into();
    let mirror = SheetMirror::new(tampered, 0);
    assert_eq!(
        mirror.check_sync(&rundown).unwrap(),
        SyncState::OutOfSync {
            expected: 4,
            found: 4
        }
    );
}
