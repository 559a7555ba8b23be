//! Mirrors rundown mutations into worksheet rows.
//!
//! The mirror translates each [`RundownChange`] into row operations at
//! `row_offset + entry index`, where `row_offset` is the number of header
//! rows above the first mirrored entry. It also detects when the sheet has
//! drifted from the rundown (rows edited or added out-of-band).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rundown::{Rundown, RundownChange, RundownEntry};
use crate::timing::format::{delay_to_string, millis_to_string};

use super::client::{SheetClient, SheetError, SheetRow};

/// Result of comparing the mirrored rows against the rundown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SyncState {
    InSync,
    OutOfSync { expected: usize, found: usize },
}

/// Mirror bookkeeping, rendered by status surfaces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncStatus {
    pub last_push_at: Option<DateTime<Utc>>,
    pub rows_mirrored: usize,
}

/// Keeps a sheet aligned with the rundown, one row per entry.
pub struct SheetMirror<C: SheetClient> {
    client: C,
    row_offset: usize,
    status: SyncStatus,
}

impl<C: SheetClient> SheetMirror<C> {
    pub fn new(client: C, row_offset: usize) -> Self {
        Self {
            client,
            row_offset,
            status: SyncStatus::default(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Give the client back, dropping the mirror.
    pub fn into_client(self) -> C {
        self.client
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    /// Render the worksheet row for one entry: cue, title, start, end,
    /// duration. Blocks and delays carry their own shape in the same
    /// columns so the sheet reads top-to-bottom like the rundown.
    pub fn row_for(entry: &RundownEntry) -> SheetRow {
        match entry {
            RundownEntry::Event(e) => SheetRow::new(vec![
                e.cue.clone(),
                e.title.clone(),
                millis_to_string(e.time_start),
                millis_to_string(e.time_end),
                millis_to_string(e.duration),
            ]),
            RundownEntry::Block(b) => SheetRow::new(vec![
                String::new(),
                b.title.clone(),
                String::new(),
                String::new(),
                String::new(),
            ]),
            RundownEntry::Delay(d) => SheetRow::new(vec![
                String::new(),
                format!("Delay {}", delay_to_string(d.duration)),
                String::new(),
                String::new(),
                String::new(),
            ]),
        }
    }

    /// Mirror one rundown mutation into the sheet.
    pub fn apply(&mut self, change: &RundownChange, rundown: &Rundown) -> Result<(), SheetError> {
        match change {
            RundownChange::Inserted { index, .. } => {
                let entry = rundown
                    .get(*index)
                    .ok_or(SheetError::MissingEntry { index: *index })?;
                self.client
                    .insert_row(self.row_offset + index, Self::row_for(entry))?;
            }
            RundownChange::Removed { index, .. } => {
                self.client.delete_row(self.row_offset + index)?;
            }
            RundownChange::Moved { from, to, .. } => {
                let entry = rundown
                    .get(*to)
                    .ok_or(SheetError::MissingEntry { index: *to })?;
                self.client.delete_row(self.row_offset + from)?;
                self.client
                    .insert_row(self.row_offset + to, Self::row_for(entry))?;
            }
            RundownChange::EventUpdated { index, .. } => {
                let entry = rundown
                    .get(*index)
                    .ok_or(SheetError::MissingEntry { index: *index })?;
                self.client
                    .update_row(self.row_offset + index, Self::row_for(entry))?;
            }
            RundownChange::Cleared => {
                self.client.truncate(self.row_offset)?;
            }
        }
        self.status.rows_mirrored = rundown.len();
        self.status.last_push_at = Some(Utc::now());
        Ok(())
    }

    /// Rewrite the full mirror from scratch.
    pub fn push_all(&mut self, rundown: &Rundown) -> Result<(), SheetError> {
        self.client.truncate(self.row_offset)?;
        for (index, entry) in rundown.entries().iter().enumerate() {
            self.client
                .insert_row(self.row_offset + index, Self::row_for(entry))?;
        }
        self.status.rows_mirrored = rundown.len();
        self.status.last_push_at = Some(Utc::now());
        Ok(())
    }

    /// Compare the mirrored rows against the rundown: row count below the
    /// offset must match the entry count, and each row must render
    /// identically. `found` counts the rows actually present.
    pub fn check_sync(&self, rundown: &Rundown) -> Result<SyncState, SheetError> {
        let expected = rundown.len();
        let found = self.client.row_count()?.saturating_sub(self.row_offset);
        if found != expected {
            return Ok(SyncState::OutOfSync { expected, found });
        }
        for (index, entry) in rundown.entries().iter().enumerate() {
            let row = self.client.read_row(self.row_offset + index)?;
            if row != Self::row_for(entry) {
                return Ok(SyncState::OutOfSync { expected, found });
            }
        }
        Ok(SyncState::InSync)
    }
}
