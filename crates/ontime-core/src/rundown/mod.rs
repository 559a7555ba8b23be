//! Rundown: the ordered sequence of events, blocks and delays that make up
//! a show's timeline.
//!
//! The rundown owns the entries and is the only mutation path for an
//! event's timing triple: edits go through [`Rundown::update_event_times`],
//! which reconciles the edited field, commits all three fields together and
//! returns the advisory validation. Every mutation produces a
//! [`RundownChange`]; the sheet mirror consumes these to keep its rows
//! aligned with the entry order.

mod entry;

pub use entry::{OntimeBlock, OntimeDelay, OntimeEvent, RundownEntry};

use serde::{Deserialize, Serialize};

use crate::error::RundownError;
use crate::timing::{self, TimeField, Validation};

/// Record of a single rundown mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum RundownChange {
    EventUpdated { index: usize, id: String },
    Inserted { index: usize, id: String },
    Removed { index: usize, id: String },
    Moved { from: usize, to: usize, id: String },
    Cleared,
}

/// The ordered entry collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rundown {
    entries: Vec<RundownEntry>,
}

impl Rundown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RundownEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&RundownEntry> {
        self.entries.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    /// Look up an event by id. Blocks and delays are not events.
    pub fn event(&self, id: &str) -> Option<&OntimeEvent> {
        self.entries
            .iter()
            .find(|e| e.id() == id)
            .and_then(RundownEntry::as_event)
    }

    /// Append an entry at the end of the rundown.
    pub fn push(&mut self, entry: RundownEntry) -> RundownChange {
        let id = entry.id().to_string();
        self.entries.push(entry);
        self.refresh_delays();
        RundownChange::Inserted {
            index: self.entries.len() - 1,
            id,
        }
    }

    /// Insert an entry at `index`, shifting later entries down.
    pub fn insert_at(
        &mut self,
        index: usize,
        entry: RundownEntry,
    ) -> Result<RundownChange, RundownError> {
        if index > self.entries.len() {
            return Err(RundownError::OutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        let id = entry.id().to_string();
        self.entries.insert(index, entry);
        self.refresh_delays();
        Ok(RundownChange::Inserted { index, id })
    }

    /// Remove the entry with the given id.
    pub fn remove(&mut self, id: &str) -> Result<RundownChange, RundownError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| RundownError::UnknownEntry { id: id.to_string() })?;
        self.entries.remove(index);
        self.refresh_delays();
        Ok(RundownChange::Removed {
            index,
            id: id.to_string(),
        })
    }

    /// Move the entry at `from` so it ends up at index `to`.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<RundownChange, RundownError> {
        let len = self.entries.len();
        if from >= len {
            return Err(RundownError::OutOfBounds { index: from, len });
        }
        if to >= len {
            return Err(RundownError::OutOfBounds { index: to, len });
        }
        let entry = self.entries.remove(from);
        let id = entry.id().to_string();
        self.entries.insert(to, entry);
        self.refresh_delays();
        Ok(RundownChange::Moved { from, to, id })
    }

    /// Remove all entries.
    pub fn clear(&mut self) -> RundownChange {
        self.entries.clear();
        RundownChange::Cleared
    }

    /// Stored end time of the nearest event entry before `index`, or 0
    /// when there is none. Blocks and delays are skipped; delays are
    /// presentation-only and never feed validation.
    pub fn previous_end(&self, index: usize) -> i64 {
        self.entries[..index.min(self.entries.len())]
            .iter()
            .rev()
            .find_map(RundownEntry::as_event)
            .map(|e| e.time_end)
            .unwrap_or(0)
    }

    /// Delay accumulated by delay entries before `index`. Blocks reset the
    /// running total.
    pub fn accumulated_delay(&self, index: usize) -> i64 {
        let mut acc = 0;
        for entry in &self.entries[..index.min(self.entries.len())] {
            match entry {
                RundownEntry::Delay(d) => acc += d.duration,
                RundownEntry::Block(_) => acc = 0,
                RundownEntry::Event(_) => {}
            }
        }
        acc
    }

    /// Edit one time field of an event: reconcile, commit the triple
    /// atomically and return the advisory validation against the
    /// preceding event. Warnings never block the commit.
    pub fn update_event_times(
        &mut self,
        id: &str,
        field: TimeField,
        value: i64,
    ) -> Result<(Validation, RundownChange), RundownError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| RundownError::UnknownEntry { id: id.to_string() })?;
        let previous_end = self.previous_end(index);

        let event = match &mut self.entries[index] {
            RundownEntry::Event(e) => e,
            _ => return Err(RundownError::NotAnEvent { id: id.to_string() }),
        };

        let validation = timing::validate(field, value, event.time_start, event.time_end, previous_end);
        let times = timing::reconcile(field, value, event.time_start, event.time_end);
        event.apply_times(&times);

        Ok((
            validation,
            RundownChange::EventUpdated {
                index,
                id: id.to_string(),
            },
        ))
    }

    /// Fold accumulated delays into the stored times of affected events
    /// and drop the delay entries. The displayed schedule becomes the
    /// stored one. Starts clamp at the day start; durations are preserved.
    ///
    /// Returns the number of events that were shifted.
    pub fn apply_delays(&mut self) -> usize {
        let mut acc = 0;
        let mut shifted = 0;
        for entry in &mut self.entries {
            match entry {
                RundownEntry::Delay(d) => acc += d.duration,
                RundownEntry::Block(_) => acc = 0,
                RundownEntry::Event(e) => {
                    if acc != 0 {
                        let start = (e.time_start + acc).max(0);
                        e.time_start = start;
                        e.time_end = start + e.duration;
                        shifted += 1;
                    }
                }
            }
        }
        self.entries.retain(|e| !matches!(e, RundownEntry::Delay(_)));
        self.refresh_delays();
        shifted
    }

    /// Recompute each event's cached presentation delay from the delay and
    /// block entries before it. Called after every structural mutation.
    fn refresh_delays(&mut self) {
        let mut acc = 0;
        for entry in &mut self.entries {
            match entry {
                RundownEntry::Delay(d) => acc += d.duration,
                RundownEntry::Block(_) => acc = 0,
                RundownEntry::Event(e) => e.delay = acc,
            }
        }
    }
}
