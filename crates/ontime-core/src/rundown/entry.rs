//! Rundown entry types: events, blocks and delays.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timing::{calculate_duration, ReconciledTimes};

/// A schedulable item on the rundown.
///
/// Times are milliseconds from the logical day start (00:00). `delay` is a
/// presentation-only shift applied when rendering the start; it never
/// participates in the stored `duration == time_end - time_start` invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntimeEvent {
    pub id: String,
    #[serde(default)]
    pub cue: String,
    pub title: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub skip: bool,
    pub time_start: i64,
    pub time_end: i64,
    pub duration: i64,
    #[serde(default)]
    pub delay: i64,
}

impl OntimeEvent {
    pub fn new(title: impl Into<String>, time_start: i64, time_end: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            cue: String::new(),
            title: title.into(),
            note: String::new(),
            colour: None,
            is_public: true,
            skip: false,
            time_start,
            time_end,
            duration: calculate_duration(time_start, time_end),
            delay: 0,
        }
    }

    /// The displayed start time: stored start shifted by the delay,
    /// clamped at the day start.
    pub fn effective_start(&self) -> i64 {
        (self.time_start + self.delay).max(0)
    }

    /// Commit a reconciled start/end pair, recomputing the stored
    /// duration. All three fields change together; this is the only way
    /// the triple is mutated.
    pub fn apply_times(&mut self, times: &ReconciledTimes) {
        self.time_start = times.start;
        self.time_end = times.end;
        self.duration = calculate_duration(times.start, times.end);
    }
}

/// A section marker. Blocks reset the delay accumulated by preceding
/// delay entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntimeBlock {
    pub id: String,
    pub title: String,
}

impl OntimeBlock {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
        }
    }
}

/// A delay applied to the displayed times of all subsequent events, up to
/// the next block. May be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntimeDelay {
    pub id: String,
    pub duration: i64,
}

impl OntimeDelay {
    pub fn new(duration: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            duration,
        }
    }
}

/// One entry in the rundown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RundownEntry {
    Event(OntimeEvent),
    Block(OntimeBlock),
    Delay(OntimeDelay),
}

impl RundownEntry {
    pub fn id(&self) -> &str {
        match self {
            Self::Event(e) => &e.id,
            Self::Block(b) => &b.id,
            Self::Delay(d) => &d.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Event(_) => "event",
            Self::Block(_) => "block",
            Self::Delay(_) => "delay",
        }
    }

    pub fn as_event(&self) -> Option<&OntimeEvent> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::{reconcile, TimeField};

    #[test]
    fn new_event_derives_duration() {
        let event = OntimeEvent::new("Opening", 1_000, 4_000);
        assert_eq!(event.duration, 3_000);
        assert!(!event.id.is_empty());
    }

    #[test]
    fn effective_start_clamps_at_day_start() {
        let mut event = OntimeEvent::new("Opening", 1_000, 4_000);
        event.delay = -5_000;
        assert_eq!(event.effective_start(), 0);
        event.delay = 2_000;
        assert_eq!(event.effective_start(), 3_000);
    }

    #[test]
    fn apply_times_keeps_triple_consistent() {
        let mut event = OntimeEvent::new("Opening", 100, 200);
        let times = reconcile(TimeField::DurationOverride, 50, event.time_start, event.time_end);
        event.apply_times(&times);
        assert_eq!(event.time_start, 100);
        assert_eq!(event.time_end, 150);
        assert_eq!(event.duration, event.time_end - event.time_start);
    }

    #[test]
    fn entry_serialization_is_type_tagged() {
        let entry = RundownEntry::Block(OntimeBlock::new("Act 1"));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"type\":\"block\""));
        let decoded: RundownEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.kind(), "block");
    }
}
