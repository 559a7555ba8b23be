//! Reconciliation of an event's start, end and duration fields.
//!
//! A user edit touches exactly one field; the other two are recomputed so
//! that `duration == end - start` keeps holding for the stored values.
//! Validation against the preceding event is advisory: it annotates the
//! edit with warnings and an overlap magnitude, it never blocks the commit.

use serde::{Deserialize, Serialize};

/// Length of a logical day in milliseconds.
pub const DAY_MS: i64 = 86_400_000;

/// Which time field the user edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeField {
    TimeStart,
    TimeEnd,
    DurationOverride,
}

/// Consistent start/end pair resulting from a single field edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledTimes {
    pub start: i64,
    pub end: i64,
    /// True only when duration was the authoritative edit and `end` was
    /// derived from it, not the reverse.
    pub duration_override: bool,
}

/// Per-field advisory messages.
///
/// `end` and `duration` are reserved for future rules and currently never
/// populated; only `start` carries a message today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWarnings {
    pub start: Option<String>,
    pub end: Option<String>,
    pub duration: Option<String>,
}

impl TimeWarnings {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.duration.is_none()
    }
}

/// Outcome of validating a time edit against its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// Always true today; the field is kept so hard constraints can be
    /// added without changing the shape of the result.
    pub is_valid: bool,
    pub warnings: TimeWarnings,
    /// Signed gap between the edited event's start and the previous
    /// event's end: negative is an overlap, positive is spacing, zero is
    /// back-to-back.
    pub overlap_ms: i64,
}

/// Compute the consistent start/end pair after editing one time field.
///
/// Editing `TimeStart` or `TimeEnd` leaves the opposite bound untouched.
/// Editing `DurationOverride` reinterprets the value as an offset from the
/// unchanged start, deriving `end = start + value`.
///
/// Pure and total: any `i64` input is accepted, including negative or
/// out-of-range values. Validation is a separate, parallel step.
pub fn reconcile(
    field: TimeField,
    value: i64,
    current_start: i64,
    current_end: i64,
) -> ReconciledTimes {
    match field {
        TimeField::TimeStart => ReconciledTimes {
            start: value,
            end: current_end,
            duration_override: false,
        },
        TimeField::TimeEnd => ReconciledTimes {
            start: current_start,
            end: value,
            duration_override: false,
        },
        TimeField::DurationOverride => ReconciledTimes {
            start: current_start,
            end: current_start + value,
            duration_override: true,
        },
    }
}

/// Validate a time edit against the event's own bounds and the preceding
/// event's end time.
///
/// `previous_end` is the stored end of the chronologically preceding event
/// in the rundown, or 0 when the edited event is the first one.
///
/// The result is advisory only. An end earlier than the start is flagged
/// as a next-day rollover (or user error), never rejected.
pub fn validate(
    field: TimeField,
    value: i64,
    current_start: i64,
    current_end: i64,
    previous_end: i64,
) -> Validation {
    let times = reconcile(field, value, current_start, current_end);

    let mut warnings = TimeWarnings::default();
    if times.end < times.start {
        warnings.start = Some("Start time later than end time".to_string());
    }

    Validation {
        is_valid: true,
        warnings,
        overlap_ms: times.start - previous_end,
    }
}

/// Duration between two day-relative times, wrapping past midnight.
///
/// This is the caller's follow-up step after [`reconcile`]: the returned
/// value is what gets committed as the event's stored `duration`.
pub fn calculate_duration(start: i64, end: i64) -> i64 {
    if end >= start {
        end - start
    } else {
        end + DAY_MS - start
    }
}
