//! Time reconciliation, validation and formatting.
//!
//! This module provides:
//! - Reconciliation of a user edit to one time field into a consistent
//!   start/end/duration triple
//! - Advisory validation against the preceding event (overlap/spacing)
//! - Display formatting for day-relative millisecond times

pub mod format;
mod reconcile;

pub use reconcile::{
    calculate_duration, reconcile, validate, ReconciledTimes, TimeField, TimeWarnings, Validation,
    DAY_MS,
};
