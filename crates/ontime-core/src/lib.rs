//! # Ontime Core Library
//!
//! This library provides the core business logic for the Ontime rundown
//! timer. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with GUI clients being thin
//! layers over the same core library.
//!
//! ## Architecture
//!
//! - **Timing**: pure reconciliation of an event's start/end/duration when
//!   one field is edited, plus advisory validation against the preceding
//!   event (overlap/spacing, next-day rollover warnings)
//! - **Rundown**: the ordered collection of events, blocks and delays, and
//!   the only mutation path for the timing triple
//! - **Sheet**: mirroring of rundown mutations into worksheet rows with
//!   out-of-sync detection
//! - **Storage**: SQLite-based rundown persistence and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`timing::reconcile`] / [`timing::validate`]: the time edit contract
//! - [`Rundown`]: ordered entry collection
//! - [`SheetMirror`]: rundown-to-worksheet mirroring
//! - [`Database`] / [`Config`]: persistence and configuration

pub mod error;
pub mod rundown;
pub mod sheet;
pub mod storage;
pub mod timing;

pub use error::{ConfigError, CoreError, DatabaseError, RundownError};
pub use rundown::{OntimeBlock, OntimeDelay, OntimeEvent, Rundown, RundownChange, RundownEntry};
pub use sheet::{InMemorySheet, SheetClient, SheetError, SheetMirror, SheetRow, SyncState, SyncStatus};
pub use storage::{Config, Database};
pub use timing::{
    calculate_duration, reconcile, validate, ReconciledTimes, TimeField, TimeWarnings, Validation,
    DAY_MS,
};
