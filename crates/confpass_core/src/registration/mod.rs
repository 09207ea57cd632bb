//! Registration status derivation.
//!
//! # Responsibility
//! - Pick the latest registration row for an attendee (optionally per
//!   conference).
//! - Derive the display status from that row.
//! - Decide which check-in actions the derived status admits.
//!
//! # Invariants
//! - Explicit `cancelled` / `no-show` always win over timestamps.
//! - Resolution never fails; anomalous rows still resolve to one status.
//! - Everything here is pure; nothing is cached between calls.

pub mod status;
pub mod transition;

pub use status::{
    latest_attendee_event, latest_event, resolve_status, tally_statuses, StatusTally,
};
pub use transition::{check_transition, CheckinAction, TransitionError};
