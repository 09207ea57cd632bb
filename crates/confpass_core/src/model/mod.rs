//! Domain model shared by the QR codec, status resolver and permission checks.
//!
//! # Responsibility
//! - Define the canonical records the core operates on.
//! - Keep display-only fields separate from fields that drive logic.
//!
//! # Invariants
//! - Attendee ids are positive integers once a record has been accepted.
//! - Timestamps are Unix epoch milliseconds; unparseable upstream values are
//!   already mapped to `None` before they reach these types.
//! - Records are plain values; nothing here performs I/O.

pub mod attendee;
pub mod grant;
pub mod registration;
