//! Check-in QR payload encoding and decoding.
//!
//! # Responsibility
//! - Turn a `QrPayload` into the string rendered into a QR image and back.
//! - Accept both the long-form and the short-form key scheme on decode.
//! - Compute and verify the payload checksum.
//!
//! # Invariants
//! - Encoding always produces the long form with a stable key order.
//! - `decode(&encode(&p)) == Ok(p)` for every payload built through
//!   `QrPayload::new` and its setters, and for every decoded payload.
//! - The `type` tag is informational; decode never rejects on it.

pub mod checksum;
pub mod codec;
pub mod payload;

pub use checksum::{compute_checksum, verify_checksum, ChecksumVerdict};
pub use codec::{decode, encode};
pub use payload::{
    DecodeError, PayloadKind, QrPayload, RegistrationSnapshot, ATTENDEE_REGISTRATION_TYPE,
    DEFAULT_PAYLOAD_VERSION,
};
