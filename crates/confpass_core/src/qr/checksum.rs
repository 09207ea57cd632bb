//! Tamper checksum for QR payloads.
//!
//! The checksum is a 32-bit rolling string hash (`h = h * 31 + c`, wrapping)
//! over `"{attendee}-{conference}-{timestamp}"`, rendered as the lowercase
//! hex of its absolute value. An absent conference contributes an empty
//! segment. It detects accidental edits, not forgery.

use crate::model::attendee::{AttendeeId, ConferenceId};
use crate::qr::payload::QrPayload;

/// Result of checking a payload's checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumVerdict {
    Valid,
    Mismatch,
    /// The payload carries no checksum.
    Absent,
}

pub fn compute_checksum(
    attendee_id: AttendeeId,
    conference_id: Option<ConferenceId>,
    timestamp: i64,
) -> String {
    let conference = conference_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    let material = format!("{attendee_id}-{conference}-{timestamp}");
    let hash = material
        .encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)));
    format!("{:x}", i64::from(hash).abs())
}

/// Compares the carried checksum against a recomputation (case-insensitive).
pub fn verify_checksum(payload: &QrPayload) -> ChecksumVerdict {
    let Some(carried) = payload.checksum.as_deref() else {
        return ChecksumVerdict::Absent;
    };
    let expected = compute_checksum(payload.attendee_id, payload.conference_id, payload.timestamp);
    if carried.trim().eq_ignore_ascii_case(&expected) {
        ChecksumVerdict::Valid
    } else {
        ChecksumVerdict::Mismatch
    }
}
