//! QR payload record and decode errors.
//!
//! # Invariants
//! - Text carried by a `QrPayload` is canonical: trimmed and never blank.
//!   Setters normalise their input, so `decode(&encode(&p)) == Ok(p)` holds
//!   for every payload reachable through the public API.

use crate::fields::canonical_text;
use crate::model::attendee::{
    AttendeeId, AttendeeRef, ConferenceId, ConferenceRef, RegistrationId,
};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Type tag carried by attendee check-in codes.
pub const ATTENDEE_REGISTRATION_TYPE: &str = "attendee_registration";
/// Version written when a payload does not specify one.
pub const DEFAULT_PAYLOAD_VERSION: &str = "1.0";

/// What the `type` tag of a decoded payload said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadKind {
    AttendeeRegistration,
    /// A tag other than `attendee_registration`.
    Other(String),
    /// No tag present; the caller's context decides.
    Unspecified,
}

impl PayloadKind {
    pub(crate) fn from_tag(tag: Option<String>) -> Self {
        match tag {
            Some(tag) if tag == ATTENDEE_REGISTRATION_TYPE => Self::AttendeeRegistration,
            Some(tag) => Self::Other(tag),
            None => Self::Unspecified,
        }
    }

    /// Tag written on encode; `None` for untagged payloads.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::AttendeeRegistration => Some(ATTENDEE_REGISTRATION_TYPE),
            Self::Other(tag) => Some(tag.as_str()),
            Self::Unspecified => None,
        }
    }
}

/// Registration details embedded by the name-card generator.
///
/// Display-only; status resolution always works from backend rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationSnapshot {
    pub registration_id: Option<RegistrationId>,
    /// Raw status string as stored at generation time.
    pub status: Option<String>,
    pub registration_date: Option<i64>,
    pub checkin_time: Option<i64>,
    pub checkout_time: Option<i64>,
}

/// Logical content of a check-in QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    /// Always positive.
    pub attendee_id: AttendeeId,
    pub conference_id: Option<ConferenceId>,
    pub registration_id: Option<RegistrationId>,
    /// Creation time in epoch milliseconds; `0` when the code carried none.
    pub timestamp: i64,
    pub(crate) kind: PayloadKind,
    pub(crate) checksum: Option<String>,
    pub(crate) version: String,
    pub(crate) attendee: Option<AttendeeRef>,
    pub(crate) conference: Option<ConferenceRef>,
    pub(crate) registration: Option<RegistrationSnapshot>,
}

impl QrPayload {
    /// Creates a minimal attendee registration payload.
    ///
    /// # Errors
    /// - `DecodeError::MissingAttendeeId` when `attendee_id` is not positive.
    pub fn new(
        attendee_id: AttendeeId,
        conference_id: Option<ConferenceId>,
        timestamp: i64,
    ) -> Result<Self, DecodeError> {
        if attendee_id <= 0 {
            return Err(DecodeError::MissingAttendeeId);
        }
        Ok(Self {
            attendee_id,
            conference_id,
            registration_id: None,
            timestamp,
            kind: PayloadKind::AttendeeRegistration,
            checksum: None,
            version: DEFAULT_PAYLOAD_VERSION.to_string(),
            attendee: None,
            conference: None,
            registration: None,
        })
    }

    pub fn with_registration_id(mut self, registration_id: RegistrationId) -> Self {
        self.registration_id = Some(registration_id);
        self
    }

    /// Fills `checksum` from the identity fields and timestamp.
    pub fn with_checksum(mut self) -> Self {
        self.checksum = Some(crate::qr::checksum::compute_checksum(
            self.attendee_id,
            self.conference_id,
            self.timestamp,
        ));
        self
    }

    /// Carries `checksum` as given (trimmed). A blank value clears it.
    pub fn with_checksum_text(mut self, checksum: &str) -> Self {
        self.checksum = canonical_text(checksum);
        self
    }

    /// Sets the format version (trimmed). A blank value restores the default.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version =
            canonical_text(version).unwrap_or_else(|| DEFAULT_PAYLOAD_VERSION.to_string());
        self
    }

    /// Embeds attendee display data.
    ///
    /// A block whose id is not positive cannot be read back and is not
    /// attached.
    pub fn with_attendee(mut self, attendee: AttendeeRef) -> Self {
        if attendee.attendee_id <= 0 {
            debug!("event=qr_payload module=qr status=degraded reason=attendee_block_without_id");
            self.attendee = None;
            return self;
        }
        self.attendee = Some(AttendeeRef {
            attendee_id: attendee.attendee_id,
            name: canonical(attendee.name),
            email: canonical(attendee.email),
            phone: canonical(attendee.phone),
            company: canonical(attendee.company),
            position: canonical(attendee.position),
            avatar_url: canonical(attendee.avatar_url),
        });
        self
    }

    pub fn with_conference(mut self, conference: ConferenceRef) -> Self {
        self.conference = Some(ConferenceRef {
            conference_id: conference.conference_id,
            name: canonical(conference.name),
            venue: canonical(conference.venue),
            start_date: canonical(conference.start_date),
            end_date: canonical(conference.end_date),
            status: conference.status,
        });
        self
    }

    pub fn with_registration(mut self, registration: RegistrationSnapshot) -> Self {
        self.registration = Some(RegistrationSnapshot {
            status: canonical(registration.status),
            ..registration
        });
        self
    }

    /// Observed `type` tag.
    pub fn kind(&self) -> &PayloadKind {
        &self.kind
    }

    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn attendee(&self) -> Option<&AttendeeRef> {
        self.attendee.as_ref()
    }

    pub fn conference(&self) -> Option<&ConferenceRef> {
        self.conference.as_ref()
    }

    pub fn registration(&self) -> Option<&RegistrationSnapshot> {
        self.registration.as_ref()
    }

    /// Whether the `type` tag marks this as an attendee registration code.
    ///
    /// Returns `None` when the tag was absent.
    pub fn is_attendee_registration(&self) -> Option<bool> {
        match self.kind {
            PayloadKind::AttendeeRegistration => Some(true),
            PayloadKind::Other(_) => Some(false),
            PayloadKind::Unspecified => None,
        }
    }

    /// Whether the code carried a usable creation time.
    pub fn has_valid_timestamp(&self) -> bool {
        self.timestamp > 0
    }
}

fn canonical(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(canonical_text)
}

/// QR decode failures surfaced to the scanning surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input is not a JSON object.
    MalformedJson(String),
    /// Neither `attendeeId` nor `id` is a positive integer.
    MissingAttendeeId,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedJson(details) => write!(f, "qr payload is not valid JSON: {details}"),
            Self::MissingAttendeeId => write!(f, "qr payload has no usable attendee id"),
        }
    }
}

impl Error for DecodeError {}
