//! Attendee and conference reference records.
//!
//! These carry identity plus optional display fields. Only the ids take part
//! in resolution logic; names, emails and venues are passed through for
//! rendering.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable integer id of an attendee.
pub type AttendeeId = i64;
/// Stable integer id of a conference.
pub type ConferenceId = i64;
/// Stable integer id of a registration row.
pub type RegistrationId = i64;
/// Stable integer id of an application user (staff or attendee account).
pub type UserId = i64;

/// Identifies a person attending one or more conferences.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeRef {
    #[serde(rename = "id")]
    pub attendee_id: AttendeeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl AttendeeRef {
    /// Creates an identity-only reference.
    pub fn new(attendee_id: AttendeeId) -> Self {
        Self {
            attendee_id,
            ..Self::default()
        }
    }
}

/// Lifecycle phase of a conference as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConferenceStatus {
    Active,
    Upcoming,
    Completed,
}

impl ConferenceStatus {
    /// Stable wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for ConferenceStatus {
    type Err = UnknownConferenceStatus;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownConferenceStatus(value.to_string())),
        }
    }
}

/// Returned when a conference status string is outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConferenceStatus(pub String);

impl Display for UnknownConferenceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown conference status: {}", self.0)
    }
}

impl Error for UnknownConferenceStatus {}

/// Identifies a conference.
///
/// `conference_id == None` means "general / no specific conference".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceRef {
    #[serde(rename = "id", default)]
    pub conference_id: Option<ConferenceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Free-form date string as shown by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ConferenceStatus>,
}

impl ConferenceRef {
    /// Creates an identity-only reference.
    pub fn new(conference_id: Option<ConferenceId>) -> Self {
        Self {
            conference_id,
            ..Self::default()
        }
    }

    /// Returns whether this reference points at no specific conference.
    pub fn is_general(&self) -> bool {
        self.conference_id.is_none()
    }
}
