//! Registration rows and the statuses derived from them.
//!
//! # Invariants
//! - `RecordedStatus` holds only explicit administrative states; check-in and
//!   check-out are expressed by timestamps, never by the recorded status.
//! - `DerivedStatus` is never stored; it is recomputed from a row on read.

use crate::model::attendee::{AttendeeId, ConferenceId, RegistrationId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Status value stored on a registration row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordedStatus {
    Registered,
    Cancelled,
    NoShow,
}

impl RecordedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no-show",
        }
    }
}

impl FromStr for RecordedStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "registered" => Ok(Self::Registered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "no-show" | "no_show" | "noshow" => Ok(Self::NoShow),
            _ => Err(UnknownStatus(value.to_string())),
        }
    }
}

/// One fact about a registration lifecycle for an attendee at a conference.
///
/// All timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationEvent {
    pub registration_id: RegistrationId,
    pub conference_id: ConferenceId,
    pub attendee_id: AttendeeId,
    #[serde(default)]
    pub status: Option<RecordedStatus>,
    #[serde(default)]
    pub registration_date: Option<i64>,
    #[serde(default)]
    pub checkin_time: Option<i64>,
    #[serde(default)]
    pub checkout_time: Option<i64>,
}

impl RegistrationEvent {
    /// Creates a freshly registered row with no check-in activity.
    pub fn new(
        registration_id: RegistrationId,
        conference_id: ConferenceId,
        attendee_id: AttendeeId,
        registration_date: i64,
    ) -> Self {
        Self {
            registration_id,
            conference_id,
            attendee_id,
            status: Some(RecordedStatus::Registered),
            registration_date: Some(registration_date),
            checkin_time: None,
            checkout_time: None,
        }
    }

    /// Ordering key used to pick the latest row:
    /// `checkout_time ?? checkin_time ?? registration_date`.
    pub fn recency_key(&self) -> Option<i64> {
        self.checkout_time
            .or(self.checkin_time)
            .or(self.registration_date)
    }
}

/// Display status computed from a registration row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DerivedStatus {
    Registered,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl DerivedStatus {
    /// All statuses in display order.
    pub const ALL: [DerivedStatus; 5] = [
        Self::Registered,
        Self::CheckedIn,
        Self::CheckedOut,
        Self::Cancelled,
        Self::NoShow,
    ];

    /// Stable wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::CheckedIn => "checked-in",
            Self::CheckedOut => "checked-out",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no-show",
        }
    }

    /// Whether the status is an explicit administrative terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::NoShow)
    }
}

impl Display for DerivedStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DerivedStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Returned when a status string is outside the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl Display for UnknownStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown registration status: {}", self.0)
    }
}

impl Error for UnknownStatus {}
