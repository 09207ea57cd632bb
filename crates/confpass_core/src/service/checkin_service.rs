//! Check-in use-case service.
//!
//! # Responsibility
//! - Run the scan flow end to end: decode, locate the registration, resolve
//!   its status, gate the actor, validate the transition.
//! - Keep callers free of ordering details between the three resolvers.
//!
//! # Invariants
//! - The service never fetches or stores data; rows and grants come from the
//!   caller on every call.
//! - A permission miss is reported as `PermissionDenied`, never as a decode or
//!   data error.

use crate::config::GatePolicy;
use crate::model::attendee::{AttendeeId, ConferenceId, RegistrationId, UserId};
use crate::model::grant::ConferencePermissionGrant;
use crate::model::registration::{DerivedStatus, RegistrationEvent};
use crate::permission::resolver::has_conference_permission;
use crate::qr::{decode, verify_checksum, ChecksumVerdict, DecodeError, PayloadKind, QrPayload};
use crate::registration::status::{latest_attendee_event, resolve_status};
use crate::registration::transition::{check_transition, CheckinAction, TransitionError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outcome of an allowed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinDecision {
    pub attendee_id: AttendeeId,
    pub conference_id: ConferenceId,
    pub registration_id: RegistrationId,
    /// Status before the action is applied.
    pub current_status: DerivedStatus,
    pub action: CheckinAction,
    pub checksum: ChecksumVerdict,
}

/// Reasons a scan cannot proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinError {
    Decode(DecodeError),
    /// The payload's `type` tag names something other than a registration.
    ForeignPayload(String),
    ChecksumMismatch,
    /// Neither the payload nor the service names a conference.
    MissingConference,
    NotRegistered {
        attendee_id: AttendeeId,
        conference_id: ConferenceId,
    },
    PermissionDenied {
        user_id: UserId,
        conference_id: ConferenceId,
        permission: String,
    },
    InvalidTransition(TransitionError),
}

impl Display for CheckinError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "{err}"),
            Self::ForeignPayload(kind) => write!(f, "qr payload type `{kind}` is not a registration"),
            Self::ChecksumMismatch => write!(f, "qr payload checksum does not match"),
            Self::MissingConference => write!(f, "no conference selected for this scan"),
            Self::NotRegistered {
                attendee_id,
                conference_id,
            } => write!(
                f,
                "attendee {attendee_id} is not registered for conference {conference_id}"
            ),
            Self::PermissionDenied {
                user_id,
                conference_id,
                permission,
            } => write!(
                f,
                "user {user_id} lacks `{permission}` on conference {conference_id}"
            ),
            Self::InvalidTransition(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CheckinError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::InvalidTransition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DecodeError> for CheckinError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<TransitionError> for CheckinError {
    fn from(value: TransitionError) -> Self {
        Self::InvalidTransition(value)
    }
}

/// Scan-flow orchestrator configured by a `GatePolicy`.
#[derive(Debug, Clone, Default)]
pub struct CheckinService {
    policy: GatePolicy,
    default_conference: Option<ConferenceId>,
}

impl CheckinService {
    pub fn new(policy: GatePolicy) -> Self {
        Self {
            policy,
            default_conference: None,
        }
    }

    /// Conference used when a scanned payload does not name one (the
    /// scanning station's selected conference).
    pub fn with_default_conference(mut self, conference_id: ConferenceId) -> Self {
        self.default_conference = Some(conference_id);
        self
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Decodes `raw_qr` and applies the policy's payload checks.
    pub fn scan(&self, raw_qr: &str) -> Result<QrPayload, CheckinError> {
        let payload = decode(raw_qr)?;
        if self.policy.require_attendee_type {
            if let PayloadKind::Other(kind) = payload.kind() {
                return Err(CheckinError::ForeignPayload(kind.clone()));
            }
        }
        if self.policy.verify_checksum && verify_checksum(&payload) == ChecksumVerdict::Mismatch {
            return Err(CheckinError::ChecksumMismatch);
        }
        Ok(payload)
    }

    /// Current status of the payload's attendee on `conference_id`.
    pub fn status_for(
        &self,
        attendee_id: AttendeeId,
        conference_id: ConferenceId,
        events: &[RegistrationEvent],
    ) -> Option<(RegistrationId, DerivedStatus)> {
        let latest = latest_attendee_event(events, attendee_id, conference_id)?;
        resolve_status(Some(latest)).map(|status| (latest.registration_id, status))
    }

    /// Evaluates `action` by `actor` for the scanned code `raw_qr`.
    pub fn evaluate(
        &self,
        raw_qr: &str,
        events: &[RegistrationEvent],
        grants: &[ConferencePermissionGrant],
        actor: UserId,
        action: CheckinAction,
    ) -> Result<CheckinDecision, CheckinError> {
        let result = self.evaluate_inner(raw_qr, events, grants, actor, action);
        match &result {
            Ok(decision) => info!(
                "event=checkin_evaluated module=service status=ok action={} attendee_id={} conference_id={} registration_id={} current_status={}",
                action.as_str(),
                decision.attendee_id,
                decision.conference_id,
                decision.registration_id,
                decision.current_status
            ),
            Err(err) => warn!(
                "event=checkin_evaluated module=service status=rejected action={} user_id={} reason={}",
                action.as_str(),
                actor,
                rejection_code(err)
            ),
        }
        result
    }

    fn evaluate_inner(
        &self,
        raw_qr: &str,
        events: &[RegistrationEvent],
        grants: &[ConferencePermissionGrant],
        actor: UserId,
        action: CheckinAction,
    ) -> Result<CheckinDecision, CheckinError> {
        let payload = self.scan(raw_qr)?;
        let conference_id = payload
            .conference_id
            .or(self.default_conference)
            .ok_or(CheckinError::MissingConference)?;

        let (registration_id, current_status) = self
            .status_for(payload.attendee_id, conference_id, events)
            .ok_or(CheckinError::NotRegistered {
                attendee_id: payload.attendee_id,
                conference_id,
            })?;

        let permission = self.policy.permission_for(action);
        if !has_conference_permission(grants, actor, conference_id, permission) {
            return Err(CheckinError::PermissionDenied {
                user_id: actor,
                conference_id,
                permission: permission.to_string(),
            });
        }

        check_transition(current_status, action)?;

        Ok(CheckinDecision {
            attendee_id: payload.attendee_id,
            conference_id,
            registration_id,
            current_status,
            action,
            checksum: verify_checksum(&payload),
        })
    }
}

fn rejection_code(err: &CheckinError) -> &'static str {
    match err {
        CheckinError::Decode(DecodeError::MalformedJson(_)) => "malformed_json",
        CheckinError::Decode(DecodeError::MissingAttendeeId) => "missing_attendee_id",
        CheckinError::ForeignPayload(_) => "foreign_payload",
        CheckinError::ChecksumMismatch => "checksum_mismatch",
        CheckinError::MissingConference => "missing_conference",
        CheckinError::NotRegistered { .. } => "not_registered",
        CheckinError::PermissionDenied { .. } => "permission_denied",
        CheckinError::InvalidTransition(_) => "invalid_transition",
    }
}
