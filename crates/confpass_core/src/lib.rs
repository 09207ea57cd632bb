//! Core check-in logic for conference hosts.
//!
//! Pure resolvers over data the host has already fetched: the QR codec, the
//! registration status resolver and the conference permission resolver,
//! plus a service that runs a scan through all three.

pub mod adapter;
pub mod config;
pub mod fields;
pub mod logging;
pub mod model;
pub mod permission;
pub mod qr;
pub mod registration;
pub mod service;

pub use adapter::{
    attendee_from_value, conference_from_value, grant_from_value, grants_from_value,
    registration_from_value, registrations_from_value, AdapterError,
};
pub use config::{ConfigError, GatePolicy};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::attendee::{
    AttendeeId, AttendeeRef, ConferenceId, ConferenceRef, ConferenceStatus, RegistrationId,
    UserId,
};
pub use model::grant::{ConferencePermissionGrant, PermissionMap};
pub use model::registration::{DerivedStatus, RecordedStatus, RegistrationEvent};
pub use permission::{
    available_conferences, evaluate_requirement, has_all_conference_permission,
    has_any_conference_permission, has_conference_permission, ConferenceAccess, GuardDecision,
    PermissionRequirement,
};
pub use qr::{decode, encode, ChecksumVerdict, DecodeError, PayloadKind, QrPayload};
pub use registration::{
    check_transition, latest_attendee_event, latest_event, resolve_status, CheckinAction,
    TransitionError,
};
pub use service::checkin_service::{CheckinDecision, CheckinError, CheckinService};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
