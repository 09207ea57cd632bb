//! Backend record adapter.
//!
//! # Responsibility
//! - Map loosely-cased backend JSON rows into the core model, once, at the
//!   boundary.
//! - Keep every naming fallback in one candidate table per entity.
//!
//! # Invariants
//! - Missing required ids are errors; everything else degrades to `None`.
//! - Unparseable timestamps become `None` and are logged by `fields`.
//! - Log lines carry ids and field names only, never personal data.

use crate::fields::{
    as_flag, resolve_flag, resolve_i64, resolve_positive_i64, resolve_raw, resolve_text,
    resolve_timestamp, Candidates, JsonObject,
};
use crate::model::attendee::{AttendeeRef, ConferenceRef, ConferenceStatus, UserId};
use crate::model::grant::{ConferencePermissionGrant, PermissionMap};
use crate::model::registration::{RecordedStatus, RegistrationEvent};
use crate::permission::code::split_permission_code;
use log::{debug, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod attendee_keys {
    use crate::fields::Candidates;

    pub const ID: Candidates = &["id", "attendeeId", "ID", "ATTENDEE_ID", "attendee_id"];
    pub const NAME: Candidates = &["name", "NAME", "fullName", "FULL_NAME", "n"];
    pub const EMAIL: Candidates = &["email", "EMAIL", "e"];
    pub const PHONE: Candidates = &["phone", "PHONE", "p"];
    pub const COMPANY: Candidates = &["company", "COMPANY", "c"];
    pub const POSITION: Candidates = &["position", "POSITION", "pos"];
    pub const AVATAR_URL: Candidates = &["avatarUrl", "AVATAR_URL", "avatar_url"];
}

mod conference_keys {
    use crate::fields::Candidates;

    pub const ID: Candidates = &["id", "conferenceId", "ID", "CONFERENCE_ID", "conference_id"];
    pub const NAME: Candidates = &["name", "NAME", "title", "TITLE"];
    pub const VENUE: Candidates = &["venue", "VENUE", "location", "LOCATION"];
    pub const START_DATE: Candidates = &["startDate", "START_DATE", "start_date"];
    pub const END_DATE: Candidates = &["endDate", "END_DATE", "end_date"];
    pub const STATUS: Candidates = &["status", "STATUS"];
}

mod registration_keys {
    use crate::fields::Candidates;

    pub const ID: Candidates = &["registrationId", "ID", "id", "registration_id"];
    pub const CONFERENCE_ID: Candidates = &["conferenceId", "CONFERENCE_ID", "conference_id"];
    pub const ATTENDEE_ID: Candidates = &["attendeeId", "ATTENDEE_ID", "attendee_id"];
    pub const STATUS: Candidates = &["status", "STATUS"];
    pub const REGISTRATION_DATE: Candidates = &[
        "registrationDate",
        "REGISTRATION_DATE",
        "registration_date",
        "createdAt",
        "CREATED_AT",
    ];
    pub const CHECKIN_TIME: Candidates = &["checkinTime", "CHECKIN_TIME", "checkin_time"];
    pub const CHECKOUT_TIME: Candidates = &["checkoutTime", "CHECKOUT_TIME", "checkout_time"];
}

mod grant_keys {
    use crate::fields::Candidates;

    pub const USER_ID: Candidates = &["userId", "USER_ID", "user_id"];
    pub const CONFERENCE_ID: Candidates = &["conferenceId", "CONFERENCE_ID", "conference_id"];
    pub const CONFERENCE_NAME: Candidates =
        &["conferenceName", "CONFERENCE_NAME", "conference_name"];
    pub const PERMISSIONS: Candidates = &["permissions", "PERMISSIONS"];
    pub const IS_ACTIVE: Candidates = &["isActive", "IS_ACTIVE", "is_active"];
}

/// Envelope keys that may wrap a list response.
const LIST_ENVELOPE_KEYS: Candidates = &["data", "items", "rows"];

/// Adapter failures for rows that cannot become a model record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The row is not a JSON object.
    NotAnObject,
    /// A required id is missing or unusable.
    MissingField(&'static str),
    /// `permissions` is neither an object nor a JSON-encoded object.
    InvalidPermissions(String),
}

impl Display for AdapterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "record is not a JSON object"),
            Self::MissingField(field) => write!(f, "record is missing required field `{field}`"),
            Self::InvalidPermissions(details) => {
                write!(f, "record permissions are unreadable: {details}")
            }
        }
    }
}

impl Error for AdapterError {}

fn as_object(value: &Value) -> Result<&JsonObject, AdapterError> {
    value.as_object().ok_or(AdapterError::NotAnObject)
}

/// Maps an attendee row (or an embedded QR attendee block).
pub fn attendee_from_value(value: &Value) -> Result<AttendeeRef, AdapterError> {
    let object = as_object(value)?;
    let attendee_id = resolve_positive_i64(object, attendee_keys::ID)
        .ok_or(AdapterError::MissingField("attendee_id"))?;
    Ok(AttendeeRef {
        attendee_id,
        name: resolve_text(object, attendee_keys::NAME),
        email: resolve_text(object, attendee_keys::EMAIL),
        phone: resolve_text(object, attendee_keys::PHONE),
        company: resolve_text(object, attendee_keys::COMPANY),
        position: resolve_text(object, attendee_keys::POSITION),
        avatar_url: resolve_text(object, attendee_keys::AVATAR_URL),
    })
}

/// Maps a conference row. A missing id yields a general conference.
pub fn conference_from_value(value: &Value) -> Result<ConferenceRef, AdapterError> {
    let object = as_object(value)?;
    let status = resolve_text(object, conference_keys::STATUS).and_then(|raw| {
        match raw.parse::<ConferenceStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                debug!(
                    "event=adapter_conference module=adapter status=degraded reason=unrecognized_status"
                );
                None
            }
        }
    });
    Ok(ConferenceRef {
        conference_id: resolve_i64(object, conference_keys::ID),
        name: resolve_text(object, conference_keys::NAME),
        venue: resolve_text(object, conference_keys::VENUE),
        start_date: resolve_text(object, conference_keys::START_DATE),
        end_date: resolve_text(object, conference_keys::END_DATE),
        status,
    })
}

/// Maps a registration row.
///
/// Recorded statuses outside `registered|cancelled|no-show` (e.g. `pending`
/// or a stored `checked-in`) are dropped so timestamps decide.
pub fn registration_from_value(value: &Value) -> Result<RegistrationEvent, AdapterError> {
    let object = as_object(value)?;
    let registration_id = resolve_i64(object, registration_keys::ID)
        .ok_or(AdapterError::MissingField("registration_id"))?;
    let conference_id = resolve_i64(object, registration_keys::CONFERENCE_ID)
        .ok_or(AdapterError::MissingField("conference_id"))?;
    let attendee_id = resolve_positive_i64(object, registration_keys::ATTENDEE_ID)
        .ok_or(AdapterError::MissingField("attendee_id"))?;

    let status = resolve_text(object, registration_keys::STATUS).and_then(|raw| {
        match raw.parse::<RecordedStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                debug!(
                    "event=adapter_registration module=adapter status=degraded registration_id={} reason=unrecognized_status",
                    registration_id
                );
                None
            }
        }
    });

    Ok(RegistrationEvent {
        registration_id,
        conference_id,
        attendee_id,
        status,
        registration_date: resolve_timestamp(
            object,
            registration_keys::REGISTRATION_DATE,
            "registration_date",
        ),
        checkin_time: resolve_timestamp(object, registration_keys::CHECKIN_TIME, "checkin_time"),
        checkout_time: resolve_timestamp(
            object,
            registration_keys::CHECKOUT_TIME,
            "checkout_time",
        ),
    })
}

/// Maps a conference assignment row into a grant.
///
/// `default_user_id` is used when the row does not name its user (the
/// "my assignments" endpoint). `permissions` may be an object or a JSON
/// string; non-boolean flags are skipped. `isActive` accepts booleans and
/// `0`/`1`; absent means inactive.
pub fn grant_from_value(
    value: &Value,
    default_user_id: UserId,
) -> Result<ConferencePermissionGrant, AdapterError> {
    let object = as_object(value)?;
    let conference_id = resolve_i64(object, grant_keys::CONFERENCE_ID)
        .ok_or(AdapterError::MissingField("conference_id"))?;
    let user_id = resolve_i64(object, grant_keys::USER_ID).unwrap_or(default_user_id);

    let permissions = match resolve_raw(object, grant_keys::PERMISSIONS) {
        None => PermissionMap::new(),
        Some(Value::String(encoded)) => {
            let decoded: Value = serde_json::from_str(encoded)
                .map_err(|err| AdapterError::InvalidPermissions(err.to_string()))?;
            permission_map(&decoded, conference_id)?
        }
        Some(other) => permission_map(other, conference_id)?,
    };

    Ok(ConferencePermissionGrant {
        user_id,
        conference_id,
        conference_name: resolve_text(object, grant_keys::CONFERENCE_NAME),
        permissions,
        is_active: resolve_flag(object, grant_keys::IS_ACTIVE).unwrap_or(false),
    })
}

fn permission_map(value: &Value, conference_id: i64) -> Result<PermissionMap, AdapterError> {
    let object = value.as_object().ok_or_else(|| {
        AdapterError::InvalidPermissions("expected an object of flags".to_string())
    })?;
    let mut permissions = PermissionMap::new();
    for (code, flag) in object {
        if split_permission_code(code).is_none() {
            debug!(
                "event=adapter_grant module=adapter status=degraded conference_id={} reason=odd_permission_code code={}",
                conference_id, code
            );
        }
        match as_flag(flag) {
            Some(allowed) => {
                permissions.insert(code.clone(), allowed);
            }
            None => debug!(
                "event=adapter_grant module=adapter status=degraded conference_id={} reason=non_boolean_flag code={}",
                conference_id, code
            ),
        }
    }
    Ok(permissions)
}

fn list_items(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(object) => match resolve_raw(object, LIST_ENVELOPE_KEYS) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    }
}

/// Maps a list response (bare array or `{ "data": [...] }`), skipping rows
/// that cannot be mapped.
pub fn registrations_from_value(value: &Value) -> Vec<RegistrationEvent> {
    collect_rows(list_items(value), "registration", registration_from_value)
}

/// Maps an assignment list response, skipping unusable rows.
pub fn grants_from_value(value: &Value, default_user_id: UserId) -> Vec<ConferencePermissionGrant> {
    collect_rows(list_items(value), "grant", |row| {
        grant_from_value(row, default_user_id)
    })
}

fn collect_rows<T>(
    rows: &[Value],
    entity: &str,
    map: impl Fn(&Value) -> Result<T, AdapterError>,
) -> Vec<T> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match map(row) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    "event=adapter_row_skipped module=adapter status=error entity={} index={} reason={}",
                    entity, index, err
                );
                None
            }
        })
        .collect()
}
