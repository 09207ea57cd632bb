//! Long-form / short-form QR payload codec.
//!
//! Both key schemes share one resolution table per field: the long key is
//! tried first, the short key second.
//!
//! | field            | long             | short |
//! |------------------|------------------|-------|
//! | attendee id      | `attendeeId`     | `id`  |
//! | conference id    | `conferenceId`   | `conf`|
//! | registration id  | `registrationId` | `reg` |
//! | timestamp        | `timestamp`      | `t`   |
//! | type tag         | `type`           | `tp`  |
//! | checksum         | `checksum`       | `cs`  |
//! | version          | `version`        | `v`   |

use crate::adapter::{attendee_from_value, conference_from_value};
use crate::fields::{
    resolve_i64, resolve_positive_i64, resolve_raw, resolve_text, resolve_timestamp, Candidates,
    JsonObject,
};
use crate::model::attendee::{AttendeeRef, ConferenceRef};
use crate::qr::payload::{
    DecodeError, PayloadKind, QrPayload, RegistrationSnapshot, DEFAULT_PAYLOAD_VERSION,
};
use log::debug;
use serde_json::Value;

const ATTENDEE_ID_KEYS: Candidates = &["attendeeId", "id"];
const CONFERENCE_ID_KEYS: Candidates = &["conferenceId", "conf"];
const REGISTRATION_ID_KEYS: Candidates = &["registrationId", "reg"];
const TIMESTAMP_KEYS: Candidates = &["timestamp", "t"];
const TYPE_KEYS: Candidates = &["type", "tp"];
const CHECKSUM_KEYS: Candidates = &["checksum", "cs"];
const VERSION_KEYS: Candidates = &["version", "v"];

const ATTENDEE_BLOCK_KEYS: Candidates = &["attendee"];
const CONFERENCE_BLOCK_KEYS: Candidates = &["conference"];
const REGISTRATION_BLOCK_KEYS: Candidates = &["registration"];

const SNAPSHOT_ID_KEYS: Candidates = &["id", "registrationId"];
const SNAPSHOT_STATUS_KEYS: Candidates = &["status"];
const SNAPSHOT_REGISTERED_KEYS: Candidates = &["registrationDate"];
const SNAPSHOT_CHECKIN_KEYS: Candidates = &["checkinTime"];
const SNAPSHOT_CHECKOUT_KEYS: Candidates = &["checkoutTime"];

/// Encodes a payload as long-form JSON.
///
/// Key order is fixed: identity, timestamp, type, checksum, version, then the
/// optional display blocks. `conferenceId` is written as `null` when absent;
/// other optional keys, and `type` for untagged payloads, are omitted.
pub fn encode(payload: &QrPayload) -> String {
    let mut object = JsonObject::new();
    object.insert("attendeeId".to_string(), Value::from(payload.attendee_id));
    object.insert(
        "conferenceId".to_string(),
        payload.conference_id.map_or(Value::Null, Value::from),
    );
    if let Some(registration_id) = payload.registration_id {
        object.insert("registrationId".to_string(), Value::from(registration_id));
    }
    object.insert("timestamp".to_string(), Value::from(payload.timestamp));
    if let Some(tag) = payload.kind.tag() {
        object.insert("type".to_string(), Value::from(tag));
    }
    if let Some(checksum) = payload.checksum() {
        object.insert("checksum".to_string(), Value::from(checksum));
    }
    object.insert("version".to_string(), Value::from(payload.version()));

    if let Some(attendee) = &payload.attendee {
        object.insert("attendee".to_string(), attendee_block(attendee));
    }
    if let Some(conference) = &payload.conference {
        object.insert("conference".to_string(), conference_block(conference));
    }
    if let Some(registration) = &payload.registration {
        object.insert("registration".to_string(), registration_block(registration));
    }

    Value::Object(object).to_string()
}

/// Decodes a scanned QR string in either key scheme.
///
/// # Errors
/// - `DecodeError::MalformedJson` when `raw` is not a JSON object.
/// - `DecodeError::MissingAttendeeId` when no positive attendee id resolves.
pub fn decode(raw: &str) -> Result<QrPayload, DecodeError> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|err| DecodeError::MalformedJson(err.to_string()))?;
    let Value::Object(object) = value else {
        return Err(DecodeError::MalformedJson(
            "expected a JSON object".to_string(),
        ));
    };

    let attendee_id =
        resolve_positive_i64(&object, ATTENDEE_ID_KEYS).ok_or(DecodeError::MissingAttendeeId)?;

    let timestamp = resolve_timestamp(&object, TIMESTAMP_KEYS, "timestamp").unwrap_or_else(|| {
        debug!("event=qr_decode module=qr status=degraded reason=missing_timestamp");
        0
    });

    Ok(QrPayload {
        attendee_id,
        conference_id: resolve_i64(&object, CONFERENCE_ID_KEYS),
        registration_id: resolve_i64(&object, REGISTRATION_ID_KEYS),
        timestamp,
        kind: PayloadKind::from_tag(resolve_text(&object, TYPE_KEYS)),
        checksum: resolve_text(&object, CHECKSUM_KEYS),
        version: resolve_text(&object, VERSION_KEYS)
            .unwrap_or_else(|| DEFAULT_PAYLOAD_VERSION.to_string()),
        attendee: decode_block(&object, ATTENDEE_BLOCK_KEYS, "attendee", |value| {
            attendee_from_value(value).ok()
        }),
        conference: decode_block(&object, CONFERENCE_BLOCK_KEYS, "conference", |value| {
            conference_from_value(value).ok()
        }),
        registration: decode_block(
            &object,
            REGISTRATION_BLOCK_KEYS,
            "registration",
            registration_snapshot,
        ),
    })
}

fn decode_block<T>(
    object: &JsonObject,
    candidates: &[&str],
    block: &str,
    parse: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = resolve_raw(object, candidates)?;
    let parsed = parse(value);
    if parsed.is_none() {
        debug!(
            "event=qr_decode module=qr status=degraded reason=unreadable_block block={}",
            block
        );
    }
    parsed
}

fn registration_snapshot(value: &Value) -> Option<RegistrationSnapshot> {
    let object = value.as_object()?;
    Some(RegistrationSnapshot {
        registration_id: resolve_i64(object, SNAPSHOT_ID_KEYS),
        status: resolve_text(object, SNAPSHOT_STATUS_KEYS),
        registration_date: resolve_timestamp(
            object,
            SNAPSHOT_REGISTERED_KEYS,
            "registration.registration_date",
        ),
        checkin_time: resolve_timestamp(object, SNAPSHOT_CHECKIN_KEYS, "registration.checkin_time"),
        checkout_time: resolve_timestamp(
            object,
            SNAPSHOT_CHECKOUT_KEYS,
            "registration.checkout_time",
        ),
    })
}

fn insert_text(object: &mut JsonObject, key: &str, value: &Option<String>) {
    if let Some(text) = value {
        object.insert(key.to_string(), Value::from(text.as_str()));
    }
}

fn insert_number(object: &mut JsonObject, key: &str, value: Option<i64>) {
    if let Some(number) = value {
        object.insert(key.to_string(), Value::from(number));
    }
}

fn attendee_block(attendee: &AttendeeRef) -> Value {
    let mut object = JsonObject::new();
    object.insert("id".to_string(), Value::from(attendee.attendee_id));
    insert_text(&mut object, "name", &attendee.name);
    insert_text(&mut object, "email", &attendee.email);
    insert_text(&mut object, "phone", &attendee.phone);
    insert_text(&mut object, "company", &attendee.company);
    insert_text(&mut object, "position", &attendee.position);
    insert_text(&mut object, "avatarUrl", &attendee.avatar_url);
    Value::Object(object)
}

fn conference_block(conference: &ConferenceRef) -> Value {
    let mut object = JsonObject::new();
    object.insert(
        "id".to_string(),
        conference.conference_id.map_or(Value::Null, Value::from),
    );
    insert_text(&mut object, "name", &conference.name);
    insert_text(&mut object, "venue", &conference.venue);
    insert_text(&mut object, "startDate", &conference.start_date);
    insert_text(&mut object, "endDate", &conference.end_date);
    if let Some(status) = conference.status {
        object.insert("status".to_string(), Value::from(status.as_str()));
    }
    Value::Object(object)
}

fn registration_block(registration: &RegistrationSnapshot) -> Value {
    let mut object = JsonObject::new();
    insert_number(&mut object, "id", registration.registration_id);
    insert_text(&mut object, "status", &registration.status);
    insert_number(&mut object, "registrationDate", registration.registration_date);
    insert_number(&mut object, "checkinTime", registration.checkin_time);
    insert_number(&mut object, "checkoutTime", registration.checkout_time);
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::model::attendee::{AttendeeRef, ConferenceRef, ConferenceStatus};
    use crate::qr::payload::{DecodeError, PayloadKind, QrPayload, RegistrationSnapshot};
    use serde_json::Value;

    #[test]
    fn encode_writes_long_form_in_stable_order() {
        let payload = QrPayload::new(7, Some(3), 1_700_000_000_000).unwrap();
        assert_eq!(
            encode(&payload),
            r#"{"attendeeId":7,"conferenceId":3,"timestamp":1700000000000,"type":"attendee_registration","version":"1.0"}"#
        );
    }

    #[test]
    fn encode_writes_null_conference_for_general_codes() {
        let payload = QrPayload::new(7, None, 5).unwrap();
        let json: Value = serde_json::from_str(&encode(&payload)).unwrap();
        assert!(json["conferenceId"].is_null());
        assert!(json.get("checksum").is_none());
    }

    #[test]
    fn decode_rejects_non_json_and_non_objects() {
        assert!(matches!(
            decode("ATT-7-CONF-3"),
            Err(DecodeError::MalformedJson(_))
        ));
        assert!(matches!(decode("[1,2]"), Err(DecodeError::MalformedJson(_))));
        assert!(matches!(decode(""), Err(DecodeError::MalformedJson(_))));
    }

    #[test]
    fn decode_falls_back_to_short_id_when_long_id_is_unusable() {
        let payload = decode(r#"{"attendeeId":null,"id":"9","t":"12"}"#).unwrap();
        assert_eq!(payload.attendee_id, 9);
        assert_eq!(payload.timestamp, 12);
    }

    #[test]
    fn decode_rejects_non_positive_attendee_ids() {
        assert_eq!(
            decode(r#"{"attendeeId":0,"timestamp":1}"#).unwrap_err(),
            DecodeError::MissingAttendeeId
        );
        assert_eq!(
            decode(r#"{"id":-3,"timestamp":1}"#).unwrap_err(),
            DecodeError::MissingAttendeeId
        );
    }

    #[test]
    fn decode_keeps_foreign_and_missing_type_tags() {
        let foreign = decode(r#"{"attendeeId":1,"type":"session_checkin","timestamp":1}"#)
            .unwrap();
        assert_eq!(
            foreign.kind(),
            &PayloadKind::Other("session_checkin".to_string())
        );
        assert_eq!(foreign.is_attendee_registration(), Some(false));

        let untagged = decode(r#"{"id":1,"t":1}"#).unwrap();
        assert_eq!(untagged.kind(), &PayloadKind::Unspecified);
        assert_eq!(untagged.is_attendee_registration(), None);
    }

    #[test]
    fn decode_tolerates_missing_timestamp() {
        let payload = decode(r#"{"attendeeId":4}"#).unwrap();
        assert_eq!(payload.timestamp, 0);
        assert!(!payload.has_valid_timestamp());
    }

    #[test]
    fn rich_name_card_payload_round_trips() {
        let payload = QrPayload::new(7, Some(3), 1_700_000_000_000)
            .unwrap()
            .with_registration_id(11)
            .with_checksum()
            .with_attendee(AttendeeRef {
                name: Some("Nguyen Lan".to_string()),
                email: Some("lan@example.com".to_string()),
                company: Some("Acme".to_string()),
                ..AttendeeRef::new(7)
            })
            .with_conference(ConferenceRef {
                name: Some("RustConf".to_string()),
                venue: Some("Hall A".to_string()),
                status: Some(ConferenceStatus::Upcoming),
                ..ConferenceRef::new(Some(3))
            })
            .with_registration(RegistrationSnapshot {
                registration_id: Some(11),
                status: Some("registered".to_string()),
                registration_date: Some(1_699_000_000_000),
                checkin_time: None,
                checkout_time: None,
            });

        assert_eq!(decode(&encode(&payload)).unwrap(), payload);
    }

    #[test]
    fn padded_and_blank_text_round_trips() {
        let payload = QrPayload::new(7, Some(3), 1)
            .unwrap()
            .with_checksum_text("")
            .with_version(" 2.0 ")
            .with_attendee(AttendeeRef {
                name: Some("   ".to_string()),
                ..AttendeeRef::new(7)
            });

        let decoded = decode(&encode(&payload)).unwrap();
        assert_eq!(decoded, payload);
        assert_eq!(decoded.checksum(), None);
        assert_eq!(decoded.version(), "2.0");
        assert_eq!(decoded.attendee().unwrap().name, None);
    }

    #[test]
    fn decoded_foreign_and_untagged_codes_re_encode_unchanged() {
        for raw in [
            r#"{"attendeeId":1,"type":"session_checkin","timestamp":1}"#,
            r#"{"id":1,"t":1}"#,
        ] {
            let decoded = decode(raw).unwrap();
            assert_eq!(decode(&encode(&decoded)).unwrap(), decoded);
        }
    }

    #[test]
    fn unreadable_display_block_is_dropped() {
        let payload =
            decode(r#"{"attendeeId":7,"timestamp":1,"attendee":"Lan","conference":{"id":3}}"#)
                .unwrap();
        assert_eq!(payload.attendee(), None);
        assert_eq!(payload.conference(), Some(&ConferenceRef::new(Some(3))));
    }
}
