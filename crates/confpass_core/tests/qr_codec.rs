use confpass_core::qr::{compute_checksum, verify_checksum, RegistrationSnapshot};
use confpass_core::{
    decode, encode, AttendeeRef, ChecksumVerdict, ConferenceRef, ConferenceStatus, DecodeError,
    PayloadKind, QrPayload,
};

#[test]
fn minimal_payload_round_trips() {
    let payload = QrPayload::new(42, Some(9), 1_700_000_000_000)
        .unwrap()
        .with_registration_id(501)
        .with_checksum();

    let decoded = decode(&encode(&payload)).unwrap();
    assert_eq!(decoded, payload);
    assert_eq!(verify_checksum(&decoded), ChecksumVerdict::Valid);
}

#[test]
fn general_payload_round_trips_with_embedded_blocks() {
    let mut attendee = AttendeeRef::new(42);
    attendee.name = Some("Ada Lovelace".to_string());
    attendee.company = Some("Analytical Engines".to_string());
    let mut conference = ConferenceRef::new(None);
    conference.name = Some("Open Day".to_string());
    conference.status = Some(ConferenceStatus::Upcoming);

    let payload = QrPayload::new(42, None, 1_700_000_000_000)
        .unwrap()
        .with_attendee(attendee)
        .with_conference(conference)
        .with_registration(RegistrationSnapshot {
            registration_id: Some(501),
            status: Some("registered".to_string()),
            registration_date: Some(1_699_000_000_000),
            checkin_time: None,
            checkout_time: None,
        });

    let decoded = decode(&encode(&payload)).unwrap();
    assert_eq!(decoded, payload);
    assert!(decoded.conference().unwrap().is_general());
}

#[test]
fn empty_checksum_round_trips_as_absent() {
    let payload = QrPayload::new(7, Some(3), 1_700_000_000_000)
        .unwrap()
        .with_checksum_text("");
    let decoded = decode(&encode(&payload)).unwrap();
    assert_eq!(decoded, payload);
    assert_eq!(verify_checksum(&decoded), ChecksumVerdict::Absent);
}

#[test]
fn padded_version_round_trips() {
    let payload = QrPayload::new(7, Some(3), 1_700_000_000_000)
        .unwrap()
        .with_version(" 2.0 ");
    let decoded = decode(&encode(&payload)).unwrap();
    assert_eq!(decoded, payload);
    assert_eq!(decoded.version(), "2.0");
}

#[test]
fn blank_display_name_round_trips() {
    let mut attendee = AttendeeRef::new(7);
    attendee.name = Some("   ".to_string());
    attendee.position = Some(" Speaker ".to_string());
    let payload = QrPayload::new(7, Some(3), 1_700_000_000_000)
        .unwrap()
        .with_attendee(attendee);

    let decoded = decode(&encode(&payload)).unwrap();
    assert_eq!(decoded, payload);
    let attendee = decoded.attendee().unwrap();
    assert_eq!(attendee.name, None);
    assert_eq!(attendee.position.as_deref(), Some("Speaker"));
}

#[test]
fn short_form_decodes_with_default_version() {
    let payload = decode(r#"{"id":1,"conf":2,"t":1700000000000}"#).unwrap();
    assert_eq!(payload.attendee_id, 1);
    assert_eq!(payload.conference_id, Some(2));
    assert_eq!(payload.timestamp, 1_700_000_000_000);
    assert_eq!(payload.version(), "1.0");
    assert_eq!(payload.kind(), &PayloadKind::Unspecified);
}

#[test]
fn short_form_checksum_and_type_are_read() {
    let checksum = compute_checksum(1, Some(2), 3);
    let raw = format!(r#"{{"id":1,"conf":2,"t":3,"tp":"attendee_registration","cs":"{checksum}","v":"2.0"}}"#);
    let payload = decode(&raw).unwrap();
    assert_eq!(payload.kind(), &PayloadKind::AttendeeRegistration);
    assert_eq!(payload.version(), "2.0");
    assert_eq!(verify_checksum(&payload), ChecksumVerdict::Valid);
}

#[test]
fn missing_or_unusable_attendee_id_fails() {
    assert_eq!(
        decode(r#"{"conf":2,"t":123}"#).unwrap_err(),
        DecodeError::MissingAttendeeId
    );
    assert_eq!(
        decode(r#"{"attendeeId":0,"timestamp":123}"#).unwrap_err(),
        DecodeError::MissingAttendeeId
    );
    assert_eq!(
        decode(r#"{"attendeeId":"abc","timestamp":123}"#).unwrap_err(),
        DecodeError::MissingAttendeeId
    );
}

#[test]
fn non_object_input_is_malformed() {
    for raw in ["", "[1,2]", "\"7\"", "{attendeeId:7}"] {
        assert!(
            matches!(decode(raw), Err(DecodeError::MalformedJson(_))),
            "`{raw}` should be rejected as malformed"
        );
    }
}

#[test]
fn string_ids_and_missing_timestamp_are_tolerated() {
    let payload = decode(r#"{"attendeeId":"7","conferenceId":"3"}"#).unwrap();
    assert_eq!(payload.attendee_id, 7);
    assert_eq!(payload.conference_id, Some(3));
    assert_eq!(payload.timestamp, 0);
    assert!(!payload.has_valid_timestamp());
}

#[test]
fn tampered_payload_fails_checksum() {
    let payload = QrPayload::new(7, Some(3), 1_700_000_000_000)
        .unwrap()
        .with_checksum();
    let tampered = encode(&payload).replace("\"attendeeId\":7", "\"attendeeId\":8");

    let decoded = decode(&tampered).unwrap();
    assert_eq!(decoded.attendee_id, 8);
    assert_eq!(verify_checksum(&decoded), ChecksumVerdict::Mismatch);
}
