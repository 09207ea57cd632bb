use confpass_core::registration::tally_statuses;
use confpass_core::{
    latest_event, registrations_from_value, resolve_status, DerivedStatus, RecordedStatus,
    RegistrationEvent,
};
use serde_json::json;

fn event(registration_id: i64, conference_id: i64) -> RegistrationEvent {
    RegistrationEvent::new(registration_id, conference_id, 7, 1_699_000_000_000)
}

#[test]
fn cancellation_wins_over_timestamps() {
    let mut row = event(1, 3);
    row.status = Some(RecordedStatus::Cancelled);
    row.checkin_time = Some(1_700_000_000_000);
    row.checkout_time = Some(1_700_000_100_000);

    assert_eq!(resolve_status(Some(&row)), Some(DerivedStatus::Cancelled));
}

#[test]
fn timestamps_drive_status_when_not_closed() {
    let mut row = event(1, 3);
    assert_eq!(resolve_status(Some(&row)), Some(DerivedStatus::Registered));

    row.checkin_time = Some(1_700_000_000_000);
    assert_eq!(resolve_status(Some(&row)), Some(DerivedStatus::CheckedIn));

    row.status = None;
    row.checkout_time = Some(1_700_000_100_000);
    assert_eq!(resolve_status(Some(&row)), Some(DerivedStatus::CheckedOut));
}

#[test]
fn no_event_means_not_registered() {
    assert_eq!(resolve_status(None), None);
    assert!(latest_event(&[], Some(3)).is_none());
}

#[test]
fn equal_recency_keeps_the_later_row() {
    let mut first = event(1, 3);
    first.checkout_time = Some(1_700_000_100_000);
    let mut second = event(2, 3);
    second.checkout_time = Some(1_700_000_100_000);

    let rows = [first, second];
    assert_eq!(latest_event(&rows, Some(3)).unwrap().registration_id, 2);
}

#[test]
fn conference_filter_limits_candidates() {
    let mut newer_elsewhere = event(1, 4);
    newer_elsewhere.checkin_time = Some(1_800_000_000_000);
    let rows = [event(2, 3), newer_elsewhere];

    assert_eq!(latest_event(&rows, Some(3)).unwrap().registration_id, 2);
    assert_eq!(latest_event(&rows, None).unwrap().registration_id, 1);
    assert!(latest_event(&rows, Some(99)).is_none());
}

#[test]
fn backend_rows_resolve_through_adapter() {
    let response = json!({
        "data": [
            { "ID": 10, "CONFERENCE_ID": 3, "ATTENDEE_ID": 7, "STATUS": "registered",
              "REGISTRATION_DATE": "2023-11-01 09:00:00" },
            { "registrationId": 11, "conferenceId": 3, "attendeeId": 7,
              "status": "pending", "checkinTime": "2023-11-14T22:13:20Z" },
            { "registrationId": 12, "conferenceId": 3 }
        ]
    });

    let rows = registrations_from_value(&response);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].status, None);

    let latest = latest_event(&rows, Some(3)).unwrap();
    assert_eq!(latest.registration_id, 11);
    assert_eq!(resolve_status(Some(latest)), Some(DerivedStatus::CheckedIn));
}

#[test]
fn tally_counts_latest_row_per_attendee() {
    let mut checked_in = event(1, 3);
    checked_in.checkin_time = Some(1_700_000_000_000);
    let mut other = RegistrationEvent::new(2, 3, 8, 1_699_000_000_000);
    other.status = Some(RecordedStatus::NoShow);
    let older = event(3, 3);

    let tally = tally_statuses(&[older, checked_in, other]);
    assert_eq!(tally.checked_in, 1);
    assert_eq!(tally.no_show, 1);
    assert_eq!(tally.registered, 0);
    assert_eq!(tally.total(), 2);
}
