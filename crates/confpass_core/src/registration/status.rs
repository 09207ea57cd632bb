//! Latest-row selection and status resolution.

use crate::model::attendee::{AttendeeId, ConferenceId};
use crate::model::registration::{DerivedStatus, RecordedStatus, RegistrationEvent};
use std::collections::BTreeMap;

/// Returns the latest row, optionally restricted to one conference.
///
/// Rows are ordered by `RegistrationEvent::recency_key`; rows with no
/// timestamp at all sort below any dated row. On equal keys the row that
/// appears later in `events` wins.
pub fn latest_event(
    events: &[RegistrationEvent],
    conference_id: Option<ConferenceId>,
) -> Option<&RegistrationEvent> {
    latest_of(
        events
            .iter()
            .filter(|event| conference_id.map_or(true, |id| event.conference_id == id)),
    )
}

/// Latest row of one attendee on one conference, same ordering as
/// `latest_event`.
pub fn latest_attendee_event(
    events: &[RegistrationEvent],
    attendee_id: AttendeeId,
    conference_id: ConferenceId,
) -> Option<&RegistrationEvent> {
    latest_of(events.iter().filter(|event| {
        event.attendee_id == attendee_id && event.conference_id == conference_id
    }))
}

fn latest_of<'a>(
    events: impl Iterator<Item = &'a RegistrationEvent>,
) -> Option<&'a RegistrationEvent> {
    events.max_by_key(|event| event.recency_key())
}

/// Derives the display status of a row.
///
/// `None` in means "not registered" and yields `None`.
pub fn resolve_status(event: Option<&RegistrationEvent>) -> Option<DerivedStatus> {
    let event = event?;
    let status = match event.status {
        Some(RecordedStatus::Cancelled) => DerivedStatus::Cancelled,
        Some(RecordedStatus::NoShow) => DerivedStatus::NoShow,
        _ if event.checkout_time.is_some() => DerivedStatus::CheckedOut,
        _ if event.checkin_time.is_some() => DerivedStatus::CheckedIn,
        _ => DerivedStatus::Registered,
    };
    Some(status)
}

/// Per-status counters over the latest row of each (attendee, conference).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusTally {
    pub registered: usize,
    pub checked_in: usize,
    pub checked_out: usize,
    pub cancelled: usize,
    pub no_show: usize,
}

impl StatusTally {
    pub fn count(&self, status: DerivedStatus) -> usize {
        match status {
            DerivedStatus::Registered => self.registered,
            DerivedStatus::CheckedIn => self.checked_in,
            DerivedStatus::CheckedOut => self.checked_out,
            DerivedStatus::Cancelled => self.cancelled,
            DerivedStatus::NoShow => self.no_show,
        }
    }

    pub fn total(&self) -> usize {
        DerivedStatus::ALL
            .into_iter()
            .map(|status| self.count(status))
            .sum()
    }

    fn record(&mut self, status: DerivedStatus) {
        let slot = match status {
            DerivedStatus::Registered => &mut self.registered,
            DerivedStatus::CheckedIn => &mut self.checked_in,
            DerivedStatus::CheckedOut => &mut self.checked_out,
            DerivedStatus::Cancelled => &mut self.cancelled,
            DerivedStatus::NoShow => &mut self.no_show,
        };
        *slot += 1;
    }
}

/// Counts derived statuses, one per (attendee, conference) pair.
///
/// Historical rows of the same pair collapse to the latest one using the same
/// ordering and tie-break as `latest_event`.
pub fn tally_statuses(events: &[RegistrationEvent]) -> StatusTally {
    let mut latest: BTreeMap<(AttendeeId, ConferenceId), &RegistrationEvent> = BTreeMap::new();
    for event in events {
        let key = (event.attendee_id, event.conference_id);
        match latest.get(&key) {
            Some(current) if current.recency_key() > event.recency_key() => {}
            _ => {
                latest.insert(key, event);
            }
        }
    }

    let mut tally = StatusTally::default();
    for event in latest.values() {
        if let Some(status) = resolve_status(Some(event)) {
            tally.record(status);
        }
    }
    tally
}
