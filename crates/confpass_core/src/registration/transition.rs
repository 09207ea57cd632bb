//! Which check-in actions a derived status admits.

use crate::model::registration::DerivedStatus;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Operation a staff member performs on a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinAction {
    /// Entry scan.
    CheckIn,
    /// Exit scan.
    CheckOut,
    /// Editing attendee or registration details.
    Edit,
}

impl CheckinAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckIn => "check_in",
            Self::CheckOut => "check_out",
            Self::Edit => "edit",
        }
    }
}

/// Why an action does not fit the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// Check-in scanned for someone already inside.
    AlreadyCheckedIn,
    /// Check-out scanned for someone not inside.
    NotCheckedIn(DerivedStatus),
    /// Registration is cancelled or marked no-show.
    Closed(DerivedStatus),
}

impl Display for TransitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyCheckedIn => write!(f, "attendee is already checked in"),
            Self::NotCheckedIn(status) => {
                write!(f, "attendee is not checked in (status: {status})")
            }
            Self::Closed(status) => write!(f, "registration is closed (status: {status})"),
        }
    }
}

impl Error for TransitionError {}

/// Checks `action` against `status`.
///
/// - check-in: from `registered`, or `checked-out` for re-entry;
/// - check-out: from `checked-in` only;
/// - edit: always.
pub fn check_transition(status: DerivedStatus, action: CheckinAction) -> Result<(), TransitionError> {
    match action {
        CheckinAction::Edit => Ok(()),
        _ if status.is_terminal() => Err(TransitionError::Closed(status)),
        CheckinAction::CheckIn => match status {
            DerivedStatus::CheckedIn => Err(TransitionError::AlreadyCheckedIn),
            _ => Ok(()),
        },
        CheckinAction::CheckOut => match status {
            DerivedStatus::CheckedIn => Ok(()),
            other => Err(TransitionError::NotCheckedIn(other)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{check_transition, CheckinAction, TransitionError};
    use crate::model::registration::DerivedStatus;

    #[test]
    fn check_in_admits_registered_and_re_entry() {
        assert!(check_transition(DerivedStatus::Registered, CheckinAction::CheckIn).is_ok());
        assert!(check_transition(DerivedStatus::CheckedOut, CheckinAction::CheckIn).is_ok());
        assert_eq!(
            check_transition(DerivedStatus::CheckedIn, CheckinAction::CheckIn),
            Err(TransitionError::AlreadyCheckedIn)
        );
    }

    #[test]
    fn check_out_requires_checked_in() {
        assert!(check_transition(DerivedStatus::CheckedIn, CheckinAction::CheckOut).is_ok());
        assert_eq!(
            check_transition(DerivedStatus::Registered, CheckinAction::CheckOut),
            Err(TransitionError::NotCheckedIn(DerivedStatus::Registered))
        );
    }

    #[test]
    fn closed_registrations_admit_only_edits() {
        for status in [DerivedStatus::Cancelled, DerivedStatus::NoShow] {
            assert_eq!(
                check_transition(status, CheckinAction::CheckIn),
                Err(TransitionError::Closed(status))
            );
            assert_eq!(
                check_transition(status, CheckinAction::CheckOut),
                Err(TransitionError::Closed(status))
            );
            assert!(check_transition(status, CheckinAction::Edit).is_ok());
        }
    }
}
