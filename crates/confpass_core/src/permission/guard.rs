//! Multi-code permission requirements for guarded routes and actions.

use crate::model::attendee::{ConferenceId, UserId};
use crate::model::grant::ConferencePermissionGrant;
use crate::permission::resolver::{
    available_conferences, has_all_conference_permission, has_any_conference_permission,
    has_conference_permission, ConferenceAccess,
};
use log::debug;

/// Permission codes a route or action needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionRequirement {
    pub codes: Vec<String>,
    /// Explicit conference; falls back to the session's current conference.
    pub conference_id: Option<ConferenceId>,
    /// `true`: every code must hold. `false`: one is enough.
    pub require_all: bool,
}

impl PermissionRequirement {
    /// Requirement satisfied by any one of `codes`.
    pub fn any_of<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
            conference_id: None,
            require_all: false,
        }
    }

    /// Requirement satisfied only when all `codes` hold.
    ///
    /// Without a target conference each code is checked across all of the
    /// user's conferences, so the codes may be held on different ones. Pin a
    /// conference with `on_conference` to require them on the same one.
    pub fn all_of<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            require_all: true,
            ..Self::any_of(codes)
        }
    }

    pub fn on_conference(mut self, conference_id: ConferenceId) -> Self {
        self.conference_id = Some(conference_id);
        self
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    Denied {
        /// Codes that did not hold.
        missing: Vec<String>,
        /// Conferences the user can still switch to.
        available: Vec<ConferenceAccess>,
    },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Evaluates `requirement` for `user_id`.
///
/// With a target conference (explicit or current) codes are checked on that
/// conference; without one they are checked across all active grants. A
/// requirement with no codes is always allowed.
pub fn evaluate_requirement(
    grants: &[ConferencePermissionGrant],
    user_id: UserId,
    requirement: &PermissionRequirement,
    current_conference: Option<ConferenceId>,
) -> GuardDecision {
    if requirement.codes.is_empty() {
        return GuardDecision::Allowed;
    }
    let target = requirement.conference_id.or(current_conference);

    let holds = |code: &str| match (requirement.require_all, target) {
        (true, _) => has_all_conference_permission(grants, user_id, code, target),
        (false, Some(conference_id)) => {
            has_conference_permission(grants, user_id, conference_id, code)
        }
        (false, None) => has_any_conference_permission(grants, user_id, code),
    };

    let missing: Vec<String> = requirement
        .codes
        .iter()
        .filter(|code| !holds(code.as_str()))
        .cloned()
        .collect();

    let allowed = if requirement.require_all {
        missing.is_empty()
    } else {
        missing.len() < requirement.codes.len()
    };
    if allowed {
        return GuardDecision::Allowed;
    }

    debug!(
        "event=guard_denied module=permission user_id={} conference_id={:?} missing={}",
        user_id,
        target,
        missing.join(",")
    );
    GuardDecision::Denied {
        missing,
        available: available_conferences(grants, user_id),
    }
}
