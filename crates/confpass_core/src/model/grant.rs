//! Per-user, per-conference permission grants.

use crate::model::attendee::{ConferenceId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Permission flags keyed by `<category>.<action>` code.
pub type PermissionMap = BTreeMap<String, bool>;

/// One row of the conference permission model.
///
/// A user holds at most one grant per conference. Inactive grants stay in the
/// collection but are invisible to every positive query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferencePermissionGrant {
    pub user_id: UserId,
    pub conference_id: ConferenceId,
    /// Display name, when the backend supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_name: Option<String>,
    #[serde(default)]
    pub permissions: PermissionMap,
    pub is_active: bool,
}

impl ConferencePermissionGrant {
    /// Creates an active grant with no permissions set.
    pub fn new(user_id: UserId, conference_id: ConferenceId) -> Self {
        Self {
            user_id,
            conference_id,
            conference_name: None,
            permissions: PermissionMap::new(),
            is_active: true,
        }
    }

    /// Builder-style helper setting one permission flag.
    pub fn with_permission(mut self, code: impl Into<String>, allowed: bool) -> Self {
        self.permissions.insert(code.into(), allowed);
        self
    }

    /// Builder-style helper toggling the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Returns `true` only when the code is present and set to `true`.
    ///
    /// Ignores `is_active`; callers combine both checks.
    pub fn allows(&self, code: &str) -> bool {
        self.permissions.get(code).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::ConferencePermissionGrant;

    #[test]
    fn absent_permission_code_is_not_allowed() {
        let grant = ConferencePermissionGrant::new(1, 5).with_permission("attendees.view", true);
        assert!(grant.allows("attendees.view"));
        assert!(!grant.allows("attendees.manage"));
    }

    #[test]
    fn explicit_false_is_not_allowed() {
        let grant = ConferencePermissionGrant::new(1, 5).with_permission("checkin.manage", false);
        assert!(!grant.allows("checkin.manage"));
    }
}
