//! Permission queries over a user's conference grants.

use crate::model::attendee::{ConferenceId, ConferenceRef, UserId};
use crate::model::grant::{ConferencePermissionGrant, PermissionMap};
use crate::permission::code::ADMIN_PERMISSION_CODES;

/// Active conference visible to a user, as listed in conference pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceAccess {
    pub conference_id: ConferenceId,
    pub conference_name: Option<String>,
    pub permissions: PermissionMap,
    pub is_active: bool,
}

impl From<&ConferencePermissionGrant> for ConferenceAccess {
    fn from(grant: &ConferencePermissionGrant) -> Self {
        Self {
            conference_id: grant.conference_id,
            conference_name: grant.conference_name.clone(),
            permissions: grant.permissions.clone(),
            is_active: grant.is_active,
        }
    }
}

fn active_grants(
    grants: &[ConferencePermissionGrant],
    user_id: UserId,
) -> impl Iterator<Item = &ConferencePermissionGrant> {
    grants
        .iter()
        .filter(move |grant| grant.user_id == user_id && grant.is_active)
}

/// True iff an active grant for `(user_id, conference_id)` sets `code` to true.
pub fn has_conference_permission(
    grants: &[ConferencePermissionGrant],
    user_id: UserId,
    conference_id: ConferenceId,
    code: &str,
) -> bool {
    active_grants(grants, user_id)
        .any(|grant| grant.conference_id == conference_id && grant.allows(code))
}

/// True iff any active grant of the user, on any conference, sets `code`.
pub fn has_any_conference_permission(
    grants: &[ConferencePermissionGrant],
    user_id: UserId,
    code: &str,
) -> bool {
    active_grants(grants, user_id).any(|grant| grant.allows(code))
}

/// Single-code "require all" check.
///
/// With a conference in context this is the conference-scoped query; without
/// one it degrades to the cross-conference query.
pub fn has_all_conference_permission(
    grants: &[ConferencePermissionGrant],
    user_id: UserId,
    code: &str,
    conference_id: Option<ConferenceId>,
) -> bool {
    match conference_id {
        Some(conference_id) => has_conference_permission(grants, user_id, conference_id, code),
        None => has_any_conference_permission(grants, user_id, code),
    }
}

/// Every active grant of the user, in input order.
pub fn available_conferences(
    grants: &[ConferencePermissionGrant],
    user_id: UserId,
) -> Vec<ConferenceAccess> {
    active_grants(grants, user_id)
        .map(ConferenceAccess::from)
        .collect()
}

/// Permission map of the user's active grant on one conference, or empty.
pub fn conference_permissions(
    grants: &[ConferencePermissionGrant],
    user_id: UserId,
    conference_id: ConferenceId,
) -> PermissionMap {
    active_grants(grants, user_id)
        .find(|grant| grant.conference_id == conference_id)
        .map(|grant| grant.permissions.clone())
        .unwrap_or_default()
}

pub fn has_conference_access(
    grants: &[ConferencePermissionGrant],
    user_id: UserId,
    conference_id: ConferenceId,
) -> bool {
    active_grants(grants, user_id).any(|grant| grant.conference_id == conference_id)
}

/// Picks the conference a session should start on.
///
/// Order: `preferred` when the user actively holds it, then the first active
/// grant, then the first grant of any state.
pub fn select_current_conference(
    grants: &[ConferencePermissionGrant],
    user_id: UserId,
    preferred: Option<ConferenceId>,
) -> Option<ConferenceId> {
    if let Some(preferred) = preferred {
        if has_conference_access(grants, user_id, preferred) {
            return Some(preferred);
        }
    }
    active_grants(grants, user_id)
        .next()
        .or_else(|| grants.iter().find(|grant| grant.user_id == user_id))
        .map(|grant| grant.conference_id)
}

/// Display name for a conference, with a numbered fallback.
pub fn conference_name(grants: &[ConferencePermissionGrant], conference_id: ConferenceId) -> String {
    grants
        .iter()
        .filter(|grant| grant.conference_id == conference_id)
        .find_map(|grant| grant.conference_name.clone())
        .unwrap_or_else(|| format!("Conference #{conference_id}"))
}

/// Synthesizes full-access grants for an administrator.
///
/// Conferences without an id are skipped.
pub fn admin_grants(user_id: UserId, conferences: &[ConferenceRef]) -> Vec<ConferencePermissionGrant> {
    conferences
        .iter()
        .filter_map(|conference| {
            let conference_id = conference.conference_id?;
            let mut grant = ADMIN_PERMISSION_CODES.iter().fold(
                ConferencePermissionGrant::new(user_id, conference_id),
                |grant, code| grant.with_permission(*code, true),
            );
            grant.conference_name = conference.name.clone();
            Some(grant)
        })
        .collect()
}
