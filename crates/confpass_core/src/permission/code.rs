//! Permission code vocabulary helpers.
//!
//! Codes are free-form `<category>.<action>` strings. Lookups never validate
//! them; these helpers exist for diagnostics and admin tooling.

use once_cell::sync::Lazy;
use regex::Regex;

static PERMISSION_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z][a-z0-9_]*)\.([a-z][a-z0-9_]*)$").expect("valid permission code regex")
});

pub const PERMISSION_ATTENDEES_VIEW: &str = "attendees.view";
pub const PERMISSION_ATTENDEES_MANAGE: &str = "attendees.manage";
pub const PERMISSION_CHECKIN_MANAGE: &str = "checkin.manage";

/// Full permission set granted to administrators on every conference.
pub const ADMIN_PERMISSION_CODES: &[&str] = &[
    "conferences.view",
    "conferences.create",
    "conferences.update",
    "conferences.delete",
    "conferences.manage",
    PERMISSION_ATTENDEES_VIEW,
    PERMISSION_ATTENDEES_MANAGE,
    PERMISSION_CHECKIN_MANAGE,
    "sessions.view",
    "sessions.manage",
    "analytics.view",
    "networking.view",
    "venue.view",
    "badges.view",
    "mobile.view",
];

/// Splits a well-formed code into `(category, action)`.
///
/// Returns `None` for anything outside the lowercase `<category>.<action>`
/// shape; such codes still work for lookups.
pub fn split_permission_code(code: &str) -> Option<(&str, &str)> {
    let captures = PERMISSION_CODE_RE.captures(code)?;
    let category = captures.get(1)?.as_str();
    let action = captures.get(2)?.as_str();
    Some((category, action))
}

pub fn permission_category(code: &str) -> Option<&str> {
    split_permission_code(code).map(|(category, _)| category)
}
