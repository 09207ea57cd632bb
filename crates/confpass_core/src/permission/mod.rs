//! Conference-scoped access control.
//!
//! # Responsibility
//! - Answer permission queries against a caller-supplied grant collection.
//! - Evaluate multi-code requirements for guarded routes and actions.
//!
//! # Invariants
//! - A missing grant or permission key resolves to `false`, never an error.
//! - Inactive grants stay in the input but never satisfy a positive query.
//! - Queries are pure; the grant collection is owned by the caller.

pub mod code;
pub mod guard;
pub mod resolver;

pub use code::{
    permission_category, split_permission_code, ADMIN_PERMISSION_CODES,
    PERMISSION_ATTENDEES_MANAGE, PERMISSION_ATTENDEES_VIEW, PERMISSION_CHECKIN_MANAGE,
};
pub use guard::{evaluate_requirement, GuardDecision, PermissionRequirement};
pub use resolver::{
    admin_grants, available_conferences, conference_name, conference_permissions,
    has_all_conference_permission, has_any_conference_permission, has_conference_access,
    has_conference_permission, select_current_conference, ConferenceAccess,
};
