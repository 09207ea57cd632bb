//! Host-supplied gate policy for check-in actions.
//!
//! # Responsibility
//! - Map each `CheckinAction` to the permission code that gates it.
//! - Carry the strictness switches applied to scanned payloads.
//!
//! # Invariants
//! - Every gate code is non-blank after loading.
//! - Unknown keys in host JSON are rejected rather than ignored.

use crate::permission::code::{PERMISSION_ATTENDEES_MANAGE, PERMISSION_CHECKIN_MANAGE};
use crate::registration::transition::CheckinAction;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Gate policy consulted by `CheckinService`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatePolicy {
    pub checkin_permission: String,
    pub checkout_permission: String,
    pub edit_permission: String,
    /// Reject payloads whose `type` tag is present and not
    /// `attendee_registration`. Untagged payloads always pass.
    pub require_attendee_type: bool,
    /// Reject payloads whose checksum is present and wrong. Payloads without
    /// a checksum always pass.
    pub verify_checksum: bool,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            checkin_permission: PERMISSION_CHECKIN_MANAGE.to_string(),
            checkout_permission: PERMISSION_CHECKIN_MANAGE.to_string(),
            edit_permission: PERMISSION_ATTENDEES_MANAGE.to_string(),
            require_attendee_type: true,
            verify_checksum: false,
        }
    }
}

impl GatePolicy {
    /// Parses and validates a JSON policy. Missing keys take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let policy: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, code) in [
            ("checkin_permission", &self.checkin_permission),
            ("checkout_permission", &self.checkout_permission),
            ("edit_permission", &self.edit_permission),
        ] {
            if code.trim().is_empty() {
                return Err(ConfigError::EmptyPermission(name));
            }
        }
        Ok(())
    }

    /// Permission code gating `action`.
    pub fn permission_for(&self, action: CheckinAction) -> &str {
        match action {
            CheckinAction::CheckIn => &self.checkin_permission,
            CheckinAction::CheckOut => &self.checkout_permission,
            CheckinAction::Edit => &self.edit_permission,
        }
    }
}

/// Policy loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    EmptyPermission(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(details) => write!(f, "gate policy is not valid JSON: {details}"),
            Self::EmptyPermission(name) => write!(f, "gate policy `{name}` must not be empty"),
        }
    }
}

impl Error for ConfigError {}
