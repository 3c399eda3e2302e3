//! User models.
//!
//! Two distinct user concepts with two distinct role taxonomies: POS staff
//! ([`Employee`], admin/employee) and system users ([`User`],
//! administrator/collaborator/viewer). They are separate resources with
//! separate endpoints; do not conflate the role sets.

use serde::{Deserialize, Serialize};

use super::serde_helpers::default_true;

/// Role of a system (dashboard) user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemRole {
    Administrator,
    Collaborator,
    Viewer,
}

/// A system user of the administration dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: SystemRole,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct UserWire {
    pub id: i64,
    pub username: String,
    pub role: SystemRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        User {
            id: wire.id,
            username: wire.username,
            role: wire.role,
            is_active: wire.is_active,
        }
    }
}

/// Payload for creating a system user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: SystemRole,
}

/// Partial update payload for a system user.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<SystemRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Role of a POS staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Employee,
}

/// A POS staff member.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub username: String,
    pub role: StaffRole,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct EmployeeWire {
    pub id: i64,
    pub username: String,
    pub role: StaffRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<EmployeeWire> for Employee {
    fn from(wire: EmployeeWire) -> Self {
        Employee {
            id: wire.id,
            username: wire.username,
            role: wire.role,
            is_active: wire.is_active,
        }
    }
}

/// Payload for creating a POS staff member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub username: String,
    pub password: String,
    pub role: StaffRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_taxonomies_stay_distinct() {
        assert_eq!(
            serde_json::from_str::<SystemRole>("\"viewer\"").unwrap(),
            SystemRole::Viewer
        );
        assert!(serde_json::from_str::<StaffRole>("\"viewer\"").is_err());
        assert_eq!(
            serde_json::from_str::<StaffRole>("\"employee\"").unwrap(),
            StaffRole::Employee
        );
    }
}
