use serde::{Deserialize, Serialize};

use crate::permission::Permission;
use crate::role::Role;

/// An authenticated identity as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub role: Role,

    /// Explicit grants on top of the role's permissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
}

impl User {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            email: None,
            role,
            permissions: None,
        }
    }

    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions = Some(permissions.into_iter().collect());
        self
    }

    /// Explicit grants, empty when none were given.
    pub fn overrides(&self) -> &[Permission] {
        self.permissions.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_shape() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","name":"Amina","email":"amina@farm.test","role":"TECHNICIAN","permissions":["VIEW_FINANCE"]}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Technician);
        assert_eq!(user.overrides(), &[Permission::ViewFinance]);

        let bare: User = serde_json::from_str(r#"{"id":"u2","role":"VIEWER"}"#).unwrap();
        assert!(bare.overrides().is_empty());
        assert_eq!(bare.name, "");
    }
}
