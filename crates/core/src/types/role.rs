//! User roles.

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated identity.
///
/// The backend reports regular accounts as `"normal"`; every role string
/// other than `"admin"` is treated as a regular user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Regular account: may rate, comment and delete its own comments.
    #[default]
    User,
    /// Administrator: full access to the movie console and all comments.
    Admin,
}

impl Role {
    /// Whether this role grants access to the admin console.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_backend_strings() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("normal"), Role::User);
        assert_eq!(Role::from("user"), Role::User);
        assert_eq!(Role::from(""), Role::User);
    }

    #[test]
    fn test_role_serde() {
        let role: Role = serde_json::from_str("\"normal\"").expect("deserialize");
        assert_eq!(role, Role::User);
        assert_eq!(
            serde_json::to_string(&Role::Admin).expect("serialize"),
            "\"admin\""
        );
    }
}
