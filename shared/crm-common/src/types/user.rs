//! User Types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role identifier granted to workspace administrators.
pub const ADMIN_ROLE: &str = "admin";

/// User profile (public information).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub email: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Resolved role, if the user has one.
    pub role: Option<String>,
}

impl UserProfile {
    /// Whether this profile carries the given role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }

    /// Whether this profile carries [`ADMIN_ROLE`].
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: Option<&str>) -> UserProfile {
        UserProfile {
            id: Uuid::now_v7(),
            display_name: "Ada Lovelace".to_string(),
            email: Some("ada@example.com".to_string()),
            avatar_url: None,
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_admin_role_detected() {
        assert!(profile(Some("admin")).is_admin());
        assert!(!profile(Some("member")).is_admin());
        assert!(!profile(None).is_admin());
    }

    #[test]
    fn test_role_comparison_is_exact() {
        assert!(!profile(Some("Admin")).is_admin());
        assert!(profile(Some("sales")).has_role("sales"));
    }
}
