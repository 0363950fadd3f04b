//! Lookup results the gate is evaluated against.

use serde::Serialize;

/// Result of an authorization lookup for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PermissionCheck {
    pub allowed: bool,
    pub is_loading: bool,
}

impl PermissionCheck {
    /// Lookup in flight. Not allowed until it resolves.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            allowed: false,
            is_loading: true,
        }
    }

    #[must_use]
    pub const fn resolved(allowed: bool) -> Self {
        Self {
            allowed,
            is_loading: false,
        }
    }

    /// No lookup was needed (no action named).
    #[must_use]
    pub const fn idle() -> Self {
        Self::resolved(false)
    }
}

/// Result of the current user's role lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RoleCheck {
    pub role: Option<String>,
    pub is_loading: bool,
}

impl RoleCheck {
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            role: None,
            is_loading: true,
        }
    }

    #[must_use]
    pub const fn resolved(role: Option<String>) -> Self {
        Self {
            role,
            is_loading: false,
        }
    }

    /// Whether the resolved role equals `role`. Always false while loading.
    #[must_use]
    pub fn is(&self, role: &str) -> bool {
        !self.is_loading && self.role.as_deref() == Some(role)
    }
}

/// Snapshot of both lookups.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GateState {
    pub permission: PermissionCheck,
    pub role: RoleCheck,
}

impl GateState {
    #[must_use]
    pub const fn new(permission: PermissionCheck, role: RoleCheck) -> Self {
        Self { permission, role }
    }

    /// Whether either lookup is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.permission.is_loading || self.role.is_loading
    }
}
