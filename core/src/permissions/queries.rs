//! Database-backed permission and role lookups.
//!
//! Reads the hosted database's access tables:
//! - `user_roles (user_id uuid, role text)`
//! - `role_permissions (role text, action text)`
//!
//! Row-level security on these tables is owned by the backend; queries run
//! with whatever rights the pool's credentials carry.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::error::PermissionError;
use super::source::{PermissionSource, RoleSource};

/// Get the role assigned to a user, if any.
pub async fn get_user_role(pool: &PgPool, user_id: Uuid) -> sqlx::Result<Option<String>> {
    sqlx::query_scalar::<_, String>(
        r"
        SELECT role
        FROM user_roles
        WHERE user_id = $1
        ORDER BY role ASC
        LIMIT 1
        ",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Check if any of a user's roles grants an action.
pub async fn has_permission(pool: &PgPool, user_id: Uuid, action: &str) -> sqlx::Result<bool> {
    let result: (bool,) = sqlx::query_as(
        r"
        SELECT EXISTS(
            SELECT 1
            FROM user_roles ur
            JOIN role_permissions rp ON rp.role = ur.role
            WHERE ur.user_id = $1 AND rp.action = $2
        )
        ",
    )
    .bind(user_id)
    .bind(action)
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}

/// Permission and role source for one user, backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgAccessSource {
    pool: PgPool,
    user_id: Uuid,
}

impl PgAccessSource {
    #[must_use]
    pub const fn new(pool: PgPool, user_id: Uuid) -> Self {
        Self { pool, user_id }
    }

    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }
}

#[async_trait]
impl PermissionSource for PgAccessSource {
    #[tracing::instrument(skip(self), fields(user_id = %self.user_id))]
    async fn check_permission(&self, action: &str) -> Result<bool, PermissionError> {
        let allowed = has_permission(&self.pool, self.user_id, action).await?;
        debug!(allowed, "permission lookup resolved");
        Ok(allowed)
    }
}

#[async_trait]
impl RoleSource for PgAccessSource {
    #[tracing::instrument(skip(self), fields(user_id = %self.user_id))]
    async fn current_role(&self) -> Result<Option<String>, PermissionError> {
        let role = get_user_role(&self.pool, self.user_id).await?;
        debug!(role = ?role, "role lookup resolved");
        Ok(role)
    }
}
