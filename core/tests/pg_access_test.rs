//! Database-backed access and notification tests.
//!
//! These need a `PostgreSQL` database with the CRM access tables
//! (`user_roles`, `role_permissions`, `notifications`).
//!
//! Run ignored (integration) tests: `cargo test --test pg_access_test -- --ignored`

use uuid::Uuid;

use crm_core::notifications::{
    create_notification, NewNotification, NotificationError, NotificationKind,
};
use crm_core::permissions::{
    GateDecision, PermissionGate, PermissionSource, PgAccessSource, RoleSource,
};

/// Helper to create a test database pool.
async fn create_test_pool() -> sqlx::PgPool {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/crm_test".into());

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database")
}

async fn assign_role(pool: &sqlx::PgPool, user_id: Uuid, role: &str) {
    sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await
        .expect("Failed to assign role");
}

async fn grant_action(pool: &sqlx::PgPool, role: &str, action: &str) {
    sqlx::query("INSERT INTO role_permissions (role, action) VALUES ($1, $2)")
        .bind(role)
        .bind(action)
        .execute(pool)
        .await
        .expect("Failed to grant action");
}

async fn cleanup(pool: &sqlx::PgPool, user_id: Uuid, role: &str) {
    let _ = sqlx::query("DELETE FROM notifications WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await;
    let _ = sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await;
    let _ = sqlx::query("DELETE FROM role_permissions WHERE role = $1")
        .bind(role)
        .execute(pool)
        .await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_role_and_permission_lookup() {
    let pool = create_test_pool().await;
    let user_id = Uuid::now_v7();
    let role = format!("test_role_{}", Uuid::now_v7().simple());

    assign_role(&pool, user_id, &role).await;
    grant_action(&pool, &role, "leads.delete").await;

    let source = PgAccessSource::new(pool.clone(), user_id);
    assert_eq!(source.current_role().await.unwrap(), Some(role.clone()));
    assert!(source.check_permission("leads.delete").await.unwrap());
    assert!(!source.check_permission("leads.export").await.unwrap());

    let gate = PermissionGate::for_action("leads.delete");
    let state = gate.resolve(&source, &source).await.unwrap();
    assert_eq!(gate.decide(&state), GateDecision::Allow);

    cleanup(&pool, user_id, &role).await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_user_without_role() {
    let pool = create_test_pool().await;
    let source = PgAccessSource::new(pool, Uuid::now_v7());

    assert_eq!(source.current_role().await.unwrap(), None);
    assert!(!source.check_permission("leads.view").await.unwrap());

    let gate = PermissionGate::admin_only();
    let state = gate.resolve(&source, &source).await.unwrap();
    assert_eq!(gate.decide(&state), GateDecision::Deny);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_create_notification() {
    let pool = create_test_pool().await;
    let user_id = Uuid::now_v7();

    let new = NewNotification::new(user_id, "  Quotation accepted ")
        .message("Q-1042 was accepted by Acme")
        .kind(NotificationKind::Success)
        .link("/quotations/1042");

    let stored = create_notification(&pool, &new).await.unwrap();

    assert_eq!(stored.user_id, user_id);
    assert_eq!(stored.title, "Quotation accepted");
    assert_eq!(stored.kind, NotificationKind::Success);
    assert_eq!(stored.link.as_deref(), Some("/quotations/1042"));
    assert!(!stored.is_read);

    cleanup(&pool, user_id, "").await;
}

#[tokio::test]
async fn test_invalid_notification_never_reaches_database() {
    // Lazy pool: no connection is attempted unless a query runs.
    let pool = sqlx::PgPool::connect_lazy("postgres://localhost/unreachable").unwrap();
    let new = NewNotification::new(Uuid::now_v7(), "");

    let result = create_notification(&pool, &new).await;
    assert!(matches!(result, Err(NotificationError::Validation(_))));
}
