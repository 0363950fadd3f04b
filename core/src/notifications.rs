//! Notification inserts.
//!
//! Views create in-app notifications for a user (a lead was assigned, a
//! quotation was accepted, ...) through [`create_notification`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Info, Self::Success, Self::Warning, Self::Error]
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = crm_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| crm_common::Error::UnknownStatus {
                kind: "notification",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for NotificationKind {
    type Error = crm_common::Error;

    fn try_from(value: String) -> Result<Self, crm_common::Error> {
        value.parse()
    }
}

/// Stored notification.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub kind: NotificationKind,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification to insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewNotification {
    /// Recipient.
    pub user_id: Uuid,
    /// Short headline (1-200 characters).
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Body text (up to 2000 characters).
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub message: String,
    #[serde(default)]
    pub kind: NotificationKind,
    /// In-app path (`/leads/42`) or absolute URL the notification opens.
    #[validate(length(max = 2048))]
    pub link: Option<String>,
}

impl NewNotification {
    pub fn new(user_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            message: String::new(),
            kind: NotificationKind::default(),
            link: None,
        }
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Validate field lengths, a non-blank title and the link shape.
    pub fn check(&self) -> Result<(), NotificationError> {
        self.validate()
            .map_err(|e| NotificationError::Validation(e.to_string()))?;

        if self.title.trim().is_empty() {
            return Err(NotificationError::Validation(
                "title must not be blank".to_string(),
            ));
        }

        if let Some(link) = &self.link {
            if !is_valid_link(link) {
                return Err(NotificationError::Validation(format!(
                    "link must be an absolute path or http(s) URL: {link}"
                )));
            }
        }

        Ok(())
    }
}

fn is_valid_link(link: &str) -> bool {
    if link.starts_with('/') {
        return !link.starts_with("//");
    }
    url::Url::parse(link).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Notification insert errors.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Insert a notification and return the stored row.
#[tracing::instrument(skip(pool, new), fields(user_id = %new.user_id, kind = %new.kind))]
pub async fn create_notification(
    pool: &PgPool,
    new: &NewNotification,
) -> Result<Notification, NotificationError> {
    new.check()?;

    let notification = sqlx::query_as::<_, Notification>(
        r"
        INSERT INTO notifications (id, user_id, title, message, kind, link)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, title, message, kind, link, is_read, created_at
        ",
    )
    .bind(Uuid::now_v7())
    .bind(new.user_id)
    .bind(new.title.trim())
    .bind(&new.message)
    .bind(new.kind.as_str())
    .bind(new.link.as_deref())
    .fetch_one(pool)
    .await?;

    info!(notification_id = %notification.id, "notification created");
    Ok(notification)
}
