//! Permission and role sources.

use std::collections::HashSet;

use async_trait::async_trait;

use super::error::PermissionError;

/// Answers whether the current user may perform a named action.
#[async_trait]
pub trait PermissionSource: Send + Sync {
    async fn check_permission(&self, action: &str) -> Result<bool, PermissionError>;
}

/// Resolves the current user's role.
#[async_trait]
pub trait RoleSource: Send + Sync {
    async fn current_role(&self) -> Result<Option<String>, PermissionError>;
}

#[async_trait]
impl<T: PermissionSource + ?Sized> PermissionSource for std::sync::Arc<T> {
    async fn check_permission(&self, action: &str) -> Result<bool, PermissionError> {
        (**self).check_permission(action).await
    }
}

#[async_trait]
impl<T: RoleSource + ?Sized> RoleSource for std::sync::Arc<T> {
    async fn current_role(&self) -> Result<Option<String>, PermissionError> {
        (**self).current_role().await
    }
}

/// Static, in-process permission and role source.
///
/// Used for local configuration and as a deterministic stand-in for the
/// hosted backend in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccessSource {
    role: Option<String>,
    granted: HashSet<String>,
    failure: Option<String>,
}

impl MemoryAccessSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Grant a named action.
    #[must_use]
    pub fn allow(mut self, action: impl Into<String>) -> Self {
        self.granted.insert(action.into());
        self
    }

    /// Make every lookup fail with [`PermissionError::Unavailable`].
    #[must_use]
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    fn check_available(&self) -> Result<(), PermissionError> {
        match &self.failure {
            Some(reason) => Err(PermissionError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PermissionSource for MemoryAccessSource {
    async fn check_permission(&self, action: &str) -> Result<bool, PermissionError> {
        self.check_available()?;
        Ok(self.granted.contains(action))
    }
}

#[async_trait]
impl RoleSource for MemoryAccessSource {
    async fn current_role(&self) -> Result<Option<String>, PermissionError> {
        self.check_available()?;
        Ok(self.role.clone())
    }
}
