//! Permission-gated rendering.
//!
//! Decision order:
//! 1. Loading placeholder, if enabled and either lookup is pending
//! 2. Elevated role requirement
//! 3. Named action
//! 4. No criteria: content is shown
//!
//! Case 4 is permissive. A gate built with neither an action nor a role
//! requirement guards nothing.

use futures::future;
use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tracing::debug;

use crm_common::ADMIN_ROLE;

use super::error::PermissionError;
use super::models::{GateState, PermissionCheck, RoleCheck};
use super::source::{PermissionSource, RoleSource};

/// Outcome of evaluating a gate against a [`GateState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Loading,
    Allow,
    Deny,
}

/// Fixed-size loading placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Skeleton {
    pub width: u32,
    pub height: u32,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self {
            width: 96,
            height: 32,
        }
    }
}

/// What a gate renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    Placeholder(Skeleton),
    Children(T),
    Fallback(T),
    /// Denied with no fallback supplied.
    Nothing,
}

impl<T> Rendered<T> {
    /// The rendered content, if any.
    pub fn into_content(self) -> Option<T> {
        match self {
            Self::Children(content) | Self::Fallback(content) => Some(content),
            Self::Placeholder(_) | Self::Nothing => None,
        }
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Conditional-rendering wrapper driven by a permission and role lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGate {
    action: Option<String>,
    require_admin: bool,
    show_loading: bool,
    admin_role: String,
    skeleton: Skeleton,
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self {
            action: None,
            require_admin: false,
            show_loading: false,
            admin_role: ADMIN_ROLE.to_string(),
            skeleton: Skeleton::default(),
        }
    }
}

impl PermissionGate {
    /// A gate with no criteria. Renders its children unconditionally until
    /// an action or role requirement is added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate on a named action.
    #[must_use]
    pub fn for_action(action: impl Into<String>) -> Self {
        Self::new().action(action)
    }

    /// Gate on the elevated role.
    #[must_use]
    pub fn admin_only() -> Self {
        Self::new().require_admin(true)
    }

    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Require the elevated role. Takes precedence over the action.
    #[must_use]
    pub const fn require_admin(mut self, require: bool) -> Self {
        self.require_admin = require;
        self
    }

    /// Render a placeholder while lookups are pending instead of evaluating
    /// against unresolved values.
    #[must_use]
    pub const fn show_loading(mut self, show: bool) -> Self {
        self.show_loading = show;
        self
    }

    /// Role identifier compared against when the elevated role is required.
    #[must_use]
    pub fn admin_role(mut self, role: impl Into<String>) -> Self {
        self.admin_role = role.into();
        self
    }

    #[must_use]
    pub const fn skeleton(mut self, skeleton: Skeleton) -> Self {
        self.skeleton = skeleton;
        self
    }

    pub fn action_name(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Whether the gate has neither an action nor a role requirement.
    #[must_use]
    pub const fn is_unrestricted(&self) -> bool {
        self.action.is_none() && !self.require_admin
    }

    /// State before any lookup has resolved.
    #[must_use]
    pub fn pending_state(&self) -> GateState {
        let permission = if self.action.is_some() {
            PermissionCheck::pending()
        } else {
            PermissionCheck::idle()
        };
        GateState::new(permission, RoleCheck::pending())
    }

    /// Evaluate the gate.
    ///
    /// Without `show_loading`, pending lookups are evaluated as unresolved:
    /// no role and not allowed.
    #[must_use]
    pub fn decide(&self, state: &GateState) -> GateDecision {
        if self.show_loading && state.is_loading() {
            return GateDecision::Loading;
        }

        let allowed = if self.require_admin {
            state.role.is(&self.admin_role)
        } else if self.action.is_some() {
            !state.permission.is_loading && state.permission.allowed
        } else {
            debug!("gate has no action or role requirement; rendering children");
            true
        };

        if allowed {
            GateDecision::Allow
        } else {
            GateDecision::Deny
        }
    }

    /// Pick the subtree to render. A denied gate without a fallback renders
    /// nothing.
    pub fn render<T>(&self, state: &GateState, children: T, fallback: Option<T>) -> Rendered<T> {
        match self.decide(state) {
            GateDecision::Loading => Rendered::Placeholder(self.skeleton),
            GateDecision::Allow => Rendered::Children(children),
            GateDecision::Deny => fallback.map_or(Rendered::Nothing, Rendered::Fallback),
        }
    }

    /// Run the lookups and return the settled state.
    ///
    /// The role is always looked up; the permission only when an action is
    /// named. Both run concurrently and the first error is returned.
    #[tracing::instrument(skip(self, permissions, roles), fields(action = ?self.action, require_admin = self.require_admin))]
    pub async fn resolve<P, R>(&self, permissions: &P, roles: &R) -> Result<GateState, PermissionError>
    where
        P: PermissionSource + ?Sized,
        R: RoleSource + ?Sized,
    {
        let permission = async {
            match self.action.as_deref() {
                Some(action) => permissions
                    .check_permission(action)
                    .await
                    .map(PermissionCheck::resolved),
                None => Ok(PermissionCheck::idle()),
            }
        };
        let role = async { roles.current_role().await.map(RoleCheck::resolved) };

        let (permission, role) = futures::try_join!(permission, role)?;
        let state = GateState::new(permission, role);
        debug!(allowed = state.permission.allowed, role = ?state.role.role, "gate lookups resolved");
        Ok(state)
    }

    /// Resolve the lookups and render.
    pub async fn evaluate<T, P, R>(
        &self,
        permissions: &P,
        roles: &R,
        children: T,
        fallback: Option<T>,
    ) -> Result<Rendered<T>, PermissionError>
    where
        P: PermissionSource + ?Sized,
        R: RoleSource + ?Sized,
    {
        let state = self.resolve(permissions, roles).await?;
        Ok(self.render(&state, children, fallback))
    }

    /// Frames rendered over the gate's lifetime: the pending frame first,
    /// then the frame for the settled lookups.
    pub fn render_stream<'a, T, P, R>(
        &'a self,
        permissions: &'a P,
        roles: &'a R,
        children: T,
        fallback: Option<T>,
    ) -> impl Stream<Item = Result<Rendered<T>, PermissionError>> + 'a
    where
        T: Clone + 'a,
        P: PermissionSource + ?Sized + 'a,
        R: RoleSource + ?Sized + 'a,
    {
        let initial = self.render(&self.pending_state(), children.clone(), fallback.clone());
        stream::once(future::ready(Ok(initial))).chain(stream::once(self.evaluate(
            permissions,
            roles,
            children,
            fallback,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(allowed: bool, role: Option<&str>) -> GateState {
        GateState::new(
            PermissionCheck::resolved(allowed),
            RoleCheck::resolved(role.map(str::to_string)),
        )
    }

    #[test]
    fn test_admin_role_renders_children() {
        let gate = PermissionGate::admin_only();
        let state = resolved(false, Some("admin"));

        assert_eq!(gate.render(&state, "panel", Some("denied")), Rendered::Children("panel"));
    }

    #[test]
    fn test_member_role_renders_fallback() {
        let gate = PermissionGate::admin_only();
        let state = resolved(true, Some("member"));

        assert_eq!(gate.render(&state, "panel", Some("denied")), Rendered::Fallback("denied"));
    }

    #[test]
    fn test_admin_requirement_outranks_action() {
        let gate = PermissionGate::for_action("leads.delete").require_admin(true);

        assert_eq!(gate.decide(&resolved(true, Some("member"))), GateDecision::Deny);
        assert_eq!(gate.decide(&resolved(false, Some("admin"))), GateDecision::Allow);
    }

    #[test]
    fn test_action_permission() {
        let gate = PermissionGate::for_action("quotations.approve");

        assert_eq!(gate.decide(&resolved(true, None)), GateDecision::Allow);
        assert_eq!(gate.decide(&resolved(false, Some("admin"))), GateDecision::Deny);
    }

    #[test]
    fn test_no_criteria_renders_children() {
        let gate = PermissionGate::new();

        assert!(gate.is_unrestricted());
        assert_eq!(gate.render(&resolved(false, None), 1, Some(2)), Rendered::Children(1));
    }

    #[test]
    fn test_denied_without_fallback_renders_nothing() {
        let gate = PermissionGate::for_action("settings.edit");

        assert_eq!(gate.render(&resolved(false, None), "form", None), Rendered::Nothing);
    }

    #[test]
    fn test_pending_permission_shows_placeholder() {
        let gate = PermissionGate::for_action("leads.export").show_loading(true);
        let state = GateState::new(PermissionCheck::pending(), RoleCheck::resolved(None));

        let rendered = gate.render(&state, "export", Some("denied"));
        assert_eq!(rendered, Rendered::Placeholder(Skeleton::default()));
    }

    #[test]
    fn test_pending_role_shows_placeholder() {
        let gate = PermissionGate::for_action("leads.export").show_loading(true);
        let state = GateState::new(PermissionCheck::resolved(true), RoleCheck::pending());

        assert_eq!(gate.decide(&state), GateDecision::Loading);
    }

    #[test]
    fn test_pending_without_loading_flag_falls_back() {
        let gate = PermissionGate::for_action("leads.export");

        assert_eq!(gate.decide(&gate.pending_state()), GateDecision::Deny);
        assert_eq!(
            PermissionGate::admin_only().decide(&PermissionGate::admin_only().pending_state()),
            GateDecision::Deny
        );
    }

    #[test]
    fn test_custom_admin_role_and_skeleton() {
        let skeleton = Skeleton {
            width: 200,
            height: 20,
        };
        let gate = PermissionGate::admin_only()
            .admin_role("owner")
            .show_loading(true)
            .skeleton(skeleton);

        assert_eq!(gate.decide(&resolved(false, Some("owner"))), GateDecision::Allow);
        assert_eq!(gate.decide(&resolved(false, Some("admin"))), GateDecision::Deny);
        assert_eq!(
            gate.render(&gate.pending_state(), (), None),
            Rendered::Placeholder(skeleton)
        );
    }

    #[test]
    fn test_pending_state_without_action() {
        let state = PermissionGate::admin_only().pending_state();

        assert!(!state.permission.is_loading);
        assert!(state.role.is_loading);
    }

    #[test]
    fn test_into_content() {
        assert_eq!(Rendered::Children(3).into_content(), Some(3));
        assert_eq!(Rendered::Fallback(4).into_content(), Some(4));
        assert_eq!(Rendered::<i32>::Nothing.into_content(), None);
        assert!(Rendered::<i32>::Placeholder(Skeleton::default()).is_placeholder());
    }
}
