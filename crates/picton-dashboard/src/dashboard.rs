use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::{DashboardView, RoleConfig, SidebarItem, SidebarSection, role_config};
use crate::role::Role;
use crate::user::{SessionUser, UserProfile};

/// Dashboard configuration for one authenticated session.
///
/// Built once from the user profile and never mutated afterwards. Sign in
/// again to get a configuration for a different user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardConfig {
    user: SessionUser,
    #[serde(flatten)]
    role: RoleConfig,
    #[serde(skip)]
    grants: BTreeSet<String>,
}

impl DashboardConfig {
    pub fn for_user(profile: &UserProfile) -> Self {
        let user = SessionUser::from(profile);
        tracing::info!(
            username = %user.username,
            role = %user.role,
            "initializing dashboard config"
        );
        let role = role_config(user.role);
        let grants = role.menu_grants();
        Self { user, role, grants }
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Capability flag check; unknown flags are denied.
    pub fn has_permission(&self, flag: &str) -> bool {
        self.role.permissions.flag(flag)
    }

    /// Dotted menu permission check, e.g. `staff.review_forms`.
    pub fn can(&self, permission: &str) -> bool {
        self.grants.contains(permission)
    }

    pub fn sidebar(&self) -> &[SidebarSection] {
        &self.role.sidebar
    }

    /// Items of active sections whose permissions are all granted.
    pub fn visible_items(&self) -> Vec<&SidebarItem> {
        self.role
            .sidebar
            .iter()
            .filter(|section| section.is_active)
            .flat_map(|section| section.items.iter())
            .filter(|item| item.permissions.iter().all(|permission| self.can(permission)))
            .collect()
    }

    pub fn dashboard(&self) -> DashboardView {
        if self.role.dashboard.title.is_empty() {
            DashboardView::default()
        } else {
            self.role.dashboard.clone()
        }
    }

    /// Visible sidebar item for a view id.
    pub fn resolve_view(&self, id: &str) -> Option<&SidebarItem> {
        self.visible_items().into_iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: &str) -> UserProfile {
        UserProfile {
            username: "tester".into(),
            role: Some(role.into()),
            ..UserProfile::default()
        }
    }

    #[test]
    fn admin_flags() {
        let config = DashboardConfig::for_user(&profile("admin"));
        assert!(config.has_permission("canManageFormSchemas"));
        assert!(!config.has_permission("canUpdateSignature"));
        assert!(config.can("admin.manage_users"));
        assert_eq!(config.dashboard().title, "Admin Dashboard");
    }

    #[test]
    fn unknown_role_gets_student_config() {
        let config = DashboardConfig::for_user(&profile("dean"));
        assert_eq!(config.role(), Role::Student);
        assert!(config.can("student.submit_forms"));
        assert!(!config.can("staff.review_forms"));
        assert!(!config.has_permission("canEditUsers"));
    }

    #[test]
    fn resolves_only_visible_views() {
        let config = DashboardConfig::for_user(&profile("staff"));
        assert_eq!(
            config.resolve_view("manage-delegations").map(|item| item.title.as_str()),
            Some("Manage Delegations")
        );
        assert!(config.resolve_view("manage-users").is_none());
    }
}
