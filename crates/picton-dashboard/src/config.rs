use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Sidebar section icon, named after the UI icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    Users,
    FileText,
    Building,
    File,
    UserPlus,
    User,
}

/// A navigable view. Visible only when every listed permission is granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarSection {
    pub title: String,
    pub icon: Icon,
    pub is_active: bool,
    pub items: Vec<SidebarItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    #[serde(default)]
    pub default_view: String,
    pub title: String,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            default_view: String::new(),
            title: "Dashboard".into(),
        }
    }
}

/// Capability flags (`canEditUsers`, ...) plus scoped menu grants such as
/// `student.submit_forms`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(flatten)]
    pub flags: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scoped: BTreeMap<String, BTreeMap<String, bool>>,
}

impl Permissions {
    fn with_flags(flags: &[(&str, bool)]) -> Self {
        Self {
            flags: flags
                .iter()
                .map(|(name, allowed)| (name.to_string(), *allowed))
                .collect(),
            scoped: BTreeMap::new(),
        }
    }

    fn scope(mut self, scope: &str, grants: &[&str]) -> Self {
        self.scoped.insert(
            scope.to_string(),
            grants.iter().map(|grant| (grant.to_string(), true)).collect(),
        );
        self
    }

    /// Unknown flags are denied.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Dotted grants from the scoped tables.
    pub fn scoped_grants(&self) -> impl Iterator<Item = String> + '_ {
        self.scoped.iter().flat_map(|(scope, grants)| {
            grants
                .iter()
                .filter(|(_, allowed)| **allowed)
                .map(move |(grant, _)| format!("{scope}.{grant}"))
        })
    }
}

/// Everything the dashboard shell needs for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
    pub sidebar: Vec<SidebarSection>,
    pub dashboard: DashboardView,
    pub permissions: Permissions,
}

impl RoleConfig {
    /// Menu permissions held by the role: every permission its sidebar
    /// references plus the scoped grants.
    pub fn menu_grants(&self) -> BTreeSet<String> {
        self.sidebar
            .iter()
            .flat_map(|section| section.items.iter())
            .flat_map(|item| item.permissions.iter().cloned())
            .chain(self.permissions.scoped_grants())
            .collect()
    }
}

fn item(id: &str, title: &str, permission: &str) -> SidebarItem {
    SidebarItem {
        id: id.into(),
        title: title.into(),
        permissions: vec![permission.into()],
    }
}

fn section(title: &str, icon: Icon, items: Vec<SidebarItem>) -> SidebarSection {
    SidebarSection {
        title: title.into(),
        icon,
        is_active: true,
        items,
    }
}

fn view(title: &str) -> DashboardView {
    DashboardView {
        default_view: String::new(),
        title: title.into(),
    }
}

pub fn role_config(role: Role) -> RoleConfig {
    match role {
        Role::Admin => RoleConfig {
            sidebar: vec![
                section(
                    "User Management",
                    Icon::Users,
                    vec![item("manage-users", "Manage Users", "admin.manage_users")],
                ),
                section(
                    "Form Management",
                    Icon::FileText,
                    vec![item(
                        "manage-form-schemas",
                        "Manage Form Templates",
                        "admin.manage_form_schemas",
                    )],
                ),
                section(
                    "Organization",
                    Icon::Building,
                    vec![item(
                        "manage-organization",
                        "Organization Structure",
                        "admin.manage_organization",
                    )],
                ),
            ],
            dashboard: view("Admin Dashboard"),
            permissions: Permissions::with_flags(&[
                ("canEditUsers", true),
                ("canCreateUsers", true),
                ("canToggleUserStatus", true),
                ("canManageFormSchemas", true),
                ("canManageOrganization", true),
            ]),
        },
        Role::Staff => RoleConfig {
            sidebar: vec![
                section(
                    "Form Management",
                    Icon::File,
                    vec![
                        item("review-forms", "Review Forms", "staff.review_forms"),
                        item("update-signature", "Update Signature", "student.update_signature"),
                    ],
                ),
                section(
                    "Delegations",
                    Icon::UserPlus,
                    vec![item(
                        "manage-delegations",
                        "Manage Delegations",
                        "staff.manage_delegations",
                    )],
                ),
            ],
            dashboard: view("Staff Dashboard"),
            permissions: Permissions::with_flags(&[
                ("canEditUsers", false),
                ("canCreateUsers", false),
                ("canToggleUserStatus", false),
                ("canUpdateSignature", true),
                ("canManageDelegations", true),
            ]),
        },
        Role::Student => RoleConfig {
            sidebar: vec![
                section(
                    "Form Management",
                    Icon::File,
                    vec![
                        item("submit-forms", "Submit Forms", "student.submit_forms"),
                        item("view-forms", "View Forms", "student.view_forms"),
                        item("update-signature", "Update Signature", "student.update_signature"),
                    ],
                ),
                section(
                    "Account",
                    Icon::User,
                    vec![item("profile", "Profile Settings", "student.edit_profile")],
                ),
            ],
            dashboard: view("Student Dashboard"),
            permissions: Permissions::with_flags(&[
                ("canEditUsers", false),
                ("canCreateUsers", false),
                ("canToggleUserStatus", false),
                ("canUpdateSignature", true),
            ])
            .scope("student", &["submit_forms", "view_forms", "edit_profile"]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_ids_per_role() {
        let ids = |role| {
            role_config(role)
                .sidebar
                .iter()
                .flat_map(|section| section.items.iter().map(|item| item.id.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            ids(Role::Admin),
            vec!["manage-users", "manage-form-schemas", "manage-organization"]
        );
        assert_eq!(
            ids(Role::Staff),
            vec!["review-forms", "update-signature", "manage-delegations"]
        );
        assert_eq!(
            ids(Role::Student),
            vec!["submit-forms", "view-forms", "update-signature", "profile"]
        );
    }

    #[test]
    fn student_scoped_grants_are_dotted() {
        let grants: Vec<_> = role_config(Role::Student).permissions.scoped_grants().collect();
        assert_eq!(
            grants,
            vec!["student.edit_profile", "student.submit_forms", "student.view_forms"]
        );
    }

    #[test]
    fn serializes_with_ui_keys() {
        let value = serde_json::to_value(role_config(Role::Staff)).unwrap();
        assert_eq!(value["dashboard"]["title"], "Staff Dashboard");
        assert_eq!(value["dashboard"]["defaultView"], "");
        assert_eq!(value["sidebar"][1]["icon"], "UserPlus");
        assert_eq!(value["sidebar"][0]["isActive"], true);
        assert_eq!(value["permissions"]["canManageDelegations"], true);
    }
}
