use picton_dashboard::{DashboardConfig, Role, UserProfile};
use serde_json::json;

fn config_for(role: Option<&str>) -> DashboardConfig {
    let mut payload = json!({
        "id": 12,
        "username": "jdoe",
        "email": "jdoe@uh.edu",
        "first_name": "Jane",
        "last_name": "Doe",
        "is_active": true
    });
    if let Some(role) = role {
        payload["role"] = json!(role);
    }
    let profile: UserProfile = serde_json::from_value(payload).expect("deserialize");
    DashboardConfig::for_user(&profile)
}

#[test]
fn every_builtin_item_is_visible_to_its_role() {
    for role in Role::ALL {
        let config = config_for(Some(role.as_str()));
        let total: usize = config.sidebar().iter().map(|section| section.items.len()).sum();
        assert_eq!(config.visible_items().len(), total, "role {role}");
    }
}

#[test]
fn student_permissions() {
    let config = config_for(Some("student"));
    assert!(config.has_permission("canUpdateSignature"));
    assert!(!config.has_permission("canManageDelegations"));
    assert!(config.can("student.view_forms"));
    assert!(config.can("student.edit_profile"));
    assert_eq!(config.user().full_name, "Jane Doe");
    assert_eq!(config.dashboard().title, "Student Dashboard");
}

#[test]
fn missing_role_falls_back_to_student() {
    let config = config_for(None);
    assert_eq!(config.role(), Role::Student);
    assert!(config.resolve_view("submit-forms").is_some());
}

#[test]
fn staff_shares_signature_view_with_students() {
    let staff = config_for(Some("staff"));
    assert!(staff.can("student.update_signature"));
    assert!(!staff.can("student.submit_forms"));
    assert!(staff.resolve_view("update-signature").is_some());
    assert!(staff.resolve_view("submit-forms").is_none());
}

#[test]
fn serialized_config_exposes_user_and_sidebar() {
    let value = serde_json::to_value(config_for(Some("admin"))).expect("serialize");
    assert_eq!(value["user"]["fullName"], "Jane Doe");
    assert_eq!(value["user"]["role"], "admin");
    assert_eq!(value["sidebar"][0]["title"], "User Management");
    assert_eq!(value["dashboard"]["title"], "Admin Dashboard");
}
