use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Account role. Student carries the lowest privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    #[default]
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Staff, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Student => "student",
        }
    }

    /// Lenient parse: unknown or missing roles resolve to [`Role::Student`].
    pub fn from_name(raw: Option<&str>) -> Self {
        match raw.map(str::parse::<Role>) {
            Some(Ok(role)) => role,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "falling back to student role");
                Role::Student
            }
            None => Role::Student,
        }
    }
}

impl FromStr for Role {
    type Err = DashboardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "student" => Ok(Role::Student),
            _ => Err(DashboardError::UnknownRole(raw.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Staff".parse::<Role>().unwrap(), Role::Staff);
        assert!("dean".parse::<Role>().is_err());
    }

    #[test]
    fn unknown_roles_fall_back_to_student() {
        assert_eq!(Role::from_name(Some("dean")), Role::Student);
        assert_eq!(Role::from_name(None), Role::Student);
        assert_eq!(Role::from_name(Some("admin")), Role::Admin);
    }
}
