pub mod config;
pub mod dashboard;
pub mod error;
pub mod role;
pub mod user;

pub use config::{
    DashboardView, Icon, Permissions, RoleConfig, SidebarItem, SidebarSection, role_config,
};
pub use dashboard::DashboardConfig;
pub use error::DashboardError;
pub use role::Role;
pub use user::{SessionUser, UserProfile};
