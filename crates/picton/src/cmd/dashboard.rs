use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use picton_dashboard::{DashboardConfig, UserProfile};

use crate::config::{OutputFormat, PictonConfig};

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    /// User profile as returned by the auth endpoint
    #[arg(long, value_name = "user.json")]
    pub user: PathBuf,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

pub fn run(args: DashboardArgs, config: &PictonConfig) -> Result<()> {
    let raw = fs::read_to_string(&args.user)
        .with_context(|| format!("failed to read {}", args.user.display()))?;
    let profile = UserProfile::from_json(&raw)
        .with_context(|| format!("invalid user profile in {}", args.user.display()))?;
    let dashboard = DashboardConfig::for_user(&profile);
    match config.format(args.format) {
        OutputFormat::Text => println!("{}", render_text(&dashboard)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dashboard)?),
    }
    Ok(())
}

fn render_text(dashboard: &DashboardConfig) -> String {
    let user = dashboard.user();
    let view = dashboard.dashboard();
    let mut lines = vec![format!("{} ({})", view.title, dashboard.role())];
    lines.push(format!("User: {} <{}>", user.username, user.email));
    for section in dashboard.sidebar().iter().filter(|section| section.is_active) {
        lines.push(format!("{}:", section.title));
        for item in &section.items {
            if item.permissions.iter().all(|permission| dashboard.can(permission)) {
                lines.push(format!(" - {} [{}]", item.title, item.id));
            }
        }
    }
    lines.join("\n")
}
