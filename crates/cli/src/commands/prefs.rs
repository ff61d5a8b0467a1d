//! `furnish prefs`

use chrono::Utc;
use clap::Subcommand;
use furnish_storefront::{AppState, Result};
use serde_json::json;

use super::print_json;

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show sidebar and popup preferences
    Show,
    /// Open or collapse the sidebar
    Sidebar {
        #[arg(action = clap::ArgAction::Set)]
        open: bool,
    },
    /// Hide the founder membership popup for 30 days
    #[command(name = "dismiss-popup")]
    DismissPopup,
}

pub fn run(state: &AppState, action: &PrefsAction) -> Result<()> {
    let mut prefs = state.preferences()?;
    let now = Utc::now();

    match action {
        PrefsAction::Show => {}
        PrefsAction::Sidebar { open } => prefs.set_sidebar_open(*open)?,
        PrefsAction::DismissPopup => prefs.dismiss_founder_popup(now)?,
    }

    print_json(&json!({
        "sidebarOpen": prefs.sidebar_open(),
        "showFounderPopup": prefs.should_show_founder_popup(now),
        "founderPopupDismissedUntil": prefs.founder_popup_dismissed_until(),
    }));
    Ok(())
}
