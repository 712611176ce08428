//! On-device settings stored alongside the journal data.

use clap::Subcommand;
use dailyq_core::store::{Config, RecordStore};
use dailyq_core::NotificationTime;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show all settings
    Show,
    /// Enable or disable the daily push reminder
    Push {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::value_parser!(bool))]
        enabled: bool,
    },
    /// Enable or disable dark mode
    Dark {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::value_parser!(bool))]
        enabled: bool,
    },
    /// Set the reminder time
    Time {
        /// Hour, 0-23
        hour: u32,
        /// Minute, 0-59
        minute: u32,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = RecordStore::open(&config)?;

    match action {
        SettingsAction::Show => {
            println!("push_notifications = {}", store.push_notification_enabled());
            println!("dark_mode = {}", store.dark_mode_enabled());
            println!("notification_time = {}", store.notification_time());
        }
        SettingsAction::Push { enabled } => {
            store.set_push_notification_enabled(enabled);
            println!("push_notifications = {enabled}");
        }
        SettingsAction::Dark { enabled } => {
            store.set_dark_mode_enabled(enabled);
            println!("dark_mode = {enabled}");
        }
        SettingsAction::Time { hour, minute } => {
            let time = NotificationTime::new(hour, minute)
                .ok_or_else(|| format!("invalid time {hour:02}:{minute:02}"))?;
            store.set_notification_time(time);
            println!("notification_time = {time}");
        }
    }
    Ok(())
}
