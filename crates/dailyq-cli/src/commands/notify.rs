//! Daily reminder commands.

use clap::Subcommand;
use dailyq_core::store::{Config, RecordStore};
use dailyq_core::ReminderSchedule;

#[derive(Subcommand)]
pub enum NotifyAction {
    /// When the next reminder fires
    Next,
}

pub fn run(action: NotifyAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = RecordStore::open(&config)?;

    match action {
        NotifyAction::Next => {
            let schedule = ReminderSchedule::new(
                store.push_notification_enabled(),
                store.notification_time(),
            );
            match schedule.next_occurrence(chrono::Utc::now(), config.offset()) {
                Some(next) => {
                    let local = next.with_timezone(&config.offset());
                    println!("{}", local.format("%Y-%m-%d %H:%M"));
                }
                None => println!("reminders are disabled"),
            }
        }
    }
    Ok(())
}
