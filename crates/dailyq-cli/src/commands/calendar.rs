//! Calendar view: answered days of a month.

use chrono::{Datelike, Utc};
use clap::Subcommand;
use dailyq_core::store::{Config, RecordStore};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Answered days for one month (default: the current month)
    Month {
        #[arg(long)]
        year: Option<i32>,
        /// 1-based month number
        #[arg(long)]
        month: Option<u32>,
    },
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = RecordStore::open(&config)?;

    match action {
        CalendarAction::Month { year, month } => {
            let today = store.day_key(Utc::now());
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            if !(1..=12).contains(&month) {
                return Err(format!("invalid month: {month}").into());
            }

            let mut entries: Vec<_> = store
                .all_answers()
                .into_iter()
                .filter(|r| r.date.year() == year && r.date.month() == month)
                .collect();
            entries.sort_by_key(|r| r.date);

            if entries.is_empty() {
                println!("no entries for {year}-{month:02}");
                return Ok(());
            }
            for record in entries {
                println!("{:>2}.  {}", record.date.date().day(), record.question);
            }
        }
    }
    Ok(())
}
