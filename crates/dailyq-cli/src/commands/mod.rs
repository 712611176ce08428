pub mod answer;
pub mod calendar;
pub mod config;
pub mod notify;
pub mod question;
pub mod reset;
pub mod settings;
pub mod stats;
pub mod todo;

use chrono::{DateTime, TimeZone, Utc};
use dailyq_core::records::DayKey;
use dailyq_core::store::Config;

/// Resolve an optional `--date YYYY-MM-DD` argument to an instant that
/// normalizes to that day under the configured reference offset; now
/// when absent.
pub(crate) fn resolve_when(
    date: Option<&str>,
    config: &Config,
) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    let Some(raw) = date else {
        return Ok(Utc::now());
    };
    let day: DayKey = raw.parse()?;
    let noon = day
        .date()
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| format!("cannot resolve a time on {raw}"))?;
    let local = config
        .offset()
        .from_local_datetime(&noon)
        .single()
        .ok_or_else(|| format!("cannot resolve a time on {raw}"))?;
    Ok(local.with_timezone(&Utc))
}
