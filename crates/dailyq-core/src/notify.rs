//! Daily reminder scheduling.
//!
//! Pure time computation only: the store supplies the enabled flag and
//! the reminder time, and the platform notification scheduler consumes
//! the next occurrence this module computes.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REMINDER_HOUR: u32 = 20;
pub const DEFAULT_REMINDER_MINUTE: u32 = 0;

/// Wall-clock time of day the daily reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTime {
    pub hour: u32,
    pub minute: u32,
}

impl NotificationTime {
    /// A validated time of day; `None` when out of range.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Clamp out-of-range components instead of rejecting them.
    pub fn clamped(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }
}

impl Default for NotificationTime {
    fn default() -> Self {
        Self {
            hour: DEFAULT_REMINDER_HOUR,
            minute: DEFAULT_REMINDER_MINUTE,
        }
    }
}

impl fmt::Display for NotificationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A recurring daily reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSchedule {
    pub enabled: bool,
    pub time: NotificationTime,
}

impl ReminderSchedule {
    pub fn new(enabled: bool, time: NotificationTime) -> Self {
        Self { enabled, time }
    }

    /// The next instant the reminder fires strictly after `after`, in
    /// the reference offset's wall clock. `None` when disabled.
    pub fn next_occurrence(
        &self,
        after: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Option<DateTime<Utc>> {
        if !self.enabled {
            return None;
        }
        let target = NaiveTime::from_hms_opt(self.time.hour, self.time.minute, 0)?;
        let local = after.with_timezone(&offset);
        let mut day = local.date_naive();
        if local.time() >= target {
            day = day.succ_opt()?;
        }
        offset
            .from_local_datetime(&day.and_time(target))
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::reference_offset;
    use chrono::TimeZone;

    #[test]
    fn validation_bounds() {
        assert!(NotificationTime::new(23, 59).is_some());
        assert!(NotificationTime::new(24, 0).is_none());
        assert!(NotificationTime::new(8, 60).is_none());
        let clamped = NotificationTime::clamped(99, 99);
        assert_eq!((clamped.hour, clamped.minute), (23, 59));
    }

    #[test]
    fn default_is_eight_pm() {
        assert_eq!(NotificationTime::default().to_string(), "20:00");
    }

    #[test]
    fn fires_later_today_when_time_is_ahead() {
        let schedule = ReminderSchedule::new(true, NotificationTime::clamped(20, 0));
        let offset = reference_offset(0);
        let morning = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
        let next = schedule.next_occurrence(morning, offset).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 3, 5, 20, 0, 0).unwrap());
    }

    #[test]
    fn rolls_to_tomorrow_once_passed() {
        let schedule = ReminderSchedule::new(true, NotificationTime::clamped(20, 0));
        let offset = reference_offset(0);
        let evening = Utc.with_ymd_and_hms(2024, 3, 5, 20, 0, 0).unwrap();
        let next = schedule.next_occurrence(evening, offset).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 3, 6, 20, 0, 0).unwrap());
    }

    #[test]
    fn respects_reference_offset() {
        let schedule = ReminderSchedule::new(true, NotificationTime::clamped(20, 0));
        let offset = reference_offset(9);
        // 12:00 UTC is 21:00 at UTC+9, so today's slot has passed.
        let noon = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let next = schedule.next_occurrence(noon, offset).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 3, 6, 11, 0, 0).unwrap());
    }

    #[test]
    fn disabled_schedule_never_fires() {
        let schedule = ReminderSchedule::new(false, NotificationTime::default());
        let offset = reference_offset(0);
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
        assert!(schedule.next_occurrence(now, offset).is_none());
    }
}
