//! Journal data model: day keys, answer records, todo items.
//!
//! Everything in the store is keyed by [`DayKey`], a calendar date in the
//! app's fixed reference time zone. Keying on the canonical day (never a
//! raw timestamp) is what makes two saves at 07:00 and 23:00 land on the
//! same entry.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference UTC offset used when none is configured.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Build a fixed offset from whole hours, falling back to UTC for
/// out-of-range values.
pub fn reference_offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix())
}

/// A calendar day in the reference time zone.
///
/// Canonical form is the zero-padded `YYYY-MM-DD` string, which is also
/// how a key serializes; lexicographic order of the canonical form equals
/// chronological order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Normalize an instant to its calendar day in the given offset.
    pub fn from_datetime(when: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self(when.with_timezone(&offset).date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The following calendar day, `None` past the chrono date range.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// The preceding calendar day, `None` past the chrono date range.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// First day of this key's month.
    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

/// One journaled day: the prompt shown and the answer written.
///
/// The store keeps at most one record per day; a later save for the same
/// day updates the question and answer in place and keeps the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub date: DayKey,
}

impl AnswerRecord {
    pub fn new(question: String, answer: String, date: DayKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            answer,
            date,
        }
    }
}

/// A single todo entry on a day's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Uuid,
    pub text: String,
    pub is_completed: bool,
}

impl TodoItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_completed: false,
        }
    }
}

/// A prompt question attached to a day. A question can exist for a day
/// that has no answer yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionEntry {
    pub date: DayKey,
    pub question: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn canonical_form_is_zero_padded() {
        assert_eq!(day("2024-03-07").to_string(), "2024-03-07");
        assert_eq!(day("2024-11-30").to_string(), "2024-11-30");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not-a-date".parse::<DayKey>().is_err());
        assert!("2024-13-01".parse::<DayKey>().is_err());
    }

    #[test]
    fn normalization_uses_reference_offset() {
        let offset = reference_offset(9);
        // 2024-03-01T20:00Z is already 2024-03-02 at UTC+9.
        let late = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        assert_eq!(DayKey::from_datetime(late, offset), day("2024-03-02"));

        let morning = Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        assert_eq!(DayKey::from_datetime(morning, offset), day("2024-03-01"));
    }

    #[test]
    fn same_local_day_same_key() {
        let offset = reference_offset(0);
        let a = Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 1).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 5, 5, 23, 59, 59).unwrap();
        assert_eq!(
            DayKey::from_datetime(a, offset),
            DayKey::from_datetime(b, offset)
        );
    }

    #[test]
    fn reference_offset_falls_back_to_utc() {
        assert_eq!(reference_offset(99).local_minus_utc(), 0);
        assert_eq!(reference_offset(-5).local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn stepping_crosses_month_boundaries() {
        assert_eq!(day("2024-03-01").pred(), Some(day("2024-02-29")));
        assert_eq!(day("2023-12-31").succ(), Some(day("2024-01-01")));
        assert_eq!(day("2024-07-15").first_of_month(), day("2024-07-01"));
    }

    #[test]
    fn serde_uses_canonical_string() {
        let key = day("2024-01-05");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-01-05\"");
        let back: DayKey = serde_json::from_str("\"2024-01-05\"").unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn update_in_place_keeps_id() {
        let mut record =
            AnswerRecord::new("Q?".into(), "first".into(), day("2024-01-01"));
        let id = record.id;
        record.answer = "second".into();
        assert_eq!(record.id, id);
    }

    proptest! {
        #[test]
        fn display_parse_roundtrip(days in 0u32..60000) {
            let date = NaiveDate::from_num_days_from_ce_opt(700_000 + days as i32).unwrap();
            let key = DayKey::new(date);
            let back: DayKey = key.to_string().parse().unwrap();
            prop_assert_eq!(back, key);
        }

        #[test]
        fn string_order_matches_date_order(a in 0u32..60000, b in 0u32..60000) {
            let da = NaiveDate::from_num_days_from_ce_opt(700_000 + a as i32).unwrap();
            let db = NaiveDate::from_num_days_from_ce_opt(700_000 + b as i32).unwrap();
            let (ka, kb) = (DayKey::new(da), DayKey::new(db));
            prop_assert_eq!(ka.cmp(&kb), ka.to_string().cmp(&kb.to_string()));
        }
    }
}
