//! Derived usage statistics over the answer history.
//!
//! A [`StatsSnapshot`] is recomputed from the full record collection on
//! every request and never cached across store mutations.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset, Month, Utc};
use serde::{Deserialize, Serialize};

use crate::records::{AnswerRecord, DayKey};

/// Upper bound on the backward day-walk when computing the current
/// streak. Overridable through `stats.streak_scan_days` in the config.
pub const DEFAULT_STREAK_SCAN_DAYS: u32 = 365;

/// How many trailing months the histogram covers, current month included.
pub const HISTOGRAM_MONTHS: u32 = 3;

/// Answer count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// Month name ("January").
    pub label: String,
    pub year: i32,
    /// 1-based month number.
    pub month: u32,
    pub count: usize,
}

/// Aggregate statistics derived from the answer history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_answers: usize,
    pub this_month_answers: usize,
    pub this_week_answers: usize,
    /// Consecutive answered days ending at the reference day; 0 when the
    /// reference day itself has no answer.
    pub current_streak: u32,
    /// Longest run of consecutive answered days anywhere in the history.
    pub max_streak: u32,
    /// Last three months, most recent first.
    pub monthly: Vec<MonthlyCount>,
}

/// Compute a snapshot of the whole history as of `reference_now`.
pub fn snapshot(
    records: &[AnswerRecord],
    reference_now: DateTime<Utc>,
    offset: FixedOffset,
    streak_scan_days: u32,
) -> StatsSnapshot {
    let today = DayKey::from_datetime(reference_now, offset);
    let month_floor = today.first_of_month();
    let week_floor = DayKey::from_datetime(reference_now - Duration::days(7), offset);

    let days: BTreeSet<DayKey> = records.iter().map(|r| r.date).collect();

    StatsSnapshot {
        total_answers: records.len(),
        this_month_answers: records.iter().filter(|r| r.date >= month_floor).count(),
        this_week_answers: records.iter().filter(|r| r.date >= week_floor).count(),
        current_streak: current_streak(&days, today, streak_scan_days),
        max_streak: max_streak(&days),
        monthly: monthly_histogram(records, today),
    }
}

/// Walk backward from `today` while every day is present, bounded by
/// `scan_days`.
fn current_streak(days: &BTreeSet<DayKey>, today: DayKey, scan_days: u32) -> u32 {
    let mut streak = 0;
    let mut cursor = today;
    for _ in 0..scan_days {
        if !days.contains(&cursor) {
            break;
        }
        streak += 1;
        match cursor.pred() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

/// Longest run where each day is exactly one after the previous.
fn max_streak(days: &BTreeSet<DayKey>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<DayKey> = None;
    for &day in days {
        run = match prev.and_then(|p| p.succ()) {
            Some(next) if next == day => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}

/// Counts for the reference month and the two before it, ordered
/// chronologically descending. Ordering by (year, month) keeps a window
/// spanning a year boundary in calendar order.
fn monthly_histogram(records: &[AnswerRecord], today: DayKey) -> Vec<MonthlyCount> {
    (0..HISTOGRAM_MONTHS)
        .map(|back| {
            let (year, month) = months_back(today.year(), today.month(), back);
            let count = records
                .iter()
                .filter(|r| r.date.year() == year && r.date.month() == month)
                .count();
            MonthlyCount {
                label: month_label(month),
                year,
                month,
                count,
            }
        })
        .collect()
}

/// The (year, month) pair `back` months before the given one.
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let zero_based = month as i32 - 1 - back as i32;
    (year + zero_based.div_euclid(12), zero_based.rem_euclid(12) as u32 + 1)
}

fn month_label(month: u32) -> String {
    Month::try_from(month as u8)
        .map(|m| m.name().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn offset() -> FixedOffset {
        crate::records::reference_offset(0)
    }

    fn record(day: &str) -> AnswerRecord {
        AnswerRecord::new("Q?".into(), "A.".into(), day.parse().unwrap())
    }

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_history_is_all_zero() {
        let snap = snapshot(&[], noon(2024, 1, 5), offset(), DEFAULT_STREAK_SCAN_DAYS);
        assert_eq!(snap.total_answers, 0);
        assert_eq!(snap.current_streak, 0);
        assert_eq!(snap.max_streak, 0);
        assert_eq!(snap.monthly.len(), 3);
        assert!(snap.monthly.iter().all(|m| m.count == 0));
    }

    #[test]
    fn streaks_with_gap() {
        // Answers on Jan 1-3, gap on Jan 4, answer on Jan 5.
        let records: Vec<_> = ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-05"]
            .iter()
            .map(|d| record(d))
            .collect();
        let snap = snapshot(&records, noon(2024, 1, 5), offset(), DEFAULT_STREAK_SCAN_DAYS);
        assert_eq!(snap.current_streak, 1);
        assert_eq!(snap.max_streak, 3);
    }

    #[test]
    fn current_streak_zero_without_today() {
        let records = vec![record("2024-01-03"), record("2024-01-04")];
        let snap = snapshot(&records, noon(2024, 1, 5), offset(), DEFAULT_STREAK_SCAN_DAYS);
        assert_eq!(snap.current_streak, 0);
        assert_eq!(snap.max_streak, 2);
    }

    #[test]
    fn current_streak_respects_scan_cap() {
        let mut records = Vec::new();
        let mut day: DayKey = "2024-01-10".parse().unwrap();
        for _ in 0..10 {
            records.push(AnswerRecord::new("Q?".into(), "A.".into(), day));
            day = day.pred().unwrap();
        }
        let snap = snapshot(&records, noon(2024, 1, 10), offset(), 3);
        assert_eq!(snap.current_streak, 3);
    }

    #[test]
    fn max_streak_spans_month_boundary() {
        let records: Vec<_> = ["2024-02-28", "2024-02-29", "2024-03-01"]
            .iter()
            .map(|d| record(d))
            .collect();
        let snap = snapshot(&records, noon(2024, 3, 10), offset(), DEFAULT_STREAK_SCAN_DAYS);
        assert_eq!(snap.max_streak, 3);
    }

    #[test]
    fn week_and_month_windows() {
        let records: Vec<_> = [
            "2024-03-01", // in month, outside week
            "2024-03-10", // in month and week
            "2024-03-15", // reference day
            "2024-02-20", // previous month
        ]
        .iter()
        .map(|d| record(d))
        .collect();
        let snap = snapshot(&records, noon(2024, 3, 15), offset(), DEFAULT_STREAK_SCAN_DAYS);
        assert_eq!(snap.total_answers, 4);
        assert_eq!(snap.this_month_answers, 3);
        // Window floor is March 8; the 10th and 15th fall inside.
        assert_eq!(snap.this_week_answers, 2);
    }

    #[test]
    fn week_window_includes_boundary_day() {
        let records = vec![record("2024-03-08")];
        let snap = snapshot(&records, noon(2024, 3, 15), offset(), DEFAULT_STREAK_SCAN_DAYS);
        assert_eq!(snap.this_week_answers, 1);
    }

    #[test]
    fn histogram_orders_recent_first() {
        let records: Vec<_> = [
            "2024-01-10",
            "2024-02-05",
            "2024-02-06",
            "2024-03-01",
            "2024-03-02",
            "2024-03-03",
        ]
        .iter()
        .map(|d| record(d))
        .collect();
        let snap = snapshot(&records, noon(2024, 3, 20), offset(), DEFAULT_STREAK_SCAN_DAYS);
        let labels: Vec<_> = snap.monthly.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["March", "February", "January"]);
        let counts: Vec<_> = snap.monthly.iter().map(|m| m.count).collect();
        assert_eq!(counts, [3, 2, 1]);
    }

    #[test]
    fn histogram_stays_chronological_across_year_boundary() {
        let records: Vec<_> = ["2024-11-20", "2024-12-25", "2025-01-02"]
            .iter()
            .map(|d| record(d))
            .collect();
        let snap = snapshot(&records, noon(2025, 1, 15), offset(), DEFAULT_STREAK_SCAN_DAYS);
        let months: Vec<_> = snap.monthly.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(months, [(2025, 1), (2024, 12), (2024, 11)]);
        let labels: Vec<_> = snap.monthly.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["January", "December", "November"]);
    }

    #[test]
    fn histogram_ignores_months_outside_window() {
        let records = vec![record("2023-12-31"), record("2024-03-05")];
        let snap = snapshot(&records, noon(2024, 3, 20), offset(), DEFAULT_STREAK_SCAN_DAYS);
        let total_in_window: usize = snap.monthly.iter().map(|m| m.count).sum();
        assert_eq!(total_in_window, 1);
    }

    #[test]
    fn months_back_wraps_years() {
        assert_eq!(months_back(2025, 1, 0), (2025, 1));
        assert_eq!(months_back(2025, 1, 1), (2024, 12));
        assert_eq!(months_back(2025, 1, 2), (2024, 11));
        assert_eq!(months_back(2024, 6, 2), (2024, 4));
    }
}
