//! SQLite-backed record store.
//!
//! A single flat key-value namespace holds everything the app persists:
//! per-day questions, answers and todo lists, the authoritative answer
//! history used for statistics, and the on-device settings toggles.
//!
//! Key layout:
//! - `question_<YYYY-MM-DD>` / `answer_<YYYY-MM-DD>` — raw text per day
//! - `todos_<YYYY-MM-DD>` — JSON list of [`TodoItem`]
//! - `allAnswers` — JSON list of [`AnswerRecord`], date descending
//! - `lastQuestionDate` — day key of the most recent generated question
//! - `pushNotificationEnabled`, `darkModeEnabled`, `notificationHour`,
//!   `notificationMinute` — settings
//!
//! The day-keyed operations are best-effort: a failed read degrades to
//! the absent value and a failed write is a logged no-op. Only opening
//! and migrating the store are fallible to the caller.

use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use rusqlite::{params, Connection};
use tracing::{debug, warn};

use super::Config;
use crate::error::StoreError;
use crate::notify::NotificationTime;
use crate::records::{AnswerRecord, DayKey, QuestionEntry, TodoItem};
use crate::stats::{self, StatsSnapshot};

const ALL_ANSWERS_KEY: &str = "allAnswers";
const LAST_QUESTION_KEY: &str = "lastQuestionDate";
const PUSH_ENABLED_KEY: &str = "pushNotificationEnabled";
const DARK_MODE_KEY: &str = "darkModeEnabled";
const NOTIFICATION_HOUR_KEY: &str = "notificationHour";
const NOTIFICATION_MINUTE_KEY: &str = "notificationMinute";

fn question_key(day: DayKey) -> String {
    format!("question_{day}")
}

fn answer_key(day: DayKey) -> String {
    format!("answer_{day}")
}

fn todos_key(day: DayKey) -> String {
    format!("todos_{day}")
}

/// Date-keyed local persistence for journal data and settings.
///
/// Constructed once at application start and passed by reference to
/// every consumer; there is no global accessor.
pub struct RecordStore {
    conn: Connection,
    offset: FixedOffset,
    streak_scan_days: u32,
}

impl RecordStore {
    /// Open the store at `~/.config/dailyq/dailyq.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let dir = super::data_dir()?;
        Self::open_at(dir.join("dailyq.db"), config)
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>, config: &Config) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn, config)
    }

    /// Open an in-memory store (used by tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory(config: &Config) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        Self::from_connection(conn, config)
    }

    fn from_connection(conn: Connection, config: &Config) -> Result<Self, StoreError> {
        let store = Self {
            conn,
            offset: config.offset(),
            streak_scan_days: config.stats.streak_scan_days,
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))
    }

    /// Normalize an instant to its calendar day in the store's reference
    /// offset.
    pub fn day_key(&self, when: DateTime<Utc>) -> DayKey {
        DayKey::from_datetime(when, self.offset)
    }

    // === Questions ===

    /// Store the prompt question for the given day and mark that day as
    /// the most recent question day.
    pub fn save_question(&self, question: &str, when: DateTime<Utc>) {
        let day = self.day_key(when);
        if let Err(e) = self.try_save_question(question, day) {
            warn!(%day, error = %e, "failed to persist question");
        }
    }

    fn try_save_question(&self, question: &str, day: DayKey) -> Result<(), StoreError> {
        self.kv_set(&question_key(day), question)?;
        self.kv_set(LAST_QUESTION_KEY, &day.to_string())?;
        Ok(())
    }

    /// The question stored for the given day, if any.
    pub fn question(&self, when: DateTime<Utc>) -> Option<String> {
        self.kv_get_absorbing(&question_key(self.day_key(when)))
    }

    /// The question stored for the given day, paired with its day key.
    pub fn question_entry(&self, when: DateTime<Utc>) -> Option<QuestionEntry> {
        let date = self.day_key(when);
        self.kv_get_absorbing(&question_key(date))
            .map(|question| QuestionEntry { date, question })
    }

    /// Day key of the most recently generated question, if any.
    pub fn last_question_day(&self) -> Option<DayKey> {
        self.kv_get_absorbing(LAST_QUESTION_KEY)?.parse().ok()
    }

    // === Answers ===

    /// Store the answer text for the given day and fold it into the
    /// answer history when a question exists for that day.
    pub fn save_answer(&self, answer: &str, when: DateTime<Utc>) {
        let day = self.day_key(when);
        if let Err(e) = self.try_save_answer(answer, day) {
            warn!(%day, error = %e, "failed to persist answer");
        }
    }

    fn try_save_answer(&self, answer: &str, day: DayKey) -> Result<(), StoreError> {
        self.kv_set(&answer_key(day), answer)?;

        // Only days with a question enter the history; the raw answer
        // stays retrievable either way.
        let Some(question) = self.kv_get(&question_key(day))? else {
            return Ok(());
        };

        let mut records = self.decode_answers()?;
        match records.iter_mut().find(|r| r.date == day) {
            Some(existing) => {
                existing.question = question;
                existing.answer = answer.to_string();
            }
            None => records.push(AnswerRecord::new(question, answer.to_string(), day)),
        }
        records.sort_by(|a, b| b.date.cmp(&a.date));

        let encoded = serde_json::to_string(&records)?;
        self.kv_set(ALL_ANSWERS_KEY, &encoded)?;
        Ok(())
    }

    /// The answer stored for the given day, if any.
    pub fn answer(&self, when: DateTime<Utc>) -> Option<String> {
        self.kv_get_absorbing(&answer_key(self.day_key(when)))
    }

    /// The full answer history, date descending. Each call reads the
    /// current state; nothing is cached.
    pub fn all_answers(&self) -> Vec<AnswerRecord> {
        self.decode_answers().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load answer history");
            Vec::new()
        })
    }

    fn decode_answers(&self) -> Result<Vec<AnswerRecord>, StoreError> {
        let Some(raw) = self.kv_get(ALL_ANSWERS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                // Undecodable history is treated as absent, not fatal.
                debug!(error = %e, "stored answer history is unreadable");
                Ok(Vec::new())
            }
        }
    }

    // === Todos ===

    /// Replace the entire todo list for the given day.
    pub fn save_todo_list(&self, items: &[TodoItem], when: DateTime<Utc>) {
        let day = self.day_key(when);
        if let Err(e) = self.try_save_todo_list(items, day) {
            warn!(%day, error = %e, "failed to persist todo list");
        }
    }

    fn try_save_todo_list(&self, items: &[TodoItem], day: DayKey) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(items)?;
        self.kv_set(&todos_key(day), &encoded)?;
        Ok(())
    }

    /// The todo list stored for the given day; empty if none.
    pub fn todo_list(&self, when: DateTime<Utc>) -> Vec<TodoItem> {
        let Some(raw) = self.kv_get_absorbing(&todos_key(self.day_key(when))) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                debug!(error = %e, "stored todo list is unreadable");
                Vec::new()
            }
        }
    }

    // === Statistics ===

    /// Derive a fresh statistics snapshot as of `reference_now`.
    pub fn stats_snapshot(&self, reference_now: DateTime<Utc>) -> StatsSnapshot {
        stats::snapshot(
            &self.all_answers(),
            reference_now,
            self.offset,
            self.streak_scan_days,
        )
    }

    // === Settings ===

    pub fn push_notification_enabled(&self) -> bool {
        self.flag(PUSH_ENABLED_KEY)
    }

    pub fn set_push_notification_enabled(&self, enabled: bool) {
        self.set_flag(PUSH_ENABLED_KEY, enabled);
    }

    pub fn dark_mode_enabled(&self) -> bool {
        self.flag(DARK_MODE_KEY)
    }

    pub fn set_dark_mode_enabled(&self, enabled: bool) {
        self.set_flag(DARK_MODE_KEY, enabled);
    }

    /// The daily reminder time; 20:00 when unset.
    pub fn notification_time(&self) -> NotificationTime {
        let hour = self
            .kv_get_absorbing(NOTIFICATION_HOUR_KEY)
            .and_then(|v| v.parse::<u32>().ok());
        let minute = self
            .kv_get_absorbing(NOTIFICATION_MINUTE_KEY)
            .and_then(|v| v.parse::<u32>().ok());
        match (hour, minute) {
            (Some(hour), Some(minute)) => NotificationTime::clamped(hour, minute),
            _ => NotificationTime::default(),
        }
    }

    pub fn set_notification_time(&self, time: NotificationTime) {
        if let Err(e) = self
            .kv_set(NOTIFICATION_HOUR_KEY, &time.hour.to_string())
            .and_then(|()| self.kv_set(NOTIFICATION_MINUTE_KEY, &time.minute.to_string()))
        {
            warn!(error = %e, "failed to persist notification time");
        }
    }

    fn flag(&self, key: &str) -> bool {
        self.kv_get_absorbing(key)
            .map(|v| v == "true")
            .unwrap_or(false)
    }

    fn set_flag(&self, key: &str, enabled: bool) {
        let value = if enabled { "true" } else { "false" };
        if let Err(e) = self.kv_set(key, value) {
            warn!(key, error = %e, "failed to persist setting");
        }
    }

    // === Reset ===

    /// Irreversibly erase the entire namespace: all days, the answer
    /// history, and every setting.
    pub fn clear_all_data(&self) {
        if let Err(e) = self.conn.execute("DELETE FROM kv", []) {
            warn!(error = %e, "failed to clear store");
        }
    }

    // === Key-value plumbing ===

    fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn kv_get_absorbing(&self, key: &str) -> Option<String> {
        self.kv_get(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "failed to read from store");
            None
        })
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
