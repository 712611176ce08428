//! # DailyQ Core Library
//!
//! This library provides the core logic for DailyQ, a single-user daily
//! journaling app: one prompt question per day, a free-text answer, a
//! per-day todo list, and usage statistics derived from the answer
//! history. The CLI binary is a thin front-end over this crate; any
//! other UI layer would sit on the same surface.
//!
//! ## Architecture
//!
//! - **Record store**: a SQLite-backed flat key-value namespace keyed by
//!   calendar day, plus the settings toggles
//! - **Statistics**: streaks, weekly/monthly counts, and a three-month
//!   histogram recomputed from the full history on demand
//! - **Prompts**: a chat-completion client with a local fallback list
//! - **Reminders**: next-occurrence computation for the daily reminder
//!
//! ## Key Components
//!
//! - [`RecordStore`]: date-keyed persistence and settings
//! - [`StatsSnapshot`]: derived usage statistics
//! - [`PromptService`]: question-of-the-day generation
//! - [`Config`]: application configuration management

pub mod error;
pub mod notify;
pub mod prompts;
pub mod records;
pub mod stats;
pub mod store;

pub use error::{ConfigError, CoreError, PromptError, StoreError};
pub use notify::{NotificationTime, ReminderSchedule};
pub use prompts::{
    FallbackPrompter, GeneratedPrompt, PromptService, PromptSource, RemotePrompter,
};
pub use records::{AnswerRecord, DayKey, QuestionEntry, TodoItem};
pub use stats::{MonthlyCount, StatsSnapshot};
pub use store::{Config, RecordStore};
