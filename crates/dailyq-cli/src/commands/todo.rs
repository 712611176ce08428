//! Per-day todo list commands.
//!
//! The store replaces a day's list wholesale, so every mutation here is
//! read-modify-write over the full list.

use clap::Subcommand;
use dailyq_core::store::{Config, RecordStore};
use dailyq_core::TodoItem;

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add an item to a day's list
    Add {
        /// Item text
        text: String,
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List a day's items
    List {
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark an item (1-based) as completed
    Done {
        index: usize,
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark an item (1-based) as not completed
    Undo {
        index: usize,
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove an item (1-based)
    Remove {
        index: usize,
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove every item for the day
    Clear {
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: TodoAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = RecordStore::open(&config)?;

    match action {
        TodoAction::Add { text, date } => {
            let when = super::resolve_when(date.as_deref(), &config)?;
            let mut items = store.todo_list(when);
            items.push(TodoItem::new(text));
            store.save_todo_list(&items, when);
            println!("{} item(s) on {}", items.len(), store.day_key(when));
        }
        TodoAction::List { date } => {
            let when = super::resolve_when(date.as_deref(), &config)?;
            let items = store.todo_list(when);
            if items.is_empty() {
                println!("no todos for {}", store.day_key(when));
            }
            for (i, item) in items.iter().enumerate() {
                let mark = if item.is_completed { "x" } else { " " };
                println!("{:>2}. [{mark}] {}", i + 1, item.text);
            }
        }
        TodoAction::Done { index, date } => {
            set_completed(&store, &config, index, date.as_deref(), true)?;
        }
        TodoAction::Undo { index, date } => {
            set_completed(&store, &config, index, date.as_deref(), false)?;
        }
        TodoAction::Remove { index, date } => {
            let when = super::resolve_when(date.as_deref(), &config)?;
            let mut items = store.todo_list(when);
            if index == 0 || index > items.len() {
                return Err(format!("no todo #{index} on {}", store.day_key(when)).into());
            }
            let removed = items.remove(index - 1);
            store.save_todo_list(&items, when);
            println!("removed: {}", removed.text);
        }
        TodoAction::Clear { date } => {
            let when = super::resolve_when(date.as_deref(), &config)?;
            store.save_todo_list(&[], when);
            println!("cleared todos for {}", store.day_key(when));
        }
    }
    Ok(())
}

fn set_completed(
    store: &RecordStore,
    config: &Config,
    index: usize,
    date: Option<&str>,
    completed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let when = super::resolve_when(date, config)?;
    let mut items = store.todo_list(when);
    if index == 0 || index > items.len() {
        return Err(format!("no todo #{index} on {}", store.day_key(when)).into());
    }
    items[index - 1].is_completed = completed;
    let text = items[index - 1].text.clone();
    store.save_todo_list(&items, when);
    let state = if completed { "done" } else { "open" };
    println!("{state}: {text}");
    Ok(())
}
