//! Journal answer commands.

use clap::Subcommand;
use dailyq_core::store::{Config, RecordStore};

#[derive(Subcommand)]
pub enum AnswerAction {
    /// Write (or rewrite) the answer for a day
    Write {
        /// Answer text
        text: String,
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the answer stored for a day
    Show {
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List the full answer history, newest first
    List {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AnswerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = RecordStore::open(&config)?;

    match action {
        AnswerAction::Write { text, date } => {
            let when = super::resolve_when(date.as_deref(), &config)?;
            let day = store.day_key(when);
            store.save_answer(&text, when);
            if store.question(when).is_some() {
                println!("answer saved for {day}");
            } else {
                println!(
                    "answer saved for {day} (no question that day, so it stays out of the history)"
                );
            }
        }
        AnswerAction::Show { date } => {
            let when = super::resolve_when(date.as_deref(), &config)?;
            match store.answer(when) {
                Some(answer) => println!("{answer}"),
                None => println!("no answer stored for {}", store.day_key(when)),
            }
        }
        AnswerAction::List { json } => {
            let records = store.all_answers();
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("no answers yet");
            } else {
                for record in records {
                    println!("{}  {}", record.date, record.question);
                    println!("    {}", record.answer);
                }
            }
        }
    }
    Ok(())
}
