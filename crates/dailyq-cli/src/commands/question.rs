//! Question-of-the-day commands.

use clap::Subcommand;
use dailyq_core::prompts::{PromptService, PromptSource};
use dailyq_core::store::{Config, RecordStore};

#[derive(Subcommand)]
pub enum QuestionAction {
    /// Show today's question, generating one if none exists yet
    Today {
        /// Generate a fresh question even if today already has one
        #[arg(long)]
        force: bool,
    },
    /// Show the question stored for a day
    Show {
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: QuestionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = RecordStore::open(&config)?;

    match action {
        QuestionAction::Today { force } => {
            let now = chrono::Utc::now();
            let today = store.day_key(now);
            let generated_today = store.last_question_day() == Some(today);
            if !force && generated_today {
                if let Some(existing) = store.question(now) {
                    println!("{existing}");
                    return Ok(());
                }
            }
            let service = PromptService::from_config(&config.prompts)?;
            let prompt = service.generate_blocking()?;
            store.save_question(&prompt.text, now);
            println!("{}", prompt.text);
            if prompt.source == PromptSource::Fallback {
                eprintln!("(from the local prompt list)");
            }
        }
        QuestionAction::Show { date } => {
            let when = super::resolve_when(date.as_deref(), &config)?;
            match store.question(when) {
                Some(question) => println!("{question}"),
                None => println!("no question stored for {}", store.day_key(when)),
            }
        }
    }
    Ok(())
}
