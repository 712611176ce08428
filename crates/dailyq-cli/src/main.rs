use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dailyq", version, about = "DailyQ journaling CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Question of the day
    Question {
        #[command(subcommand)]
        action: commands::question::QuestionAction,
    },
    /// Journal answers
    Answer {
        #[command(subcommand)]
        action: commands::answer::AnswerAction,
    },
    /// Per-day todo list
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },
    /// Usage statistics
    Stats,
    /// Answered days by month
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// On-device settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Daily reminder
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// Erase all stored data
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Question { action } => commands::question::run(action),
        Commands::Answer { action } => commands::answer::run(action),
        Commands::Todo { action } => commands::todo::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Notify { action } => commands::notify::run(action),
        Commands::Reset { yes } => commands::reset::run(yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
