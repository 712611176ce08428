//! Configuration management commands.

use clap::Subcommand;
use dailyq_core::store::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the whole config as TOML
    Show,
    /// Get one value by dot-separated key
    Get { key: String },
    /// Set one value by dot-separated key
    Set { key: String, value: String },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Get { key } => {
            let config = Config::load_or_default();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
    }
    Ok(())
}
