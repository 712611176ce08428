use dailyq_core::store::{Config, RecordStore};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = RecordStore::open(&config)?;
    let snapshot = store.stats_snapshot(chrono::Utc::now());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
