//! Bulk data wipe.

use dailyq_core::store::{Config, RecordStore};

pub fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("this erases every stored day and setting; pass --yes to confirm".into());
    }
    let config = Config::load_or_default();
    let store = RecordStore::open(&config)?;
    store.clear_all_data();
    println!("all data erased");
    Ok(())
}
