//! List stored quotes.

use anyhow::Result;
use std::path::Path;

use quotary_types::CategoryFilter;

use crate::config::open_store;

/// Run the list command.
pub fn run(data_dir: &Path, category: Option<&str>) -> Result<()> {
    let store = open_store(data_dir)?;
    let filter = match category {
        Some(value) => CategoryFilter::parse(value),
        None => CategoryFilter::All,
    };

    let records = store.by_category(&filter);
    if records.is_empty() {
        match &filter {
            CategoryFilter::All => println!("No quotes stored."),
            CategoryFilter::Category(name) => println!("No quotes stored in '{name}'."),
        }
        return Ok(());
    }

    for record in &records {
        println!("  \"{}\" - {}", record.text, record.category);
    }
    println!();
    println!("{} quote(s).", records.len());
    Ok(())
}
