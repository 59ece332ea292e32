//! Show a random quote.

use anyhow::Result;
use std::path::Path;

use quotary_types::CategoryFilter;

use crate::config::open_store;

/// Run the random command.
///
/// Draws from the saved filter unless `category` overrides it, and records
/// the shown quote as last viewed for this session.
pub fn run(data_dir: &Path, category: Option<&str>) -> Result<()> {
    let store = open_store(data_dir)?;
    let filter = match category {
        Some(value) => CategoryFilter::parse(value),
        None => store.selected_filter(),
    };

    match store.random(&filter) {
        Some(record) => {
            store.set_last_viewed(&record)?;
            println!("\"{}\" - {}", record.text, record.category);
        }
        None => println!("No quotes available in this category."),
    }
    Ok(())
}
