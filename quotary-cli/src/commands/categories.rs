//! List distinct categories.

use anyhow::Result;
use std::path::Path;

use quotary_types::CategoryFilter;

use crate::config::open_store;

/// Run the categories command.
pub fn run(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let categories = store.categories();

    if categories.is_empty() {
        println!("No categories yet.");
        return Ok(());
    }

    for category in &categories {
        let count = store
            .by_category(&CategoryFilter::Category(category.clone()))
            .len();
        println!("  {category} ({count})");
    }
    Ok(())
}
