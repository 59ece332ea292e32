//! Show or set the saved category filter.

use anyhow::Result;
use std::path::Path;

use quotary_types::CategoryFilter;

use crate::config::open_store;

/// Run the filter command.
pub fn run(data_dir: &Path, value: Option<&str>) -> Result<()> {
    let store = open_store(data_dir)?;
    match value {
        Some(value) => {
            let filter = CategoryFilter::parse(value);
            store.set_selected_filter(filter.clone())?;
            println!("Filter set to '{filter}'.");
        }
        None => println!("Current filter: '{}'", store.selected_filter()),
    }
    Ok(())
}
