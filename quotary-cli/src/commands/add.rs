//! Add a quote to the store.

use anyhow::Result;
use std::path::Path;

use crate::config::open_store;

/// Run the add command.
pub fn run(data_dir: &Path, text: &str, category: &str) -> Result<()> {
    let store = open_store(data_dir)?;
    let record = store.add(text, category)?;
    println!("Added \"{}\" under '{}'.", record.text, record.category);
    Ok(())
}
