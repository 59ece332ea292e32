//! Export all quotes as a JSON document.

use anyhow::{Context, Result};
use std::path::Path;

use quotary_store::codec;

use crate::config::open_store;

/// Run the export command.
pub fn run(data_dir: &Path, output: Option<&Path>) -> Result<()> {
    let store = open_store(data_dir)?;
    let document = codec::export(&store)?;

    match output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported {} quote(s) to {}.", store.len(), path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}
