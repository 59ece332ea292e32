//! Import quotes from a JSON document.

use anyhow::{Context, Result};
use std::path::Path;

use quotary_store::codec;

use crate::config::open_store;

/// Run the import command.
pub fn run(data_dir: &Path, file: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let document = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let inserted = codec::import(&store, &document)?;
    println!(
        "Imported {inserted} new quote(s); store now holds {}.",
        store.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn import_merges_document() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("in.json");
        std::fs::write(
            &file,
            r#"[{"text":"a","category":"A"},{"text":"b","category":"B"}]"#,
        )
        .unwrap();

        run(dir.path(), &file).unwrap();

        let store = open_store(dir.path()).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn import_rejects_non_array_document() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("in.json");
        std::fs::write(&file, r#"{"text":"a","category":"A"}"#).unwrap();

        assert!(run(dir.path(), &file).is_err());

        let store = open_store(dir.path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn export_then_import_roundtrips() {
        let source = tempdir().unwrap();
        {
            let store = open_store(source.path()).unwrap();
            store.add("first", "A").unwrap();
            store.add("second", "B").unwrap();
        }
        let file = source.path().join("out.json");
        crate::commands::export::run(source.path(), Some(&file)).unwrap();

        let target = tempdir().unwrap();
        run(target.path(), &file).unwrap();

        let from = open_store(source.path()).unwrap();
        let to = open_store(target.path()).unwrap();
        assert_eq!(from.all(), to.all());
    }
}
