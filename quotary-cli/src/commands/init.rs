//! Initialize the data directory.

use anyhow::Result;
use std::path::Path;

use quotary_types::QuoteRecord;

use crate::config::{open_store, AppConfig, CONFIG_FILE};

/// Starter set seeded into an empty store.
const STARTER_QUOTES: &[(&str, &str)] = &[
    ("The only limit is your mind.", "Motivation"),
    ("Simplicity is the soul of efficiency.", "Tech"),
    (
        "Art is not what you see, but what you make others see.",
        "Art",
    ),
];

/// Run the init command.
pub fn run(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;

    let config_path = data_dir.join(CONFIG_FILE);
    if config_path.exists() {
        println!("Config already present: {}", config_path.display());
    } else {
        AppConfig::default().save(data_dir)?;
        println!("Wrote default config: {}", config_path.display());
    }

    let store = open_store(data_dir)?;
    if store.is_empty() {
        let starters = STARTER_QUOTES
            .iter()
            .map(|(text, category)| QuoteRecord::new(text, category))
            .collect::<Result<Vec<_>, _>>()?;
        let seeded = store.merge_insert(starters);
        store.persist()?;
        println!("Seeded {seeded} starter quote(s).");
    } else {
        println!(
            "Store already holds {} quote(s), leaving it untouched.",
            store.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_seeds_starter_quotes_and_config() {
        let dir = tempdir().unwrap();

        run(dir.path()).unwrap();

        assert!(dir.path().join(CONFIG_FILE).exists());
        let store = open_store(dir.path()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.categories(), vec!["Motivation", "Tech", "Art"]);
    }

    #[test]
    fn init_is_idempotent() {
        let dir = tempdir().unwrap();

        run(dir.path()).unwrap();
        run(dir.path()).unwrap();

        let store = open_store(dir.path()).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn init_leaves_existing_store_alone() {
        let dir = tempdir().unwrap();
        {
            let store = open_store(dir.path()).unwrap();
            store.add("mine", "Custom").unwrap();
        }

        run(dir.path()).unwrap();

        let store = open_store(dir.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].text, "mine");
    }
}
