//! Catalog seed files
//!
//! A seed is a JSON document `{ "items": [...], "cases": [...] }`. Loading
//! only parses; validation happens in `Database::import_catalog`.

use crate::error::{Result, StoreError};
use reforge_core::CatalogSeed;
use std::fs;
use std::path::Path;

/// Read a seed document from disk
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<CatalogSeed> {
    let data = fs::read_to_string(path.as_ref())?;
    serde_json::from_str(&data).map_err(|e| StoreError::SerializationError(e.to_string()))
}

/// Write a seed document as pretty-printed JSON, creating parent directories
pub fn save_seed<P: AsRef<Path>>(path: P, seed: &CatalogSeed) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(seed)
        .map_err(|e| StoreError::SerializationError(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use reforge_core::{Amount, Item, Rarity};
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seeds").join("catalog.json");

        let seed = CatalogSeed {
            items: vec![Item {
                id: "glock_fade".to_string(),
                name: "Glock-18 | Fade".to_string(),
                weapon: "Glock-18".to_string(),
                rarity: Rarity::Restricted,
                price: Amount::from_cents(4599),
                min_float: 0.0,
                max_float: 0.08,
                image_url: String::new(),
            }],
            cases: vec![],
        };

        save_seed(&path, &seed).unwrap();
        let loaded = load_seed(&path).unwrap();
        assert_eq!(seed, loaded);

        let db = Database::temporary().unwrap();
        db.import_catalog(&loaded).unwrap();
        assert_eq!(db.export_catalog().unwrap(), seed);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_seed("/nonexistent/reforge/catalog.json"),
            Err(StoreError::IoError(_))
        ));
    }
}
