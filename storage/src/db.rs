//! Sled-based persistence for catalog and user records

use crate::error::{Result, StoreError};
use chrono::Utc;
use reforge_core::{Amount, Case, CaseEntry, CatalogSeed, Item, Rarity, User};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

const ITEMS_TREE: &str = "items";
const CASES_TREE: &str = "cases";
const USERS_TREE: &str = "users";

#[derive(Debug, Clone)]
pub struct Database {
    db: sled::Db,
    items: sled::Tree,
    cases: sled::Tree,
    users: sled::Tree,
    path: Option<String>,
}

/// A case with its slots resolved against the item catalog, in declared order
#[derive(Debug, Clone)]
pub struct CaseContents {
    pub case: Case,
    pub items: Vec<(Item, Option<f64>)>,
}

impl CaseContents {
    pub fn entries(&self) -> Vec<CaseEntry<'_>> {
        self.items
            .iter()
            .map(|(item, drop_chance)| CaseEntry {
                item,
                drop_chance: *drop_chance,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub items: usize,
    pub cases: usize,
}

impl Database {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let db = sled::open(&path)?;
        Self::from_db(db, Some(path_str))
    }

    /// In-memory database removed on drop, used by tests and dry runs
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db, None)
    }

    fn from_db(db: sled::Db, path: Option<String>) -> Result<Self> {
        Ok(Database {
            items: db.open_tree(ITEMS_TREE)?,
            cases: db.open_tree(CASES_TREE)?,
            users: db.open_tree(USERS_TREE)?,
            db,
            path,
        })
    }

    /// Get the database path, `None` for temporary databases
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    // Catalog

    /// Validate and write a seed document, replacing records with the same id
    pub fn import_catalog(&self, seed: &CatalogSeed) -> Result<ImportReport> {
        let known: HashSet<String> = self
            .items
            .iter()
            .keys()
            .filter_map(|k| k.ok())
            .map(|k| String::from_utf8_lossy(&k).to_string())
            .collect();
        seed.validate(&known)?;

        let mut items = sled::Batch::default();
        for item in &seed.items {
            items.insert(item.id.as_bytes(), to_json(item)?);
        }
        let mut cases = sled::Batch::default();
        for case in &seed.cases {
            cases.insert(case.id.as_bytes(), to_json(case)?);
        }

        self.items.apply_batch(items)?;
        self.cases.apply_batch(cases)?;

        // Flush to ensure the catalog survives a restart
        self.db.flush()?;

        let report = ImportReport {
            items: seed.items.len(),
            cases: seed.cases.len(),
        };
        info!(items = report.items, cases = report.cases, "catalog imported");
        Ok(report)
    }

    /// Dump the current catalog as a seed document
    pub fn export_catalog(&self) -> Result<CatalogSeed> {
        Ok(CatalogSeed {
            items: self.all_items()?,
            cases: self.all_cases()?,
        })
    }

    pub fn get_item(&self, id: &str) -> Result<Option<Item>> {
        match self.items.get(id.as_bytes())? {
            Some(data) => Ok(Some(from_json(&data)?)),
            None => Ok(None),
        }
    }

    pub fn all_items(&self) -> Result<Vec<Item>> {
        self.items
            .iter()
            .values()
            .map(|value| from_json(&value?))
            .collect()
    }

    pub fn items_by_rarity(&self, rarity: Rarity) -> Result<Vec<Item>> {
        Ok(self
            .all_items()?
            .into_iter()
            .filter(|item| item.rarity == rarity)
            .collect())
    }

    pub fn get_case(&self, id: &str) -> Result<Option<Case>> {
        match self.cases.get(id.as_bytes())? {
            Some(data) => Ok(Some(from_json(&data)?)),
            None => Ok(None),
        }
    }

    pub fn all_cases(&self) -> Result<Vec<Case>> {
        self.cases
            .iter()
            .values()
            .map(|value| from_json(&value?))
            .collect()
    }

    /// Load a case and resolve each slot to its item.
    ///
    /// Slots pointing at items that are no longer in the catalog are skipped.
    pub fn case_contents(&self, id: &str) -> Result<Option<CaseContents>> {
        let Some(case) = self.get_case(id)? else {
            return Ok(None);
        };

        let mut items = Vec::with_capacity(case.items.len());
        for slot in &case.items {
            match self.get_item(&slot.item_id)? {
                Some(item) => items.push((item, slot.drop_chance)),
                None => warn!(case_id = %case.id, item_id = %slot.item_id, "case references missing item"),
            }
        }

        Ok(Some(CaseContents { case, items }))
    }

    // Users

    pub fn get_user(&self, steam_id: &str) -> Result<Option<User>> {
        match self.users.get(steam_id.as_bytes())? {
            Some(data) => Ok(Some(decode_user(&data)?)),
            None => Ok(None),
        }
    }

    /// Create the user on first login, otherwise refresh profile fields.
    ///
    /// Returns the stored user and whether it was created.
    pub fn login_user(
        &self,
        steam_id: &str,
        username: &str,
        avatar: &str,
        starting_balance: Amount,
    ) -> Result<(User, bool)> {
        let key = steam_id.as_bytes();
        loop {
            let current = self.users.get(key)?;
            let now = Utc::now();

            let (user, created) = match &current {
                None => (
                    User::new(
                        steam_id.to_string(),
                        username.to_string(),
                        avatar.to_string(),
                        starting_balance,
                        now,
                    ),
                    true,
                ),
                Some(data) => {
                    let mut user = decode_user(data)?;
                    user.username = username.to_string();
                    user.avatar = avatar.to_string();
                    user.last_login = now;
                    (user, false)
                }
            };

            let encoded = encode_user(&user)?;
            match self
                .users
                .compare_and_swap(key, current.as_deref(), Some(encoded))?
            {
                Ok(()) => return Ok((user, created)),
                Err(_) => debug!(steam_id, "login raced with another update, retrying"),
            }
        }
    }

    /// Apply `mutate` to the user record as one conditional write.
    ///
    /// The closure runs against a fresh copy of the record; if it returns an
    /// error nothing is written. If another writer changed the record in the
    /// meantime the closure is re-run on the new value. Returns `Ok(None)` when
    /// the user does not exist.
    pub fn update_user<T, E, F>(
        &self,
        steam_id: &str,
        mut mutate: F,
    ) -> std::result::Result<Option<(User, T)>, E>
    where
        F: FnMut(&mut User) -> std::result::Result<T, E>,
        E: From<StoreError>,
    {
        let key = steam_id.as_bytes();
        let mut attempts = 0u32;
        loop {
            let Some(current) = self.users.get(key).map_err(StoreError::from)? else {
                return Ok(None);
            };

            let mut user = decode_user(&current)?;
            let outcome = mutate(&mut user)?;
            let encoded = encode_user(&user)?;

            match self
                .users
                .compare_and_swap(key, Some(&current[..]), Some(encoded))
                .map_err(StoreError::from)?
            {
                Ok(()) => return Ok(Some((user, outcome))),
                Err(_) => {
                    attempts += 1;
                    if attempts % 16 == 0 {
                        warn!(steam_id, attempts, "user update contended");
                    }
                }
            }
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| StoreError::SerializationError(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
    serde_json::from_slice(data).map_err(|e| StoreError::SerializationError(e.to_string()))
}

fn encode_user(user: &User) -> Result<Vec<u8>> {
    bincode::serialize(user).map_err(|e| StoreError::SerializationError(e.to_string()))
}

fn decode_user(data: &[u8]) -> Result<User> {
    bincode::deserialize(data).map_err(|e| StoreError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reforge_core::{CaseItem, CoreError, InventoryEntry};

    fn item(id: &str, rarity: Rarity) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            weapon: "AWP".to_string(),
            rarity,
            price: Amount::from_units(100),
            min_float: 0.0,
            max_float: 0.5,
            image_url: String::new(),
        }
    }

    fn seed() -> CatalogSeed {
        CatalogSeed {
            items: vec![
                item("awp_graphite", Rarity::Covert),
                item("p90_emerald", Rarity::Classified),
            ],
            cases: vec![Case {
                id: "bravo".to_string(),
                name: "Operation Bravo Case".to_string(),
                description: String::new(),
                price: Amount::from_units(80),
                image_url: String::new(),
                items: vec![
                    CaseItem {
                        item_id: "awp_graphite".to_string(),
                        drop_chance: Some(10.0),
                    },
                    CaseItem {
                        item_id: "p90_emerald".to_string(),
                        drop_chance: Some(90.0),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_import_and_read_catalog() {
        let db = Database::temporary().unwrap();
        let report = db.import_catalog(&seed()).unwrap();
        assert_eq!(report, ImportReport { items: 2, cases: 1 });

        assert_eq!(db.all_items().unwrap().len(), 2);
        assert_eq!(db.items_by_rarity(Rarity::Covert).unwrap().len(), 1);
        assert!(db.get_item("missing").unwrap().is_none());

        let contents = db.case_contents("bravo").unwrap().unwrap();
        let ids: Vec<&str> = contents.items.iter().map(|(i, _)| i.id.as_str()).collect();
        assert_eq!(ids, vec!["awp_graphite", "p90_emerald"]);
        assert_eq!(contents.entries()[1].drop_chance, Some(90.0));
    }

    #[test]
    fn test_import_rejects_invalid_seed() {
        let db = Database::temporary().unwrap();
        let mut bad = seed();
        bad.items[0].min_float = 0.9;

        assert!(matches!(
            db.import_catalog(&bad),
            Err(StoreError::Validation(CoreError::InvalidCatalog(_)))
        ));
        assert!(db.all_items().unwrap().is_empty());
    }

    #[test]
    fn test_import_can_reference_existing_items() {
        let db = Database::temporary().unwrap();
        db.import_catalog(&seed()).unwrap();

        let extra = CatalogSeed {
            items: vec![],
            cases: vec![Case {
                id: "awp_only".to_string(),
                name: "AWP Case".to_string(),
                description: String::new(),
                price: Amount::from_units(5),
                image_url: String::new(),
                items: vec![CaseItem {
                    item_id: "awp_graphite".to_string(),
                    drop_chance: None,
                }],
            }],
        };
        db.import_catalog(&extra).unwrap();
        assert_eq!(db.all_cases().unwrap().len(), 2);
    }

    #[test]
    fn test_login_creates_then_refreshes() {
        let db = Database::temporary().unwrap();
        let (user, created) = db
            .login_user("7656", "Player_07656", "", Amount::from_units(100))
            .unwrap();
        assert!(created);
        assert_eq!(user.balance, Amount::from_units(100));

        let (user, created) = db
            .login_user("7656", "renamed", "avatar.jpg", Amount::from_units(999))
            .unwrap();
        assert!(!created);
        assert_eq!(user.username, "renamed");
        // starting balance only applies on creation
        assert_eq!(user.balance, Amount::from_units(100));
        assert_eq!(db.user_count(), 1);
    }

    #[test]
    fn test_update_user_rejection_writes_nothing() {
        let db = Database::temporary().unwrap();
        db.login_user("7656", "p", "", Amount::from_units(5)).unwrap();

        let result = db.update_user("7656", |user| -> std::result::Result<(), StoreError> {
            user.append_item(InventoryEntry::new("awp_graphite".to_string(), 0.1, Utc::now()));
            user.debit(Amount::from_units(80))?;
            Ok(())
        });
        assert!(result.is_err());

        let stored = db.get_user("7656").unwrap().unwrap();
        assert_eq!(stored.balance, Amount::from_units(5));
        assert!(stored.inventory.is_empty());
    }

    #[test]
    fn test_update_missing_user() {
        let db = Database::temporary().unwrap();
        let result: std::result::Result<_, StoreError> = db.update_user("nobody", |_| Ok(()));
        assert!(result.unwrap().is_none());
    }
}
