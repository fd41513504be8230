//! Read-only catalog queries

use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::outcome::{CaseDetails, CaseSlot};
use rand::Rng;
use reforge_core::{Case, CatalogSeed, Item, Rarity};
use reforge_storage::ImportReport;

impl<R: Rng> Ledger<R> {
    pub fn list_cases(&self) -> Result<Vec<Case>> {
        Ok(self.db.all_cases()?)
    }

    /// A case with its slots resolved in declared order
    pub fn case_details(&self, case_id: &str) -> Result<CaseDetails> {
        let contents = self.case_contents(case_id)?;
        let slots = contents
            .items
            .into_iter()
            .map(|(item, drop_chance)| CaseSlot { item, drop_chance })
            .collect();
        Ok(CaseDetails {
            case: contents.case,
            slots,
        })
    }

    pub fn get_item(&self, item_id: &str) -> Result<Item> {
        self.db
            .get_item(item_id)?
            .ok_or_else(|| LedgerError::SkinNotFound(item_id.to_string()))
    }

    pub fn items_by_rarity(&self, rarity: Rarity) -> Result<Vec<Item>> {
        Ok(self.db.items_by_rarity(rarity)?)
    }

    pub fn all_items(&self) -> Result<Vec<Item>> {
        Ok(self.db.all_items()?)
    }

    pub fn import_catalog(&self, seed: &CatalogSeed) -> Result<ImportReport> {
        Ok(self.db.import_catalog(seed)?)
    }
}
