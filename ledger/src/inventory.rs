//! Inventory views, equipping and trade-ups

use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::outcome::{InventoryItem, TradeUpOutcome};
use chrono::Utc;
use rand::Rng;
use reforge_core::selector::{self, INVENTORY_FLOAT_PRECISION};
use reforge_core::{InventoryEntry, Item};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use uuid::Uuid;

impl<R: Rng> Ledger<R> {
    /// All owned entries joined with their catalog item.
    ///
    /// Entries whose item has left the catalog are skipped.
    pub fn inventory(&self, steam_id: &str) -> Result<Vec<InventoryItem>> {
        let user = self.user(steam_id)?;
        let mut items = Vec::with_capacity(user.inventory.len());
        for entry in &user.inventory {
            match self.db.get_item(&entry.item_id)? {
                Some(item) => items.push(InventoryItem::new(entry, item)),
                None => debug!(steam_id, item_id = %entry.item_id, "skipping retired item"),
            }
        }
        Ok(items)
    }

    /// Equip one entry, unequipping any other entry for the same weapon
    pub fn equip(&self, steam_id: &str, entry_id: Uuid) -> Result<()> {
        let user = self.user(steam_id)?;
        let entry = user
            .find_item(entry_id)
            .ok_or_else(|| LedgerError::ItemNotFound(entry_id.to_string()))?;
        let item = self
            .db
            .get_item(&entry.item_id)?
            .ok_or_else(|| LedgerError::SkinNotFound(entry.item_id.clone()))?;

        // item id -> weapon, for every equipped entry's item
        let mut weapons: HashMap<String, String> = HashMap::new();
        self.update(steam_id, |user| {
            if user.find_item(entry_id).is_none() {
                return Err(LedgerError::ItemNotFound(entry_id.to_string()));
            }

            for other in user.inventory.iter_mut() {
                if other.id == entry_id {
                    other.equipped = true;
                    continue;
                }
                if !other.equipped {
                    continue;
                }
                if !weapons.contains_key(&other.item_id) {
                    let weapon = self
                        .db
                        .get_item(&other.item_id)?
                        .map(|i| i.weapon)
                        .unwrap_or_default();
                    weapons.insert(other.item_id.clone(), weapon);
                }
                if weapons[&other.item_id] == item.weapon {
                    other.equipped = false;
                }
            }
            Ok(())
        })?;

        info!(steam_id, %entry_id, weapon = %item.weapon, "item equipped");
        Ok(())
    }

    /// Exchange owned entries of one rarity for a random item of the next
    pub fn trade_up(&self, steam_id: &str, entry_ids: &[Uuid]) -> Result<TradeUpOutcome> {
        if entry_ids.is_empty() {
            return Err(LedgerError::InvalidInput(
                "at least one item is required".to_string(),
            ));
        }
        let distinct: HashSet<Uuid> = entry_ids.iter().copied().collect();
        if distinct.len() != entry_ids.len() {
            return Err(LedgerError::InvalidInput(
                "duplicate items in trade-up".to_string(),
            ));
        }

        let user = self.user(steam_id)?;
        let mut inputs: Vec<Item> = Vec::with_capacity(entry_ids.len());
        for id in entry_ids {
            let entry = user
                .find_item(*id)
                .ok_or_else(|| LedgerError::ItemNotFound(id.to_string()))?;
            let item = self
                .db
                .get_item(&entry.item_id)?
                .ok_or_else(|| LedgerError::SkinNotFound(entry.item_id.clone()))?;
            inputs.push(item);
        }

        let rarity = inputs[0].rarity;
        if inputs.iter().any(|item| item.rarity != rarity) {
            return Err(LedgerError::InvalidInput(
                "all items must have the same rarity".to_string(),
            ));
        }
        let next = rarity.next().ok_or_else(|| {
            LedgerError::InvalidInput(format!(
                "cannot trade up {} items",
                rarity.display_name()
            ))
        })?;

        let candidates = self.db.items_by_rarity(next)?;
        let pool: Vec<&Item> = candidates.iter().collect();
        let (granted_item, float) = {
            let mut rng = self.rng.lock();
            let item = selector::pick_uniform(&pool, &mut *rng).ok_or_else(|| {
                LedgerError::SkinNotFound(format!("no {} items available", next.display_name()))
            })?;
            let float = selector::roll_float(item, INVENTORY_FLOAT_PRECISION, &mut *rng);
            (item.clone(), float)
        };

        let granted = InventoryEntry::new(granted_item.id.clone(), float, Utc::now());
        self.update(steam_id, |user| {
            for id in entry_ids {
                user.remove_item(*id)?;
            }
            user.append_item(granted.clone());
            Ok(())
        })?;

        info!(
            steam_id,
            consumed = entry_ids.len(),
            from = rarity.as_str(),
            item_id = %granted_item.id,
            "trade-up completed"
        );

        Ok(TradeUpOutcome {
            consumed: entry_ids.to_vec(),
            granted: InventoryItem::new(&granted, granted_item),
        })
    }
}
