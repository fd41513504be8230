//! Catalog records
//!
//! Items (skins) and cases are immutable at request time. Every record that
//! enters the store goes through `validate` first.

use crate::amount::Amount;
use crate::error::{CoreError, Result};
use crate::rarity::Rarity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A catalog skin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub weapon: String,
    pub rarity: Rarity,
    pub price: Amount,
    #[serde(default)]
    pub min_float: f64,
    #[serde(default = "default_max_float")]
    pub max_float: f64,
    #[serde(default)]
    pub image_url: String,
}

fn default_max_float() -> f64 {
    1.0
}

impl Item {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidCatalog("item id is empty".to_string()));
        }
        if self.price.is_zero() {
            return Err(CoreError::InvalidCatalog(format!(
                "item {} has zero price",
                self.id
            )));
        }

        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(self.min_float) || !in_unit(self.max_float) || self.min_float > self.max_float
        {
            return Err(CoreError::InvalidCatalog(format!(
                "item {} has invalid float range [{}, {}]",
                self.id, self.min_float, self.max_float
            )));
        }

        Ok(())
    }

    /// Whether a realized wear value lies inside this item's range
    pub fn contains_float(&self, float: f64) -> bool {
        float >= self.min_float && float <= self.max_float
    }
}

/// One item slot of a case, optionally with an explicit drop weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseItem {
    pub item_id: String,
    #[serde(default)]
    pub drop_chance: Option<f64>,
}

/// A purchasable case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Amount,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub items: Vec<CaseItem>,
}

impl Case {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidCatalog("case id is empty".to_string()));
        }
        if self.price.is_zero() {
            return Err(CoreError::InvalidCatalog(format!(
                "case {} has zero price",
                self.id
            )));
        }

        for slot in &self.items {
            if let Some(weight) = slot.drop_chance {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(CoreError::InvalidCatalog(format!(
                        "case {} has invalid drop chance {} for {}",
                        self.id, weight, slot.item_id
                    )));
                }
            }
        }

        Ok(())
    }

    /// True when any slot declares a drop chance
    pub fn has_explicit_weights(&self) -> bool {
        self.items.iter().any(|slot| slot.drop_chance.is_some())
    }
}

/// Seed document used to populate the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub cases: Vec<Case>,
}

impl CatalogSeed {
    /// Validate every record and check that case slots reference known items.
    ///
    /// `known_items` are ids already present in the store.
    pub fn validate(&self, known_items: &HashSet<String>) -> Result<()> {
        let mut ids = HashSet::new();
        for item in &self.items {
            item.validate()?;
            if !ids.insert(item.id.as_str()) {
                return Err(CoreError::InvalidCatalog(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
        }

        let mut case_ids = HashSet::new();
        for case in &self.cases {
            case.validate()?;
            if !case_ids.insert(case.id.as_str()) {
                return Err(CoreError::InvalidCatalog(format!(
                    "duplicate case id {}",
                    case.id
                )));
            }
            for slot in &case.items {
                if !ids.contains(slot.item_id.as_str()) && !known_items.contains(&slot.item_id) {
                    return Err(CoreError::InvalidCatalog(format!(
                        "case {} references unknown item {}",
                        case.id, slot.item_id
                    )));
                }
            }
        }

        Ok(())
    }
}
