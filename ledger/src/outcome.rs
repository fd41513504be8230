//! Operation results returned to callers

use chrono::{DateTime, Utc};
use reforge_core::{Amount, Case, InventoryEntry, Item, PendingReservation, User};
use serde::Serialize;
use uuid::Uuid;

/// Result of opening a case or claiming a scanned item
#[derive(Debug, Clone, Serialize)]
pub struct OpenOutcome {
    pub entry_id: Uuid,
    pub item: Item,
    pub float: f64,
    pub new_balance: Amount,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub item: Item,
    pub float: f64,
    pub scan_fee: Amount,
    pub new_balance: Amount,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleOutcome {
    pub entry_id: Uuid,
    pub sold_for: Amount,
    pub new_balance: Amount,
}

/// An inventory entry joined with its catalog record
#[derive(Debug, Clone, Serialize)]
pub struct InventoryItem {
    pub entry_id: Uuid,
    pub item: Item,
    pub float: f64,
    pub obtained_at: DateTime<Utc>,
    pub equipped: bool,
}

impl InventoryItem {
    pub fn new(entry: &InventoryEntry, item: Item) -> Self {
        Self {
            entry_id: entry.id,
            item,
            float: entry.float,
            obtained_at: entry.obtained_at,
            equipped: entry.equipped,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TradeUpOutcome {
    pub consumed: Vec<Uuid>,
    pub granted: InventoryItem,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub steam_id: String,
    pub username: String,
    pub avatar: String,
    pub balance: Amount,
    pub inventory_count: usize,
    pub cases_opened: u64,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub pending: Option<PendingReservation>,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            steam_id: user.steam_id.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            balance: user.balance,
            inventory_count: user.inventory.len(),
            cases_opened: user.cases_opened,
            created_at: user.created_at,
            last_login: user.last_login,
            pending: user.pending.clone(),
        }
    }
}

/// Case slot resolved to its item
#[derive(Debug, Clone, Serialize)]
pub struct CaseSlot {
    pub item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_chance: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseDetails {
    #[serde(flatten)]
    pub case: Case,
    pub slots: Vec<CaseSlot>,
}
