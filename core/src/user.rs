//! User aggregate
//!
//! Balance, inventory and the pending scan reservation live on one record so
//! that the store can update them together in a single conditional write.

use crate::amount::Amount;
use crate::error::{CoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An owned skin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub id: Uuid,
    pub item_id: String,
    pub float: f64,
    pub obtained_at: DateTime<Utc>,
    pub equipped: bool,
}

impl InventoryEntry {
    pub fn new(item_id: String, float: f64, obtained_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id,
            float,
            obtained_at,
            equipped: false,
        }
    }
}

/// Result of a scan, held until the user claims or discards it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingReservation {
    pub case_id: String,
    pub item_id: String,
    pub float: f64,
    pub scanned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub steam_id: String,
    pub username: String,
    pub avatar: String,
    pub balance: Amount,
    pub inventory: Vec<InventoryEntry>,
    pub cases_opened: u64,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub pending: Option<PendingReservation>,
}

impl User {
    pub fn new(
        steam_id: String,
        username: String,
        avatar: String,
        starting_balance: Amount,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            steam_id,
            username,
            avatar,
            balance: starting_balance,
            inventory: Vec::new(),
            cases_opened: 0,
            created_at: now,
            last_login: now,
            pending: None,
        }
    }

    /// Subtract `amount`, failing without change if the balance is too low
    pub fn debit(&mut self, amount: Amount) -> Result<Amount> {
        let remaining =
            self.balance
                .checked_sub(amount)
                .ok_or(CoreError::InsufficientFunds {
                    required: amount,
                    available: self.balance,
                })?;
        self.balance = remaining;
        Ok(remaining)
    }

    pub fn credit(&mut self, amount: Amount) -> Result<Amount> {
        let total = self
            .balance
            .checked_add(amount)
            .ok_or(CoreError::BalanceOverflow)?;
        self.balance = total;
        Ok(total)
    }

    /// Ensure the balance covers `amount` without changing anything
    pub fn ensure_funds(&self, amount: Amount) -> Result<()> {
        if self.balance < amount {
            return Err(CoreError::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    pub fn append_item(&mut self, entry: InventoryEntry) -> &InventoryEntry {
        self.inventory.push(entry);
        &self.inventory[self.inventory.len() - 1]
    }

    pub fn find_item(&self, entry_id: Uuid) -> Option<&InventoryEntry> {
        self.inventory.iter().find(|entry| entry.id == entry_id)
    }

    /// Remove exactly one entry
    pub fn remove_item(&mut self, entry_id: Uuid) -> Result<InventoryEntry> {
        let position = self
            .inventory
            .iter()
            .position(|entry| entry.id == entry_id)
            .ok_or(CoreError::EntryNotFound(entry_id))?;
        Ok(self.inventory.remove(position))
    }

    /// Store a scan result, replacing any unclaimed one
    pub fn reserve(&mut self, reservation: PendingReservation) -> Option<PendingReservation> {
        self.pending.replace(reservation)
    }

    /// The pending reservation, if it was made for `case_id`
    pub fn reservation_for(&self, case_id: &str) -> Result<&PendingReservation> {
        let pending = self.pending.as_ref().ok_or(CoreError::NoReservation)?;
        if pending.case_id != case_id {
            return Err(CoreError::CaseMismatch {
                reserved: pending.case_id.clone(),
                requested: case_id.to_string(),
            });
        }
        Ok(pending)
    }

    pub fn discard_reservation(&mut self) -> Option<PendingReservation> {
        self.pending.take()
    }
}
