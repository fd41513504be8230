//! CS Reforge Core
//!
//! Domain model for the case economy:
//! - Fixed-point currency amounts
//! - Rarity tiers and their drop probabilities
//! - Catalog records (items, cases) validated at the store boundary
//! - User aggregate with balance, inventory and pending scan reservation
//! - Weighted reward selection

pub mod amount;
pub mod catalog;
pub mod error;
pub mod rarity;
pub mod selector;
pub mod user;

pub use amount::Amount;
pub use catalog::{Case, CaseItem, CatalogSeed, Item};
pub use error::{CoreError, Result};
pub use rarity::{Rarity, RARITY_TABLE};
pub use selector::{CaseEntry, Drop, DrawMode};
pub use user::{InventoryEntry, PendingReservation, User};
