//! CS Reforge Ledger
//!
//! Business operations on top of the store: buying and scanning cases,
//! claiming reservations, selling, equipping and trading up. Each operation
//! is one atomic update of the user record.

pub mod catalog;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod outcome;
pub mod pricing;

pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use outcome::{
    CaseDetails, CaseSlot, InventoryItem, OpenOutcome, Profile, SaleOutcome, ScanOutcome,
    TradeUpOutcome,
};
pub use pricing::EconomyConfig;
