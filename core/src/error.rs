//! Core error types

use crate::Amount;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientFunds { required: Amount, available: Amount },

    #[error("Balance overflow")]
    BalanceOverflow,

    #[error("Inventory entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("No scanned item found")]
    NoReservation,

    #[error("Case mismatch: scanned {reserved}, claimed {requested}")]
    CaseMismatch { reserved: String, requested: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown rarity: {0}")]
    UnknownRarity(String),

    #[error("Invalid catalog record: {0}")]
    InvalidCatalog(String),

    #[error("Catalog is empty")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, CoreError>;
