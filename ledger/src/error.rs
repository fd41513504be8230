//! Ledger error types

use reforge_core::{Amount, CoreError};
use reforge_storage::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Case not found: {0}")]
    CaseNotFound(String),

    #[error("Skin not found: {0}")]
    SkinNotFound(String),

    #[error("Inventory item not found: {0}")]
    ItemNotFound(String),

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientFunds { required: Amount, available: Amount },

    #[error("No scanned item found")]
    NoReservation,

    #[error("Case mismatch: scanned {reserved}, claimed {requested}")]
    CaseMismatch { reserved: String, requested: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<CoreError> for LedgerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientFunds {
                required,
                available,
            } => LedgerError::InsufficientFunds {
                required,
                available,
            },
            CoreError::EntryNotFound(id) => LedgerError::ItemNotFound(id.to_string()),
            CoreError::NoReservation => LedgerError::NoReservation,
            CoreError::CaseMismatch {
                reserved,
                requested,
            } => LedgerError::CaseMismatch {
                reserved,
                requested,
            },
            CoreError::EmptyCatalog => LedgerError::Internal(err.to_string()),
            CoreError::BalanceOverflow
            | CoreError::InvalidAmount(_)
            | CoreError::UnknownRarity(_)
            | CoreError::InvalidCatalog(_) => LedgerError::InvalidInput(err.to_string()),
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            // Business checks raised inside a conditional update
            StoreError::Validation(core) => core.into(),
            other => LedgerError::Storage(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
