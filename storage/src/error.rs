//! Storage error types

use reforge_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid catalog: {0}")]
    Validation(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
