//! CS Reforge Storage Layer
//!
//! Embedded `sled` document store:
//! - `items` / `cases` trees hold the catalog as JSON documents
//! - `users` tree holds bincode-encoded user records
//! - user mutations go through compare-and-swap so a failed business check
//!   never writes and concurrent requests never lose an update

pub mod db;
pub mod error;
pub mod seed;

pub use db::{CaseContents, Database, ImportReport};
pub use error::{Result, StoreError};
pub use seed::{load_seed, save_seed};
