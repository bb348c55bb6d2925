// src/persistence/mod.rs
pub mod json_file;

use thiserror::Error;

use crate::domain::Auction;

pub use self::json_file::JsonFileStore;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access auction file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode auction: {0}")]
    Format(#[from] serde_json::Error),
}

/// Load/save contract for the current auction. Callers never assume
/// success; command-driven save failures are reported to the requester
/// before any reschedule is signalled.
pub trait AuctionStore: Send + Sync {
    fn load(&self) -> Result<Option<Auction>, PersistenceError>;
    fn save(&self, auction: &Auction) -> Result<(), PersistenceError>;
}
