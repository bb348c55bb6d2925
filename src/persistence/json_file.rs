use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use serde_json::{from_str, to_string};

use super::{AuctionStore, PersistenceError};
use crate::domain::Auction;

/// Stores the current auction as a single JSON document on disk. A missing
/// file simply means no auction has been stored yet.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl AuctionStore for JsonFileStore {
    fn load(&self) -> Result<Option<Auction>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut contents = String::new();
        File::open(&self.path)?.read_to_string(&mut contents)?;
        let auction = from_str(&contents)?;
        Ok(Some(auction))
    }

    fn save(&self, auction: &Auction) -> Result<(), PersistenceError> {
        let json = to_string(auction)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
