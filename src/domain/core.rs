// src/domain/core.rs
use chrono::{DateTime, Utc};
use thiserror::Error;

pub type UserId = String;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Errors {
    #[error("unsupported datetime format: {0}")]
    UnsupportedDateTime(String),

    #[error("{0} is in the past")]
    PastTime(DateTime<Utc>),

    #[error("no auction is scheduled")]
    NoCurrentAuction,

    #[error("an auction is already scheduled to end at {0}")]
    AuctionAlreadyScheduled(DateTime<Utc>),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("failed to store auction: {0}")]
    Persistence(String),
}

impl From<crate::persistence::PersistenceError> for Errors {
    fn from(err: crate::persistence::PersistenceError) -> Self {
        Errors::Persistence(err.to_string())
    }
}
