// src/domain/auction.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::core::UserId;

/// The singleton bidding event. At most one auction is "current" at any
/// time; it is loaded from persistence at startup and dropped once ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    /// Absent means "not yet scheduled". Once set it is strictly in the
    /// future at the moment of setting; it falling into the past afterwards
    /// is what drives task triggering.
    #[serde(rename = "endTime")]
    pub end_time: Option<DateTime<Utc>>,
    pub ended: bool,
}

impl Auction {
    pub fn new() -> Self {
        Auction {
            end_time: None,
            ended: false,
        }
    }
}

/// A recorded bid, owned by the external bid tracker. The scheduler only
/// reads the last one at finalization time to notify the winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder: UserId,
    #[serde(rename = "bidderName")]
    pub bidder_name: String,
    pub amount: i64,
    pub at: DateTime<Utc>,
}
