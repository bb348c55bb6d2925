use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use auction_butler::config::Config;
use auction_butler::domain::{Auction, Bid, UserId};
use auction_butler::messaging::{MessageFormat, Messenger};
use auction_butler::persistence::{AuctionStore, PersistenceError};
use auction_butler::scheduler::SchedulerState;
// See https://users.rust-lang.org/t/sharing-code-and-macros-in-tests-directory/3098/7

pub fn sample_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
}

pub fn auction_ending_at(end: DateTime<Utc>) -> Auction {
    Auction {
        end_time: Some(end),
        ended: false,
    }
}

pub fn state_ending_at(end: DateTime<Utc>) -> SchedulerState {
    SchedulerState::new(Some(auction_ending_at(end)))
}

pub fn sample_config() -> Config {
    Config {
        reminder_announce_interval_secs: 300,
        countdown_from: 20,
    }
}

pub fn sample_bid(at: DateTime<Utc>) -> Bid {
    Bid {
        bidder: "bidder-42".to_string(),
        bidder_name: "Erich".to_string(),
        amount: 120,
        at,
    }
}

/// In-memory store recording every save, optionally failing them.
#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<Vec<Auction>>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        MemoryStore {
            saved: Mutex::new(Vec::new()),
            fail_saves: true,
        }
    }

    pub fn saved(&self) -> Vec<Auction> {
        self.saved.lock().unwrap().clone()
    }
}

impl AuctionStore for MemoryStore {
    fn load(&self) -> Result<Option<Auction>, PersistenceError> {
        Ok(self.saved.lock().unwrap().last().cloned())
    }

    fn save(&self, auction: &Auction) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk unplugged",
            )));
        }
        self.saved.lock().unwrap().push(auction.clone());
        Ok(())
    }
}

/// Messenger capturing everything that would have gone out to chat.
#[derive(Default)]
pub struct RecordingMessenger {
    broadcasts: Mutex<Vec<(MessageFormat, String)>>,
    privates: Mutex<Vec<(UserId, String)>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broadcasts(&self) -> Vec<(MessageFormat, String)> {
        self.broadcasts.lock().unwrap().clone()
    }

    pub fn privates(&self) -> Vec<(UserId, String)> {
        self.privates.lock().unwrap().clone()
    }
}

impl Messenger for RecordingMessenger {
    fn broadcast(&self, format: MessageFormat, text: &str) {
        self.broadcasts
            .lock()
            .unwrap()
            .push((format, text.to_string()));
    }

    fn send_private(&self, recipient: &UserId, text: &str) {
        self.privates
            .lock()
            .unwrap()
            .push((recipient.clone(), text.to_string()));
    }
}
