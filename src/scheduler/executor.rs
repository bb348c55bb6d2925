// src/scheduler/executor.rs
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use log::{error, warn};
use tokio::time;

use super::{SharedState, Task};
use crate::config::Config;
use crate::messaging::{MessageFormat, Messenger};
use crate::persistence::AuctionStore;

/// Seconds between countdown numbers.
const COUNTDOWN_TICK: StdDuration = StdDuration::from_secs(3);

/// Execute a scheduled task. `Nothing` and `EndAuction` are sentinels that
/// the refined policy never hands over; they are logged no-ops here.
pub async fn perform(
    task: Task,
    state: &SharedState,
    config: &Config,
    store: &dyn AuctionStore,
    messenger: &dyn Messenger,
) {
    {
        let state = state.lock().unwrap();
        if state.current_auction.is_none() {
            error!("failed to perform the scheduled task: no current auction");
            return;
        }
    }

    match task {
        Task::ReminderAnnouncement => announce_reminder(state, messenger),
        Task::StartCountdown => run_countdown(state, config, store, messenger).await,
        Task::Nothing | Task::EndAuction => {
            warn!("unsupported task to perform: {:?}", task);
        }
    }
}

fn announce_reminder(state: &SharedState, messenger: &dyn Messenger) {
    let end = state.lock().unwrap().cached_end_time;
    match end {
        Some(end) => messenger.broadcast(
            MessageFormat::Html,
            &format!("Auction ends @{}", nice_time(end)),
        ),
        None => warn!("reminder scheduled without a cached end time"),
    }
}

/// Announce the rules, count down to 1 and finalize the auction. Blocks
/// the scheduling loop for the full duration: nothing else may happen
/// while the countdown runs.
async fn run_countdown(
    state: &SharedState,
    config: &Config,
    store: &dyn AuctionStore,
    messenger: &dyn Messenger,
) {
    // Idempotent with the early flag set in the escalation rule.
    state.lock().unwrap().running_countdown = true;

    messenger.broadcast(
        MessageFormat::Html,
        &format!(
            "<i>Alright everyone, get your bids together and be prepared. \
             I'm going to count down from {} to 1. The last highest bid in \
             the countdown wins the auction. Good luck!</i>",
            config.countdown_from
        ),
    );
    for i in (1..=config.countdown_from).rev() {
        time::sleep(COUNTDOWN_TICK).await;
        messenger.broadcast(MessageFormat::Text, &i.to_string());
    }

    let (ended, last_bid) = {
        let mut state = state.lock().unwrap();
        state.running_countdown = false;
        let auction = match state.current_auction.take() {
            Some(mut auction) => {
                auction.ended = true;
                auction
            }
            None => {
                error!("auction disappeared during the countdown");
                return;
            }
        };
        (auction, state.last_winning_bid.clone())
    };

    if let Err(err) = store.save(&ended) {
        // No interactive caller to report to at this point.
        error!("failed to persist the ended auction: {}", err);
    }

    match last_bid {
        Some(bid) => messenger.send_private(
            &bid.bidder,
            &format!(
                "Congratulations {}, you've won the auction! Please contact \
                 the auctioneer for the details on how to claim your item.",
                bid.bidder_name
            ),
        ),
        None => warn!("auction ended without any recorded bid"),
    }
}

/// Human-readable rendering of an end time for chat display.
pub fn nice_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S UTC on %A, %d %B %Y").to_string()
}
