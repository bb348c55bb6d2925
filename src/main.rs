use std::sync::Arc;

use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use auction_butler::commands::{dispatch, CommandContext};
use auction_butler::config::Config;
use auction_butler::messaging::{ConsoleMessenger, Messenger};
use auction_butler::persistence::{AuctionStore, JsonFileStore};
use auction_butler::scheduler::{reschedule_channel, shared, Scheduler, SchedulerState};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = match Config::load("butler.json") {
        Ok(config) => config,
        Err(err) => {
            warn!("using default config: {}", err);
            Config::default()
        }
    };

    let store: Arc<dyn AuctionStore> = Arc::new(JsonFileStore::new("auction.json"));
    let current = match store.load() {
        Ok(auction) => auction,
        Err(err) => {
            error!("failed to load the stored auction: {}", err);
            None
        }
    };
    // A finished auction on disk is history, not a current auction.
    let current = current.filter(|auction| !auction.ended);
    let state = shared(SchedulerState::new(current));

    let messenger: Arc<dyn Messenger> = Arc::new(ConsoleMessenger);
    let (reschedule, signal) = reschedule_channel();
    let scheduler = Scheduler::new(
        state.clone(),
        config.clone(),
        store.clone(),
        messenger,
        signal,
    );
    tokio::spawn(scheduler.maintain());

    info!("auction butler is up; type /help for commands");

    // Minimal operator console standing in for the chat transport.
    let ctx = CommandContext {
        state: &state,
        store: store.as_ref(),
        reschedule: &reschedule,
        admin: true,
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let body = match line.strip_prefix('/') {
            Some(body) => body,
            None => continue,
        };
        let (command, args) = body.split_once(' ').unwrap_or((body, ""));
        match dispatch(&ctx, command, args.trim()).await {
            Ok(reply) => println!("{}", reply),
            Err(err) => println!("{}", err),
        }
    }

    Ok(())
}
