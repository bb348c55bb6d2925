mod utils;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use auction_butler::config::Config;
use auction_butler::messaging::Messenger;
use auction_butler::persistence::AuctionStore;
use auction_butler::scheduler::{
    executor, reschedule_channel, shared, Scheduler, SchedulerState, Task,
};
use chrono::{Duration, Utc};
use utils::{auction_ending_at, sample_bid, sample_now, MemoryStore, RecordingMessenger};

#[tokio::test(start_paused = true)]
async fn reschedule_interrupts_a_stale_timer() {
    let now = Utc::now();
    let state = shared(SchedulerState::new(Some(auction_ending_at(
        now + Duration::hours(1),
    ))));
    let store = Arc::new(MemoryStore::new());
    let messenger = Arc::new(RecordingMessenger::new());
    let (handle, signal) = reschedule_channel();
    let store_dyn: Arc<dyn AuctionStore> = store.clone();
    let messenger_dyn: Arc<dyn Messenger> = messenger.clone();
    let scheduler = Scheduler::new(
        state.clone(),
        Config::default(),
        store_dyn,
        messenger_dyn,
        signal,
    );
    let loop_handle = tokio::spawn(scheduler.maintain());

    // Let the loop arm its timer for the first reminder without advancing
    // the (paused) clock.
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    // Unschedule the auction behind the loop's back, then wake it.
    state.lock().unwrap().current_auction = None;
    handle.request_reschedule().await;

    // Without the reschedule the armed reminder would have fired well
    // within this window.
    tokio::time::sleep(StdDuration::from_secs(1200)).await;

    assert!(messenger.broadcasts().is_empty());
    assert!(store.saved().is_empty());
    loop_handle.abort();
}

#[tokio::test(start_paused = true)]
async fn full_countdown_finalizes_the_auction() {
    let now = Utc::now();
    let state = shared(SchedulerState::new(Some(auction_ending_at(
        now + Duration::seconds(80),
    ))));
    state.lock().unwrap().last_winning_bid = Some(sample_bid(now));
    let store = Arc::new(MemoryStore::new());
    let messenger = Arc::new(RecordingMessenger::new());
    let (_handle, signal) = reschedule_channel();
    let store_dyn: Arc<dyn AuctionStore> = store.clone();
    let messenger_dyn: Arc<dyn Messenger> = messenger.clone();
    let scheduler = Scheduler::new(
        state.clone(),
        Config::default(),
        store_dyn,
        messenger_dyn,
        signal,
    );
    let loop_handle = tokio::spawn(scheduler.maintain());

    // Twenty counts at 3 s each, plus slack.
    tokio::time::sleep(StdDuration::from_secs(120)).await;

    {
        let state = state.lock().unwrap();
        assert!(!state.running_countdown);
        assert!(state.current_auction.is_none());
    }

    let saved = store.saved();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].ended);

    let privates = messenger.privates();
    assert_eq!(privates.len(), 1);
    assert_eq!(privates[0].0, "bidder-42");
    assert!(privates[0].1.contains("won the auction"));

    // The rules announcement followed by 20 down to 1.
    let broadcasts = messenger.broadcasts();
    assert_eq!(broadcasts.len(), 21);
    assert_eq!(broadcasts[1].1, "20");
    assert_eq!(broadcasts[20].1, "1");

    loop_handle.abort();
}

#[tokio::test]
async fn reminder_broadcasts_the_cached_end_time() {
    let end = sample_now();
    let state = shared(SchedulerState::new(Some(auction_ending_at(end))));
    state.lock().unwrap().cached_end_time = Some(end);
    let store = MemoryStore::new();
    let messenger = RecordingMessenger::new();

    executor::perform(
        Task::ReminderAnnouncement,
        &state,
        &Config::default(),
        &store,
        &messenger,
    )
    .await;

    let broadcasts = messenger.broadcasts();
    assert_eq!(broadcasts.len(), 1);
    assert!(broadcasts[0].1.starts_with("Auction ends @"));
    // Reminders mutate nothing.
    assert!(store.saved().is_empty());
    assert!(state.lock().unwrap().current_auction.is_some());
}

#[tokio::test]
async fn executor_without_a_current_auction_is_a_no_op() {
    let state = shared(SchedulerState::new(None));
    let store = MemoryStore::new();
    let messenger = RecordingMessenger::new();

    executor::perform(
        Task::StartCountdown,
        &state,
        &Config::default(),
        &store,
        &messenger,
    )
    .await;

    assert!(messenger.broadcasts().is_empty());
    assert!(store.saved().is_empty());
}
