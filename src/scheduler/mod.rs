// src/scheduler/mod.rs
pub mod executor;
pub mod policy;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::time;

use crate::config::Config;
use crate::domain::{Auction, Bid};
use crate::messaging::Messenger;
use crate::persistence::AuctionStore;

/// The unit of scheduled work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Nothing,
    EndAuction,
    ReminderAnnouncement,
    StartCountdown,
}

/// Process-wide mutable state co-located with the current auction. Created
/// at startup, mutated only by the scheduling loop and the task executor,
/// never persisted directly.
#[derive(Debug, Default)]
pub struct SchedulerState {
    pub current_auction: Option<Auction>,
    /// True only while the countdown is active; blocks all other
    /// scheduling decisions.
    pub running_countdown: bool,
    /// Last end time seen by the policy, used for reminder display.
    pub cached_end_time: Option<DateTime<Utc>>,
    /// Most recent recorded bid, owned by the external bid tracker and
    /// only read here at finalization.
    pub last_winning_bid: Option<Bid>,
}

impl SchedulerState {
    pub fn new(current_auction: Option<Auction>) -> Self {
        SchedulerState {
            current_auction,
            running_countdown: false,
            cached_end_time: None,
            last_winning_bid: None,
        }
    }
}

pub type SharedState = Arc<Mutex<SchedulerState>>;

pub fn shared(state: SchedulerState) -> SharedState {
    Arc::new(Mutex::new(state))
}

/// Sender half of the reschedule rendezvous. Any collaborator that mutates
/// auction state must signal through this so the loop does not sleep past
/// the change.
#[derive(Clone)]
pub struct RescheduleHandle {
    tx: mpsc::Sender<()>,
}

impl RescheduleHandle {
    /// Waits until the loop has room for the signal: at most one request
    /// is ever in flight.
    pub async fn request_reschedule(&self) {
        let _ = self.tx.send(()).await;
    }
}

/// Receiver half, consumed by the scheduling loop.
pub struct RescheduleSignal {
    rx: mpsc::Receiver<()>,
}

impl RescheduleSignal {
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }
}

pub fn reschedule_channel() -> (RescheduleHandle, RescheduleSignal) {
    let (tx, rx) = mpsc::channel(1);
    (RescheduleHandle { tx }, RescheduleSignal { rx })
}

/// The long-lived coordinator: one timer, one reschedule rendezvous. Sole
/// invoker of the executor.
pub struct Scheduler {
    state: SharedState,
    config: Config,
    store: Arc<dyn AuctionStore>,
    messenger: Arc<dyn Messenger>,
    signal: RescheduleSignal,
}

impl Scheduler {
    pub fn new(
        state: SharedState,
        config: Config,
        store: Arc<dyn AuctionStore>,
        messenger: Arc<dyn Messenger>,
        signal: RescheduleSignal,
    ) -> Self {
        Scheduler {
            state,
            config,
            store,
            messenger,
            signal,
        }
    }

    /// Runs forever. Each iteration recomputes the schedule from scratch;
    /// a stale task is never carried across iterations.
    pub async fn maintain(mut self) {
        loop {
            let (task, when) = {
                let mut state = self.state.lock().unwrap();
                policy::refined_schedule(&mut state, &self.config, Utc::now())
            };

            let wait = (when - Utc::now()).to_std().unwrap_or_default();
            if wait.is_zero() {
                // Already due (the escalation path): perform without
                // racing a zero-length sleep against a pending reschedule,
                // otherwise the countdown flag could be left set with no
                // countdown ever run.
                self.perform(task).await;
                continue;
            }

            tokio::select! {
                _ = time::sleep(wait) => {
                    self.perform(task).await;
                }
                Some(_) = self.signal.recv() => {
                    // Dropping the pending sleep cancels the timer; loop
                    // around and recompute against the current state.
                }
            }
        }
    }

    async fn perform(&self, task: Task) {
        if task == Task::Nothing {
            // Poll tick; the wake itself is the point.
            return;
        }
        executor::perform(
            task,
            &self.state,
            &self.config,
            self.store.as_ref(),
            self.messenger.as_ref(),
        )
        .await;
    }
}
