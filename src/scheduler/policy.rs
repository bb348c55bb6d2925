// src/scheduler/policy.rs
use chrono::{DateTime, Duration, Utc};
use log::error;

use super::{SchedulerState, Task};
use crate::config::Config;

/// Seconds before the end instant that the end task is anchored at; the
/// slack gives `refined_schedule` room to escalate into the countdown.
const END_LEAD_SECS: i64 = 60;
/// Wake interval used whenever there is nothing to schedule.
const POLL_SECS: i64 = 10;
/// Remaining time to the end instant below which the countdown starts.
const COUNTDOWN_THRESHOLD_SECS: i64 = 83;

/// Returns what to do next (end the auction or nothing) and when, and
/// records the end time for reminder display.
pub fn basic_schedule(state: &mut SchedulerState) -> (Task, Option<DateTime<Utc>>) {
    if state.running_countdown {
        return (Task::Nothing, None);
    }
    let end = match &state.current_auction {
        Some(auction) => match auction.end_time {
            Some(end) => end,
            None => return (Task::Nothing, None),
        },
        None => return (Task::Nothing, None),
    };
    state.cached_end_time = Some(end);
    (Task::EndAuction, Some(end - Duration::seconds(END_LEAD_SECS)))
}

/// A more detailed version of `basic_schedule`, including announcements
/// and the countdown escalation. Never blocks the loop indefinitely: any
/// state with nothing to do yields a short poll tick.
pub fn refined_schedule(
    state: &mut SchedulerState,
    config: &Config,
    now: DateTime<Utc>,
) -> (Task, DateTime<Utc>) {
    let poll = now + Duration::seconds(POLL_SECS);
    if state.running_countdown {
        return (Task::Nothing, poll);
    }

    let (task, trigger) = basic_schedule(state);
    let trigger = match trigger {
        Some(trigger) if task != Task::Nothing => trigger,
        _ => return (Task::Nothing, poll),
    };
    if task != Task::EndAuction {
        error!("unsupported task to refine: {:?}", task);
        return (Task::Nothing, poll);
    }

    // Escalation outranks everything else. Measured against the actual end
    // instant, not the -60 s trigger.
    let until_end = trigger + Duration::seconds(END_LEAD_SECS) - now;
    if until_end < Duration::seconds(COUNTDOWN_THRESHOLD_SECS) {
        // The flag is set here, before handoff, so no other decision can
        // slip in between this call and the executor actually starting.
        state.running_countdown = true;
        return (Task::StartCountdown, now);
    }

    let every = config.reminder_interval();
    if every <= Duration::zero() {
        error!("non-positive reminder interval in config");
        return (Task::Nothing, poll);
    }

    let remaining = trigger - now;
    let announcements = remaining.num_milliseconds() / every.num_milliseconds();
    if announcements <= 0
        && until_end > Duration::seconds(180)
        && until_end < Duration::seconds(300)
    {
        // One-shot heads-up, independent of the regular interval grid.
        return (Task::ReminderAnnouncement, now + Duration::minutes(2));
    }

    (
        Task::ReminderAnnouncement,
        trigger - every * announcements as i32,
    )
}
