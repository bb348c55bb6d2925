// src/domain/resolve.rs
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use regex::Regex;

use super::core::Errors;

/// Resolve a free-text end-time specification ("tomorrow 6pm",
/// "18:00 +02:00") against `now` into an absolute future timestamp.
///
/// Unspecified time-of-day components default to 0 and an unspecified zone
/// is UTC. Time-only input is placed on today's date in the resolved zone
/// and rolled forward exactly one day if that already lies in the past.
/// Deterministic: the clock is a parameter, never read here.
pub fn resolve_end_time(text: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, Errors> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Err(Errors::UnsupportedDateTime(
            "insufficient arguments".to_string(),
        ));
    }
    let timestr = words.join(" ");

    // The offset fragment is cut out before time extraction so "+02:00"
    // cannot be mistaken for a time of day.
    let (zone, rest) = match extract_offset(&timestr) {
        Some((offset, rest)) => (offset, rest),
        None => (Utc.fix(), timestr.clone()),
    };
    let time = extract_time(&rest);
    let date = extract_date(&rest, now, zone);
    if time.is_none() && date.is_none() {
        return Err(Errors::UnsupportedDateTime(timestr));
    }

    let (hour, minute, second) = time.unwrap_or((0, 0, 0));
    let end = match date {
        Some(day) => to_instant(zone, day, hour, minute, second)
            .ok_or_else(|| Errors::UnsupportedDateTime(timestr.clone()))?,
        None => {
            let today = now.with_timezone(&zone).date_naive();
            let end = to_instant(zone, today, hour, minute, second)
                .ok_or_else(|| Errors::UnsupportedDateTime(timestr.clone()))?;
            if end < now {
                end + Duration::days(1)
            } else {
                end
            }
        }
    };

    let end = end.with_timezone(&Utc);
    if end <= now {
        return Err(Errors::PastTime(end));
    }
    Ok(end)
}

fn to_instant(
    zone: FixedOffset,
    day: NaiveDate,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<DateTime<FixedOffset>> {
    zone.with_ymd_and_hms(day.year(), day.month(), day.day(), hour, minute, second)
        .single()
}

/// Pull a `±HH:MM` / `±HHMM` offset out of the text, returning the zone and
/// the text with the fragment removed.
fn extract_offset(text: &str) -> Option<(FixedOffset, String)> {
    let re = Regex::new(r"(?:^|\s)([+-])(\d{2}):?(\d{2})\b").ok()?;
    let caps = re.captures(text)?;
    let whole = caps.get(0)?;
    let sign: i32 = if &caps[1] == "-" { -1 } else { 1 };
    let hours: i32 = caps[2].parse().ok()?;
    let minutes: i32 = caps[3].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;
    let mut rest = String::with_capacity(text.len());
    rest.push_str(&text[..whole.start()]);
    rest.push_str(&text[whole.end()..]);
    Some((offset, rest))
}

/// Recognizes `HH:MM[:SS]` and `H[H] am/pm` fragments.
fn extract_time(text: &str) -> Option<(u32, u32, u32)> {
    let clock = Regex::new(r"\b(\d{1,2}):(\d{2})(?::(\d{2}))?\b").ok()?;
    if let Some(caps) = clock.captures(text) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        let second: u32 = match caps.get(3) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        return Some((hour, minute, second));
    }

    let meridiem = Regex::new(r"(?i)\b(\d{1,2})\s?(am|pm)\b").ok()?;
    let caps = meridiem.captures(text)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    if hour == 0 || hour > 12 {
        return None;
    }
    if hour == 12 {
        hour = 0;
    }
    if caps[2].eq_ignore_ascii_case("pm") {
        hour += 12;
    }
    Some((hour, 0, 0))
}

/// Recognizes `YYYY-MM-DD` plus the `today` / `tomorrow` keywords, both of
/// which count as a full calendar date in the resolved zone.
fn extract_date(text: &str, now: DateTime<Utc>, zone: FixedOffset) -> Option<NaiveDate> {
    let iso = Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").ok()?;
    if let Some(caps) = iso.captures(text) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let today = now.with_timezone(&zone).date_naive();
    for word in text.split_whitespace() {
        if word.eq_ignore_ascii_case("today") {
            return Some(today);
        }
        if word.eq_ignore_ascii_case("tomorrow") {
            return today.succ_opt();
        }
    }
    None
}
