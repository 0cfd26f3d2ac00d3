//! Display helpers shared by the terminal and command-line front ends.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use reqwest::Url;

use crate::models::Message;

const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// Parses backend timestamps. RFC 3339 is expected; naive date-times are
/// read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// `h:mm AM/PM` in the given zone.
pub fn clock_time_in<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(tz).format("%-I:%M %p").to_string()
}

/// Bubble timestamp in local time; empty when the message has none.
pub fn message_time(msg: &Message) -> String {
    msg.sent_at()
        .map(|ts| clock_time_in(&ts, &Local))
        .unwrap_or_default()
}

/// Compact age for list rows: minutes under an hour, hours under a day,
/// otherwise the calendar date.
pub fn relative_age(ts: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let minutes = (*now - *ts).num_minutes().max(0);

    if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 1440 {
        format!("{}h", minutes / 60)
    } else {
        ts.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
    }
}

/// The avatar if one is set, otherwise a generated initials image.
pub fn avatar_url(avatar: Option<&str>, name: &str) -> String {
    if let Some(url) = avatar.filter(|a| !a.is_empty()) {
        return url.to_string();
    }

    Url::parse_with_params(AVATAR_SERVICE, &[("name", name), ("background", "random")])
        .map(|u| u.to_string())
        .unwrap_or_else(|_| AVATAR_SERVICE.to_string())
}

/// Shortens `s` to at most `max` characters, ending in "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let head: String = s.chars().take(keep).collect();
    format!("{}...", head)
}
