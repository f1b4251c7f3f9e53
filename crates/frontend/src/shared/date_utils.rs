/// Utilities for date and time formatting
///
/// Result timestamps, "updated N ago" labels and the execution timer
use chrono::{DateTime, Utc};

/// Format a timestamp as DD.MM.YYYY HH:MM:SS
/// Example: 2024-03-15T14:02:26Z -> "15.03.2024 14:02:26"
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Current time from the browser clock
pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Relative age of a result: "just now", "5 minutes ago", "2 days ago"
pub fn format_age(since: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *since).num_seconds().max(0);
    let (amount, unit) = match seconds {
        0..=44 => return "just now".to_string(),
        45..=3_599 => ((seconds + 30) / 60, "minute"),
        3_600..=86_399 => ((seconds + 1_800) / 3_600, "hour"),
        _ => ((seconds + 43_200) / 86_400, "day"),
    };
    let amount = amount.max(1);
    if amount == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", amount, unit)
    }
}

/// Running execution timer, MM:SS (HH:MM:SS past one hour)
pub fn format_timer(elapsed_seconds: i64) -> String {
    let s = elapsed_seconds.max(0);
    let (hours, minutes, seconds) = (s / 3_600, (s % 3_600) / 60, s % 60);
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_format_datetime() {
        let value = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_datetime(&value), "15.03.2024 14:02:26");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(&at(0), &at(10)), "just now");
        assert_eq!(format_age(&at(0), &at(60)), "1 minute ago");
        assert_eq!(format_age(&at(0), &at(5 * 60)), "5 minutes ago");
        assert_eq!(format_age(&at(0), &at(2 * 3_600)), "2 hours ago");
        assert_eq!(format_age(&at(0), &at(3 * 86_400)), "3 days ago");
        // clock skew
        assert_eq!(format_age(&at(100), &at(0)), "just now");
    }

    #[test]
    fn test_format_timer() {
        assert_eq!(format_timer(0), "00:00");
        assert_eq!(format_timer(75), "01:15");
        assert_eq!(format_timer(3_725), "01:02:05");
    }
}
