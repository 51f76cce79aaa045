//! Display formatting for dates and times returned by the booking API.

use chrono::{DateTime, NaiveDate};

/// Formats an ISO date (`2024-03-05`) or RFC 3339 timestamp as `March 5, 2024`.
/// Input that does not parse is returned unchanged.
#[must_use]
pub fn format_date(value: &str) -> String {
    let trimmed = value.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        });

    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Formats a 24-hour `HH:MM[:SS]` time as `h:MM AM/PM`.
/// Input that does not parse is returned unchanged.
#[must_use]
pub fn format_time(value: &str) -> String {
    let mut parts = value.trim().split(':');
    let (Some(hours), Some(minutes)) = (parts.next(), parts.next()) else {
        return value.to_string();
    };
    let Ok(hour) = hours.parse::<u32>() else {
        return value.to_string();
    };
    if hour > 23 {
        return value.to_string();
    }

    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        other => other,
    };

    format!("{display_hour}:{minutes} {meridiem}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_long_form() {
        assert_eq!(format_date("2024-03-05"), "March 5, 2024");
        assert_eq!(format_date("2023-12-31T22:15:00+00:00"), "December 31, 2023");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn times_render_twelve_hour_clock() {
        assert_eq!(format_time("14:30"), "2:30 PM");
        assert_eq!(format_time("00:05"), "12:05 AM");
        assert_eq!(format_time("12:00:00"), "12:00 PM");
        assert_eq!(format_time("09:45"), "9:45 AM");
        assert_eq!(format_time("noon"), "noon");
        assert_eq!(format_time("25:00"), "25:00");
    }
}
