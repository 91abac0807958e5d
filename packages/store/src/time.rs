//! Timestamp rendering. All inputs are the backend's ISO-8601 strings; a
//! string that does not parse is shown as-is.

use chrono::{DateTime, Local, TimeZone, Utc};

fn parse(iso: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(iso)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn render<Tz: TimeZone>(iso: &str, tz: &Tz, fmt: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse(iso) {
        Some(at) => at.with_timezone(tz).format(fmt).to_string(),
        None => iso.to_string(),
    }
}

/// `HH:MM · DD/MM/YYYY`
pub fn chat_time_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    render(iso, tz, "%H:%M · %d/%m/%Y")
}

/// `Mar 1, 9:05 AM`
pub fn post_time_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    render(iso, tz, "%b %-d, %-I:%M %p")
}

/// `01 March 2025`
pub fn joined_date_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    render(iso, tz, "%d %B %Y")
}

/// `01/03/2025, 09:05:00`
pub fn full_time_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    render(iso, tz, "%d/%m/%Y, %H:%M:%S")
}

pub fn chat_time(iso: &str) -> String {
    chat_time_in(iso, &Local)
}

pub fn post_time(iso: &str) -> String {
    post_time_in(iso, &Local)
}

pub fn joined_date(iso: &str) -> String {
    joined_date_in(iso, &Local)
}

pub fn full_time(iso: &str) -> String {
    full_time_in(iso, &Local)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn rounded_div(a: i64, b: i64) -> i64 {
    (a as f64 / b as f64).round() as i64
}

/// Distance between `iso` and `now` in words, like "5 minutes ago" or
/// "about 2 hours ago".
pub fn relative_time(iso: &str, now: DateTime<Utc>) -> String {
    let Some(at) = parse(iso) else {
        return String::new();
    };
    let secs = (now - at).num_seconds();
    let future = secs < 0;
    let secs = secs.abs();
    let minutes = rounded_div(secs, 60);

    const DAY: i64 = 1440;
    const MONTH: i64 = 43_200;

    let phrase = if secs < 30 {
        "less than a minute".to_string()
    } else if minutes < 2 {
        "1 minute".to_string()
    } else if minutes < 45 {
        plural(minutes, "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < DAY {
        format!("about {}", plural(rounded_div(minutes, 60), "hour"))
    } else if minutes < 2520 {
        "1 day".to_string()
    } else if minutes < MONTH {
        plural(rounded_div(minutes, DAY), "day")
    } else if minutes < 2 * MONTH {
        format!("about {}", plural(rounded_div(minutes, MONTH), "month"))
    } else {
        let months = minutes / MONTH;
        if months < 12 {
            plural(months, "month")
        } else {
            let years = months / 12;
            match months % 12 {
                0..=2 => format!("about {}", plural(years, "year")),
                3..=8 => format!("over {}", plural(years, "year")),
                _ => format!("almost {}", plural(years + 1, "year")),
            }
        }
    };

    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    const AT: &str = "2025-03-01T09:05:00.000Z";

    #[test]
    fn test_absolute_formats() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(chat_time_in(AT, &utc), "09:05 · 01/03/2025");
        assert_eq!(post_time_in(AT, &utc), "Mar 1, 9:05 AM");
        assert_eq!(joined_date_in(AT, &utc), "01 March 2025");
        assert_eq!(full_time_in(AT, &utc), "01/03/2025, 09:05:00");

        let plus_five = FixedOffset::east_opt(5 * 3600).unwrap();
        assert_eq!(post_time_in(AT, &plus_five), "Mar 1, 2:05 PM");
    }

    #[test]
    fn test_unparseable_is_passed_through() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(chat_time_in("yesterday", &utc), "yesterday");
        assert_eq!(relative_time("yesterday", Utc::now()), "");
    }

    #[test]
    fn test_relative_time() {
        let at = parse(AT).unwrap();
        let cases = [
            (Duration::seconds(10), "less than a minute ago"),
            (Duration::seconds(50), "1 minute ago"),
            (Duration::minutes(5), "5 minutes ago"),
            (Duration::minutes(60), "about 1 hour ago"),
            (Duration::hours(3), "about 3 hours ago"),
            (Duration::hours(30), "1 day ago"),
            (Duration::days(4), "4 days ago"),
            (Duration::days(40), "about 1 month ago"),
            (Duration::days(100), "3 months ago"),
            (Duration::days(400), "about 1 year ago"),
            (Duration::days(600), "over 1 year ago"),
            (Duration::days(700), "almost 2 years ago"),
        ];
        for (ago, expected) in cases {
            assert_eq!(relative_time(AT, at + ago), expected, "{ago:?}");
        }
        assert_eq!(relative_time(AT, at - Duration::minutes(5)), "in 5 minutes");
    }
}
