use chrono::{DateTime, Utc};
use humantime::format_duration;

pub fn display_datetime(datetime: DateTime<Utc>) -> String {
    datetime.with_timezone(&chrono::Local).to_rfc3339()
}

/// Formats an api timestamp as `MMM D YYYY at hh:mm:ss`, or `Never` when absent or invalid.
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(|timestamp| DateTime::parse_from_rfc3339(timestamp).ok())
        .map_or_else(
            || "Never".to_string(),
            |datetime| datetime.format("%b %-d %Y at %I:%M:%S").to_string(),
        )
}

/// Chart axis label for an epoch timestamp in milliseconds.
pub fn format_tick(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || "-".to_string(),
        |datetime| datetime.format("%m/%d %H:%M:%S").to_string(),
    )
}

pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let Ok(age) = (now - created_at).to_std() else {
        return "0s".to_string();
    };

    let age = std::time::Duration::from_secs(age.as_secs());
    if age.is_zero() {
        return "0s".to_string();
    }

    format_duration(age).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn formats_valid_timestamps() {
        assert_eq!(
            format_timestamp(Some("2024-03-05T14:07:09Z")),
            "Mar 5 2024 at 02:07:09"
        );
    }

    #[test]
    fn missing_or_invalid_timestamps_are_never() {
        assert_eq!(format_timestamp(None), "Never");
        assert_eq!(format_timestamp(Some("")), "Never");
        assert_eq!(format_timestamp(Some("yesterday")), "Never");
    }

    #[test]
    fn ticks_use_month_day_time() {
        let datetime = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_tick(datetime.timestamp_millis()), "01/02 03:04:05");
    }

    #[test]
    fn ages_drop_subsecond_precision() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let now = created_at + Duration::seconds(3_723) + Duration::milliseconds(250);
        assert_eq!(format_age(created_at, now), "1h 2m 3s");
    }

    #[test]
    fn future_creation_is_zero_age() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_age(now + Duration::minutes(1), now), "0s");
    }
}
