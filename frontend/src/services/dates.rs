use chrono::{DateTime, Utc};

/// Short timestamp for list rows, e.g. "May 1, 2024 12:00".
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y %H:%M").to_string()
}

/// Long timestamp for the detail view.
pub fn format_timestamp_long(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_short_and_long_timestamps() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        assert_eq!(format_timestamp(&timestamp), "May 1, 2024 12:30");
        assert_eq!(format_timestamp_long(&timestamp), "May 1, 2024 12:30:05");
    }
}
