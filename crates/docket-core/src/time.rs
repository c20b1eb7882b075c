use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::CoreError;

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// `2024-01-10T12:00:00.000Z`, the shape browsers produce for `toISOString`.
pub fn format_iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_iso8601(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| CoreError::InvalidTimestamp)
}

#[cfg(test)]
mod tests {
    use super::{format_iso8601, parse_iso8601};
    use chrono::{TimeZone, Utc};

    #[test]
    fn format_uses_millis_and_zulu() {
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(format_iso8601(at), "2024-01-10T12:00:00.000Z");
    }

    #[test]
    fn parse_accepts_offsets() {
        let parsed = parse_iso8601("2024-01-10T17:30:00.000+05:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_iso8601("yesterday").is_err());
    }
}
