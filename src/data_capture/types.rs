use chrono::{DateTime, SecondsFormat, Utc};

/// One captured login attempt.
///
/// Lives only for the duration of a single request: built, serialized,
/// appended to the sink, dropped. Field contents are untrusted attacker
/// input and are stored as-is (username trimmed, password verbatim).
#[derive(Debug, Clone)]
pub struct CaptureRecord {
    pub timestamp: DateTime<Utc>,
    pub source_address: String,
    pub username: String,
    pub password: String,
}

impl CaptureRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        source_address: String,
        username: String,
        password: String,
    ) -> Self {
        Self {
            timestamp,
            source_address,
            username,
            password,
        }
    }

    /// Formats the record as one CSV line (no trailing newline), fields in
    /// fixed order: timestamp, source_address, username, password.
    ///
    /// Fields containing the delimiter, a quote, or a line break are quoted
    /// RFC-4180 style, so attacker-supplied credentials can never corrupt
    /// line boundaries or shift columns in the log.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{}",
            format_timestamp(&self.timestamp),
            escape_field(&self.source_address),
            escape_field(&self.username),
            escape_field(&self.password),
        )
    }
}

/// ISO-8601-like UTC timestamp with microsecond precision and `Z` suffix,
/// e.g. `2026-08-30T14:03:07.123456Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Quotes a field when it contains a comma, a double quote, or a line
/// break; embedded quotes are doubled. Everything else passes through bare.
fn escape_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 14, 3, 7).unwrap()
    }

    #[test]
    fn test_plain_fields_written_bare() {
        let record = CaptureRecord::new(
            ts(),
            "198.51.100.9".into(),
            "admin".into(),
            "P@ss1".into(),
        );
        assert_eq!(
            record.to_csv_line(),
            "2026-08-30T14:03:07.000000Z,198.51.100.9,admin,P@ss1"
        );
    }

    #[test]
    fn test_timestamp_has_microsecond_precision_and_z_suffix() {
        let line = CaptureRecord::new(ts(), String::new(), String::new(), String::new())
            .to_csv_line();
        let stamp = line.split(',').next().unwrap();
        assert!(stamp.ends_with('Z'));
        // seconds part carries exactly six fractional digits
        let frac = stamp.split('.').nth(1).unwrap();
        assert_eq!(frac.len(), "000000Z".len());
    }

    #[test]
    fn test_comma_in_password_is_quoted() {
        let record = CaptureRecord::new(ts(), "10.0.0.1".into(), "admin".into(), "a,b".into());
        assert!(record.to_csv_line().ends_with(",admin,\"a,b\""));
    }

    #[test]
    fn test_quote_in_username_is_doubled() {
        let record = CaptureRecord::new(ts(), "10.0.0.1".into(), "ad\"min".into(), "x".into());
        assert!(record.to_csv_line().contains(",\"ad\"\"min\",x"));
    }

    #[test]
    fn test_line_breaks_are_quoted() {
        let record =
            CaptureRecord::new(ts(), "10.0.0.1".into(), "a\nb".into(), "c\r\nd".into());
        let line = record.to_csv_line();
        // raw line breaks only ever appear inside quoted fields
        assert!(line.contains("\"a\nb\""));
        assert!(line.contains("\"c\r\nd\""));
    }

    #[test]
    fn test_empty_fields_round_trip() {
        let record = CaptureRecord::new(ts(), String::new(), String::new(), String::new());
        assert_eq!(
            record.to_csv_line(),
            "2026-08-30T14:03:07.000000Z,,,"
        );
    }
}
