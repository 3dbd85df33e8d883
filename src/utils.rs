use chrono::{SecondsFormat, Utc};

/// Timestamp format shared by the stores: UTC, millisecond precision,
/// `Z` suffix (`2026-08-05T12:00:00.000Z`).
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
