//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time as decimal milliseconds since the unix epoch: `1660582212000`
pub fn epoch_millis(t: DateTime) -> String {
    t.timestamp_millis().to_string()
}
