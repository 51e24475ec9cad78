use chrono::DateTime;

use crate::SnapError;

/// Calendar date (`YYYY-MM-DD`, UTC) of an expiration timestamp in epoch seconds.
///
/// # Errors
/// Returns `Data` if the timestamp is outside chrono's representable range.
pub fn expiration_label(ts: i64) -> Result<String, SnapError> {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
        .ok_or_else(|| SnapError::Data(format!("invalid expiration timestamp {ts}")))
}
