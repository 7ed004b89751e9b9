//! Timestamp helpers (Unix milliseconds, JST).

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

const JST_OFFSET_SECS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).expect("UTC+9 is a valid offset")
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    let now_utc = Utc::now();
    let now_jst: DateTime<FixedOffset> = now_utc.with_timezone(&jst());
    now_jst.timestamp_millis()
}

/// Format a Unix millisecond timestamp as an RFC 3339 string in JST.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_millis)
        .unwrap_or_default()
        .with_timezone(&jst())
        .to_rfc3339_opts(SecondsFormat::Millis, false)
}
