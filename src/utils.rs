use chrono::{DateTime, Utc};

/// Minutes elapsed between `launch_time` and `now`, with sub-minute precision
///
/// Negative when `launch_time` lies in the future (clock skew).
pub fn age_minutes(launch_time: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed = now.signed_duration_since(launch_time);
    match elapsed.num_microseconds() {
        Some(us) => us as f64 / 60_000_000.0,
        None => elapsed.num_seconds() as f64 / 60.0,
    }
}

/// Human-readable UTC timestamp, e.g. `2024-03-01 09:15:42.250 UTC`
pub fn format_utc(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string()
}
