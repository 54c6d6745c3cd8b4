//! Rating score bounds and response rendering.

use chrono::SecondsFormat;

use crate::types::Timestamp;

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 10;

pub fn is_valid_score(score: i64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

/// Render a timestamp as ISO-8601 UTC with a `Z` suffix.
///
/// Fractional seconds are printed only when non-zero.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
