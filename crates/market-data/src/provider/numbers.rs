//! Numeric decoding helpers shared by the normalizers.
//!
//! Upstream payloads are loosely typed: numbers arrive as JSON numbers, as
//! strings, as `null`, or as `"None"`/`"-"` placeholders. Everything that is
//! not a finite number decodes to `None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional JSON number, mapping anything else to `None`.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).filter(|v| v.is_finite()))
}

/// Deserialize an optional unix timestamp.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_i64()))
}

/// Parse a numeric string, ignoring whitespace and an optional `%` suffix.
pub(crate) fn parse_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a non-negative integer volume, tolerating a decimal representation.
pub(crate) fn parse_volume(s: &str) -> Option<u64> {
    let trimmed = s.trim();
    trimmed
        .parse::<u64>()
        .ok()
        .or_else(|| parse_f64(trimmed).and_then(volume_from_f64))
}

/// Convert a JSON volume number into an integer count.
pub(crate) fn volume_from_f64(v: f64) -> Option<u64> {
    if v.is_finite() && v >= 0.0 && v <= u64::MAX as f64 {
        Some(v.round() as u64)
    } else {
        None
    }
}
