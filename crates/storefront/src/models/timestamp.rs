//! Lenient parsing of backend timestamps.
//!
//! The backend serializes local date-times as ISO-8601 strings without an
//! offset. A value we cannot read is treated as absent rather than failing
//! the whole payload.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(serde_json::Value::as_str).and_then(parse))
}

fn parse(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_with_fraction() {
        assert!(parse("2025-03-01T10:15:30.123456").is_some());
    }

    #[test]
    fn test_parse_space_separated() {
        assert!(parse("2025-03-01 10:15:30").is_some());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse("yesterday").is_none());
    }
}
