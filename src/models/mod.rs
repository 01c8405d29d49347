mod application;
mod auth;
mod config;
mod envelope;
pub mod graph;
mod host;
mod platform;
mod tag;
mod task;

pub use application::*;
pub use auth::*;
pub use config::*;
pub use envelope::*;
pub use graph::{
    EdgeData, GraphEdge, GraphError, GraphMetadata, GraphNode, GraphPayload, GraphProblem, NodeId,
    NodeType, ResourceNode, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH,
};
pub use host::*;
pub use platform::*;
pub use tag::*;
pub use task::*;

use chrono::NaiveDateTime;
use serde::Deserializer;

/// Backend timestamps are naive UTC `isoformat()` strings.
pub type Timestamp = NaiveDateTime;

/// Helper to deserialize an optional timestamp.
///
/// Accepts `null`, naive isoformat with or without fractional seconds, a
/// space instead of `T`, and RFC 3339 strings with an offset (converted to UTC).
pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct TimestampVisitor;

    impl<'de> Visitor<'de> for TimestampVisitor {
        type Value = Option<Timestamp>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an ISO 8601 timestamp or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_timestamp(value)
                .map(Some)
                .ok_or_else(|| E::custom(format!("invalid timestamp: {}", value)))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_option(TimestampVisitor)
}

/// Parse a backend timestamp string.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// Format a timestamp for tables: minute precision.
pub fn format_timestamp(ts: Option<&Timestamp>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "deserialize_timestamp")]
        at: Option<Timestamp>,
    }

    #[test]
    fn test_parse_isoformat_variants() {
        let plain = parse_timestamp("2024-05-01T08:30:00").unwrap();
        let micros = parse_timestamp("2024-05-01T08:30:00.123456").unwrap();
        let spaced = parse_timestamp("2024-05-01 08:30:00").unwrap();
        assert_eq!(plain, spaced);
        assert_eq!(format_timestamp(Some(&micros)), "2024-05-01 08:30");
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let ts = parse_timestamp("2024-05-01T10:30:00+02:00").unwrap();
        assert_eq!(ts, parse_timestamp("2024-05-01T08:30:00").unwrap());
    }

    #[test]
    fn test_deserialize_null_and_missing() {
        let null: Stamped = serde_json::from_str(r#"{"at": null}"#).unwrap();
        let missing: Stamped = serde_json::from_str("{}").unwrap();
        assert!(null.at.is_none());
        assert!(missing.at.is_none());
        assert_eq!(format_timestamp(None), "-");
    }

    #[test]
    fn test_deserialize_invalid_is_error() {
        assert!(serde_json::from_str::<Stamped>(r#"{"at": "yesterday"}"#).is_err());
    }
}
