//! Timestamp encoding used by the TickTick API.
//!
//! The API writes timestamps like `2019-11-13T03:00:00.000+0000`, which is not
//! RFC 3339 (the offset has no colon). Serialization always produces that form;
//! deserialization also accepts RFC 3339.

use chrono::{DateTime, Utc};

const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";
const READ_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Format a timestamp the way the API expects it.
pub fn format(value: &DateTime<Utc>) -> String {
    value.format(WRITE_FORMAT).to_string()
}

/// Parse an API timestamp. Fractional seconds are optional.
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, READ_FORMAT))
        .map(|dt| dt.with_timezone(&Utc))
}

/// serde adapter for `Option<DateTime<Utc>>` fields.
///
/// Use together with `default` and `skip_serializing_if = "Option::is_none"` so
/// that a missing timestamp is omitted rather than sent as `null`. An empty
/// string on input is read as `None`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&super::format(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.is_empty() => super::parse(&s)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid timestamp {:?}: {}", s, e))),
            _ => Ok(None),
        }
    }
}
