use chrono::{DateTime, NaiveDateTime};

/// Formats seen in trip logs, tried in order
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a trip timestamp into the clock reading at the station.
/// A trailing UTC offset is accepted but not applied, `08:10:00-04:00` is 08:10.
/// ```rust
/// use bike_traffic::feed::time::parse_timestamp;
/// let t = parse_timestamp("2024-03-01 08:10:22.419").unwrap();
/// assert_eq!(t, parse_timestamp("2024-03-01T08:10:22.419-05:00").unwrap());
/// ```
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let s = s.trim();
    for format in LOCAL_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(timestamp);
        }
    }
    DateTime::parse_from_rfc3339(s).map(|timestamp| timestamp.naive_local())
}

pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserializer};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(TimestampVisitor)
    }

    struct TimestampVisitor;

    impl<'de> de::Visitor<'de> for TimestampVisitor {
        type Value = NaiveDateTime;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(formatter, "timestamp formatted eg. \"2024-03-01 08:10:22\"")
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            super::parse_timestamp(s).map_err(de::Error::custom)
        }
    }
}
