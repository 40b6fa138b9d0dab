//! Records as they appear in the station information document and the monthly trip log.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer};
use traffic_search::{Station, StationId, Trip};

/// Station information document, the stations sit under `data.stations`
#[derive(Debug, Deserialize)]
pub struct StationDocument {
    pub data: StationDocumentData,
}

#[derive(Debug, Deserialize)]
pub struct StationDocumentData {
    pub stations: Vec<StationRecord>,
}

/// Station record, everything besides these fields (capacity, region_id, rental_uris, ..) is ignored
#[derive(Debug, Deserialize, PartialEq)]
pub struct StationRecord {
    /// Short code printed on the dock, trips refer to stations by this
    #[serde(deserialize_with = "station_id_format::deserialize")]
    pub short_name: StationId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "coordinate_format::deserialize")]
    pub lon: f64,
    #[serde(deserialize_with = "coordinate_format::deserialize")]
    pub lat: f64,
}

impl From<StationRecord> for Station {
    fn from(record: StationRecord) -> Station {
        let mut station = Station::new(record.short_name, record.lon, record.lat);
        station.name = record.name;
        station
    }
}

/// Trip log row: "ride_id","rideable_type","started_at","ended_at","start_station_name","start_station_id",.. ,"member_casual"
#[derive(Debug, Deserialize)]
pub struct TripRecord {
    pub start_station_id: StationId,
    pub end_station_id: StationId,
    #[serde(with = "crate::feed::time::timestamp_format")]
    pub started_at: NaiveDateTime,
    #[serde(with = "crate::feed::time::timestamp_format")]
    pub ended_at: NaiveDateTime,
}

impl From<TripRecord> for Trip {
    fn from(record: TripRecord) -> Trip {
        Trip {
            start_station_id: record.start_station_id,
            end_station_id: record.end_station_id,
            started_at: record.started_at,
            ended_at: record.ended_at,
        }
    }
}

/// Some feeds give short names as bare numbers
mod station_id_format {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<StationId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrInt;

        impl<'de> de::Visitor<'de> for StringOrInt {
            type Value = StationId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("station short name as a string or integer")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let s = s.trim();
                if s.is_empty() {
                    return Err(de::Error::invalid_value(de::Unexpected::Str(s), &self));
                }
                Ok(s.to_owned())
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v.to_string())
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v.to_string())
            }
        }

        deserializer.deserialize_any(StringOrInt)
    }
}

/// Coordinates normally come as JSON numbers, but a string holding a number is fine too
mod coordinate_format {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberOrString;

        impl<'de> de::Visitor<'de> for NumberOrString {
            type Value = f64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a coordinate in degrees")
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err(de::Error::invalid_value(de::Unexpected::Float(v), &self))
                }
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v as f64)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v as f64)
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match s.trim().parse::<f64>() {
                    Ok(v) => self.visit_f64(v),
                    Err(_) => Err(de::Error::invalid_value(de::Unexpected::Str(s), &self)),
                }
            }
        }

        deserializer.deserialize_any(NumberOrString)
    }
}

#[cfg(test)]
mod test_station_record {
    use super::StationRecord;
    use serde_test::{assert_de_tokens, assert_de_tokens_error, Token};

    fn record(short_name: &str, name: Option<&str>, lon: f64, lat: f64) -> StationRecord {
        StationRecord {
            short_name: short_name.to_owned(),
            name: name.map(str::to_owned),
            lon,
            lat,
        }
    }

    #[test]
    fn numbers() {
        assert_de_tokens(
            &record("A32000", Some("Fan Pier"), -71.044, 42.353),
            &[
                Token::Struct {
                    name: "StationRecord",
                    len: 4,
                },
                Token::Str("short_name"),
                Token::BorrowedStr("A32000"),
                Token::Str("name"),
                Token::Some,
                Token::BorrowedStr("Fan Pier"),
                Token::Str("lon"),
                Token::F64(-71.044),
                Token::Str("lat"),
                Token::F64(42.353),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn strings_and_integer_id() {
        assert_de_tokens(
            &record("67", None, -71.1, 42.0),
            &[
                Token::Struct {
                    name: "StationRecord",
                    len: 3,
                },
                Token::Str("short_name"),
                Token::U64(67),
                Token::Str("lon"),
                Token::BorrowedStr("-71.1"),
                Token::Str("lat"),
                Token::I64(42),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn not_a_coordinate() {
        assert_de_tokens_error::<StationRecord>(
            &[
                Token::Struct {
                    name: "StationRecord",
                    len: 3,
                },
                Token::Str("short_name"),
                Token::BorrowedStr("A32000"),
                Token::Str("lon"),
                Token::BorrowedStr("west"),
            ],
            "invalid value: string \"west\", expected a coordinate in degrees",
        );
    }
}
