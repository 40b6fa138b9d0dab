use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{de, ser};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Width of the band either side of the pivot in which a trip still counts
pub const WINDOW_MINUTES: u16 = 60;

/// Slider value meaning "any time of day"
pub const ANY_TIME: i64 = -1;

/// Clock time of day with minute precision, always below 24:00. Unlike a GTFS time this never
/// goes over midnight, it is only ever read off a local timestamp.
/// # Examples
/// ```rust
/// use traffic_search::time::MinuteOfDay;
/// assert_eq!(MinuteOfDay::from_hm(8, 10).unwrap().minutes(), 490);
/// assert!(MinuteOfDay::from_hm(24, 0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    pub fn new(minutes: u16) -> Result<MinuteOfDay, TimeFilterError> {
        if minutes < MINUTES_PER_DAY {
            Ok(MinuteOfDay(minutes))
        } else {
            Err(TimeFilterError::OutOfRange(minutes.into()))
        }
    }

    pub fn from_hm(hour: u16, minute: u16) -> Result<MinuteOfDay, TimeFilterError> {
        if minute > 59 {
            return Err(TimeFilterError::OutOfRange(minute.into()));
        }
        Self::new(hour.saturating_mul(60).saturating_add(minute))
    }

    /// Minutes since midnight on the timestamp's own clock, the date and seconds are ignored
    pub fn of(timestamp: &NaiveDateTime) -> MinuteOfDay {
        // hour() < 24 and minute() < 60 so this is always in range
        MinuteOfDay((timestamp.hour() * 60 + timestamp.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    fn hour(self) -> u16 {
        self.0 / 60
    }

    fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Absolute difference in minutes, there is no wrapping around midnight
    pub fn distance(self, other: MinuteOfDay) -> u16 {
        if self.0 > other.0 {
            self.0 - other.0
        } else {
            other.0 - self.0
        }
    }

    /// US style 12 hour clock, eg. `8:10 AM` or `12:00 PM`
    pub fn to_12h_string(self) -> String {
        let hour = match self.hour() % 12 {
            0 => 12,
            hour => hour,
        };
        let suffix = if self.hour() < 12 { "AM" } else { "PM" };
        format!("{}:{:02} {}", hour, self.minute(), suffix)
    }
}

/// Shorthand for `MinuteOfDay::of`
pub fn minutes_since_midnight(timestamp: &NaiveDateTime) -> MinuteOfDay {
    MinuteOfDay::of(timestamp)
}

impl fmt::Debug for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// The position of the time slider: either no filtering or a pivot time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFilter {
    Any,
    Around(MinuteOfDay),
}

impl Default for TimeFilter {
    fn default() -> Self {
        TimeFilter::Any
    }
}

impl TimeFilter {
    /// Interpret a raw slider value, `-1` is "any time", `0..=1439` a minute of the day
    pub fn from_slider(value: i64) -> Result<TimeFilter, TimeFilterError> {
        if value == ANY_TIME {
            return Ok(TimeFilter::Any);
        }
        if value < 0 || value >= i64::from(MINUTES_PER_DAY) {
            return Err(TimeFilterError::OutOfRange(value));
        }
        Ok(TimeFilter::Around(MinuteOfDay(value as u16)))
    }

    pub fn slider_value(self) -> i64 {
        match self {
            TimeFilter::Any => ANY_TIME,
            TimeFilter::Around(pivot) => pivot.minutes().into(),
        }
    }

    pub fn pivot(self) -> Option<MinuteOfDay> {
        match self {
            TimeFilter::Any => None,
            TimeFilter::Around(pivot) => Some(pivot),
        }
    }

    pub fn is_active(self) -> bool {
        self.pivot().is_some()
    }

    /// Whether a time of day is inside the window, always true for `Any`
    pub fn accepts(self, time: MinuteOfDay) -> bool {
        match self {
            TimeFilter::Any => true,
            TimeFilter::Around(pivot) => pivot.distance(time) <= WINDOW_MINUTES,
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFilter::Any => f.write_str("any"),
            TimeFilter::Around(pivot) => write!(f, "{}", pivot),
        }
    }
}

/// # String representations
/// ```rust
/// use traffic_search::time::TimeFilter;
/// let filter: TimeFilter = "any".parse().unwrap();
/// let filter: TimeFilter = "-1".parse().unwrap();
/// let filter: TimeFilter = "480".parse().unwrap();
/// assert!("1440".parse::<TimeFilter>().is_err());
/// ```
impl FromStr for TimeFilter {
    type Err = TimeFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("any") {
            return Ok(TimeFilter::Any);
        }
        let value: i64 = s
            .parse()
            .map_err(|source| TimeFilterError::InvalidFormat {
                value: s.to_owned(),
                source,
            })?;
        TimeFilter::from_slider(value)
    }
}

impl ser::Serialize for TimeFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        ser::Serialize::serialize(&self.slider_value(), serializer)
    }
}

/// Accepts the slider value as a number or as a string, query strings only ever carry strings
impl<'de> de::Deserialize<'de> for TimeFilter {
    fn deserialize<D>(deserializer: D) -> Result<TimeFilter, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct SliderValue;

        impl<'de> de::Visitor<'de> for SliderValue {
            type Value = TimeFilter;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("\"any\", -1 or a minute of the day up to 1439")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                s.parse().map_err(de::Error::custom)
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                TimeFilter::from_slider(v).map_err(de::Error::custom)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v > i64::MAX as u64 {
                    return Err(de::Error::invalid_value(de::Unexpected::Unsigned(v), &self));
                }
                TimeFilter::from_slider(v as i64).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(SliderValue)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TimeFilterError {
    #[error("slider value {0} is outside -1..=1439")]
    OutOfRange(i64),
    #[error("slider value {value:?} is not a number")]
    InvalidFormat {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, Token};

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn minutes_ignore_date_and_seconds() {
        assert_eq!(minutes_since_midnight(&at(8, 10, 59)).minutes(), 490);
        assert_eq!(minutes_since_midnight(&at(0, 0, 0)).minutes(), 0);
        assert_eq!(minutes_since_midnight(&at(23, 59, 59)).minutes(), 1439);
        let other_day = NaiveDate::from_ymd_opt(2021, 12, 31)
            .unwrap()
            .and_hms_opt(8, 10, 0)
            .unwrap();
        assert_eq!(MinuteOfDay::of(&other_day), MinuteOfDay::of(&at(8, 10, 0)));
    }

    #[test]
    fn distance_does_not_wrap_midnight() {
        let late = MinuteOfDay::from_hm(23, 50).unwrap();
        let early = MinuteOfDay::from_hm(0, 20).unwrap();
        assert_eq!(late.distance(early), 1410);
        assert_eq!(early.distance(late), 1410);
    }

    #[test]
    fn twelve_hour_clock() {
        assert_eq!(MinuteOfDay::new(490).unwrap().to_12h_string(), "8:10 AM");
        assert_eq!(MinuteOfDay::new(0).unwrap().to_12h_string(), "12:00 AM");
        assert_eq!(MinuteOfDay::new(720).unwrap().to_12h_string(), "12:00 PM");
        assert_eq!(MinuteOfDay::new(780).unwrap().to_12h_string(), "1:00 PM");
        assert_eq!(MinuteOfDay::new(1439).unwrap().to_12h_string(), "11:59 PM");
    }

    #[test]
    fn slider_values() {
        assert_eq!(TimeFilter::from_slider(-1).unwrap(), TimeFilter::Any);
        assert_eq!(
            TimeFilter::from_slider(480).unwrap(),
            TimeFilter::Around(MinuteOfDay::from_hm(8, 0).unwrap())
        );
        assert!(TimeFilter::from_slider(-2).is_err());
        assert!(TimeFilter::from_slider(1440).is_err());
        assert_eq!(TimeFilter::from_slider(600).unwrap().slider_value(), 600);
        assert_eq!(TimeFilter::Any.slider_value(), -1);
    }

    #[test]
    fn window_is_inclusive() {
        let filter = TimeFilter::from_slider(480).unwrap();
        assert!(filter.accepts(MinuteOfDay::new(420).unwrap()));
        assert!(filter.accepts(MinuteOfDay::new(540).unwrap()));
        assert!(!filter.accepts(MinuteOfDay::new(541).unwrap()));
        assert!(!filter.accepts(MinuteOfDay::new(419).unwrap()));
        assert!(TimeFilter::Any.accepts(MinuteOfDay::new(1).unwrap()));
    }

    #[test]
    fn deserialize_sentinel() {
        assert_de_tokens(&TimeFilter::Any, &[Token::I64(-1)]);
        assert_de_tokens(&TimeFilter::Any, &[Token::BorrowedStr("any")]);
        assert_de_tokens(&TimeFilter::Any, &[Token::BorrowedStr("-1")]);
    }

    #[test]
    fn deserialize_pivot() {
        let eight = TimeFilter::Around(MinuteOfDay::new(480).unwrap());
        assert_de_tokens(&eight, &[Token::U64(480)]);
        assert_de_tokens(&eight, &[Token::BorrowedStr("480")]);
    }

    #[test]
    fn deserialize_out_of_range() {
        assert_de_tokens_error::<TimeFilter>(
            &[Token::I64(1440)],
            "slider value 1440 is outside -1..=1439",
        );
        assert_de_tokens_error::<TimeFilter>(
            &[Token::BorrowedStr("noon")],
            "slider value \"noon\" is not a number",
        );
    }

    #[test]
    fn serialize_as_slider_value() {
        assert_ser_tokens(&TimeFilter::Any, &[Token::I64(-1)]);
        assert_ser_tokens(
            &TimeFilter::Around(MinuteOfDay::new(75).unwrap()),
            &[Token::I64(75)],
        );
    }
}
