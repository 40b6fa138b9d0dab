//! Per-station traffic for a bike-share system: which trips fall around a time of day, how
//! many of them arrive at and depart from each station, and how big that station's marker
//! should be drawn.

pub mod filter;
pub mod scale;
pub mod time;
pub mod traffic;

pub use filter::filter_trips_by_time;
pub use scale::RadiusScale;
pub use time::{minutes_since_midnight, MinuteOfDay, TimeFilter, TimeFilterError};
pub use traffic::{compute_station_traffic, Station, StationId, StationTraffic, Trip};
