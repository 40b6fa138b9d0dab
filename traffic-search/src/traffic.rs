//! Stations, trips and the per-station traffic counts derived from them.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::time::MinuteOfDay;

/// The station short name, eg. `A32000`. Unique within one load of the station list.
pub type StationId = String;

/// A bike-share dock
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub short_name: StationId,
    /// Human readable name, not every feed has it
    pub name: Option<String>,
    /// x is longitude, y is latitude
    pub location: geo::Point<f64>,
}

impl Station {
    pub fn new(short_name: impl Into<StationId>, lon: f64, lat: f64) -> Station {
        Station {
            short_name: short_name.into(),
            name: None,
            location: geo::Point::new(lon, lat),
        }
    }

    pub fn lon(&self) -> f64 {
        self.location.x()
    }

    pub fn lat(&self) -> f64 {
        self.location.y()
    }
}

/// One rental, from a dock at a time to a dock at a later time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub start_station_id: StationId,
    pub end_station_id: StationId,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

impl Trip {
    pub fn started_minutes(&self) -> MinuteOfDay {
        MinuteOfDay::of(&self.started_at)
    }

    pub fn ended_minutes(&self) -> MinuteOfDay {
        MinuteOfDay::of(&self.ended_at)
    }
}

/// Counters for one station over some set of trips.
/// `total_traffic` is always `arrivals + departures`, use `StationTraffic::new` to build one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StationTraffic {
    pub arrivals: u32,
    pub departures: u32,
    pub total_traffic: u32,
}

impl StationTraffic {
    pub fn new(arrivals: u32, departures: u32) -> StationTraffic {
        StationTraffic {
            arrivals,
            departures,
            total_traffic: arrivals + departures,
        }
    }
}

/// Tooltip text for a station marker
/// ```rust
/// use traffic_search::traffic::StationTraffic;
/// assert_eq!(StationTraffic::new(2, 3).to_string(), "5 trips (3 departures, 2 arrivals)");
/// ```
impl fmt::Display for StationTraffic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} trips ({} departures, {} arrivals)",
            self.total_traffic, self.departures, self.arrivals
        )
    }
}

/// Counts arrivals and departures of every station in `stations`.
///
/// Stations nobody rode to or from get zeroed counters. Trips starting or ending at an id
/// which isn't in `stations` are counted into the frequency tables but never read out.
pub fn compute_station_traffic<'t, I>(
    stations: &[Station],
    trips: I,
) -> HashMap<StationId, StationTraffic>
where
    I: IntoIterator<Item = &'t Trip>,
{
    let mut departures: HashMap<&str, u32> = HashMap::new();
    let mut arrivals: HashMap<&str, u32> = HashMap::new();
    let mut trip_count = 0usize;
    for trip in trips {
        *departures.entry(trip.start_station_id.as_str()).or_insert(0) += 1;
        *arrivals.entry(trip.end_station_id.as_str()).or_insert(0) += 1;
        trip_count += 1;
    }
    tracing::trace!(
        trips = trip_count,
        stations = stations.len(),
        "computed station traffic"
    );

    stations
        .iter()
        .map(|station| {
            let id = station.short_name.as_str();
            let traffic = StationTraffic::new(
                arrivals.get(id).copied().unwrap_or(0),
                departures.get(id).copied().unwrap_or(0),
            );
            (station.short_name.clone(), traffic)
        })
        .collect()
}

/// The busiest station's total, 0 if there are no stations
pub fn max_total_traffic<'a>(traffic: impl IntoIterator<Item = &'a StationTraffic>) -> u32 {
    traffic
        .into_iter()
        .map(|traffic| traffic.total_traffic)
        .max()
        .unwrap_or(0)
}
