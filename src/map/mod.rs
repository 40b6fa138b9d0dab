//! The state behind the overlay: loaded stations and trips, the traffic for the selected time
//! and where each station's marker goes.

use std::collections::HashMap;

use serde::Serialize;
use traffic_search::scale::RadiusScale;
use traffic_search::traffic::max_total_traffic;
use traffic_search::{
    compute_station_traffic, filter_trips_by_time, Station, StationId, StationTraffic, TimeFilter,
    Trip,
};

pub mod viewport;
pub use viewport::{Pixels, Projection, Viewport, ViewportEvent, ViewportNotifier};

/// What the time label next to the slider shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TimeDisplay {
    /// The selected time is blank and the "(any time)" label is shown instead
    Any,
    At(String),
}

impl TimeDisplay {
    pub fn of(filter: TimeFilter) -> TimeDisplay {
        match filter.pivot() {
            None => TimeDisplay::Any,
            Some(pivot) => TimeDisplay::At(pivot.to_12h_string()),
        }
    }

    pub fn selected_time(&self) -> &str {
        match self {
            TimeDisplay::Any => "",
            TimeDisplay::At(text) => text,
        }
    }

    pub fn any_time_visible(&self) -> bool {
        *self == TimeDisplay::Any
    }
}

/// Traffic for one slider position
#[derive(Debug, Clone)]
pub struct TrafficView {
    filter: TimeFilter,
    traffic: HashMap<StationId, StationTraffic>,
    scale: RadiusScale,
    trip_count: usize,
}

impl TrafficView {
    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    /// Zero for ids that aren't stations of the map
    pub fn traffic_of(&self, short_name: &str) -> StationTraffic {
        self.traffic.get(short_name).copied().unwrap_or_default()
    }

    pub fn scale(&self) -> RadiusScale {
        self.scale
    }

    pub fn radius_of(&self, short_name: &str) -> f64 {
        self.scale.radius(self.traffic_of(short_name).total_traffic)
    }

    /// Trips left after filtering
    pub fn trip_count(&self) -> usize {
        self.trip_count
    }

    pub fn time_display(&self) -> TimeDisplay {
        TimeDisplay::of(self.filter)
    }
}

/// A station bubble ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<'m> {
    pub station: &'m Station,
    pub traffic: StationTraffic,
    pub cx: Pixels,
    pub cy: Pixels,
    pub radius: Pixels,
}

impl Marker<'_> {
    /// eg. `"12 trips (5 departures, 7 arrivals)"`
    pub fn title(&self) -> String {
        self.traffic.to_string()
    }
}

/// Stations and trips once both have loaded, plus the view for the current slider position.
///
/// The scale's domain is fixed to the busiest station over all trips when the map is built,
/// moving the slider only switches the radius range.
#[derive(Debug)]
pub struct TrafficMap {
    stations: Vec<Station>,
    trips: Vec<Trip>,
    domain_max: u32,
    current: TrafficView,
}

impl TrafficMap {
    pub fn new(stations: Vec<Station>, trips: Vec<Trip>) -> TrafficMap {
        let traffic = compute_station_traffic(&stations, &trips);
        let domain_max = max_total_traffic(traffic.values());
        tracing::info!(
            stations = stations.len(),
            trips = trips.len(),
            busiest = domain_max,
            "built traffic map"
        );
        let current = TrafficView {
            filter: TimeFilter::Any,
            scale: RadiusScale::for_filter(domain_max, TimeFilter::Any),
            trip_count: trips.len(),
            traffic,
        };
        TrafficMap {
            stations,
            trips,
            domain_max,
            current,
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn station(&self, short_name: &str) -> Option<&Station> {
        self.stations
            .iter()
            .find(|station| station.short_name == short_name)
    }

    /// Filter the trips and recount every station, leaving the map untouched
    pub fn view(&self, filter: TimeFilter) -> TrafficView {
        if filter == self.current.filter {
            return self.current.clone();
        }
        let trips: Vec<&Trip> = filter_trips_by_time(&self.trips, filter).collect();
        let traffic = compute_station_traffic(&self.stations, trips.iter().copied());
        tracing::debug!(%filter, trips = trips.len(), "recomputed traffic");
        TrafficView {
            filter,
            traffic,
            scale: RadiusScale::for_filter(self.domain_max, filter),
            trip_count: trips.len(),
        }
    }

    /// The slider moved
    pub fn set_time_filter(&mut self, filter: TimeFilter) {
        self.current = self.view(filter);
    }

    pub fn current(&self) -> &TrafficView {
        &self.current
    }

    /// Positions every station through `projection`, nothing is cached between calls so this
    /// has to run again whenever the viewport changes
    pub fn markers<'m, P>(&'m self, view: &TrafficView, projection: &P) -> Vec<Marker<'m>>
    where
        P: Projection + ?Sized,
    {
        self.stations
            .iter()
            .map(|station| {
                let traffic = view.traffic_of(&station.short_name);
                let (cx, cy) = projection.project(station.location);
                Marker {
                    station,
                    traffic,
                    cx,
                    cy,
                    radius: Pixels::new(view.scale.radius(traffic.total_traffic)),
                }
            })
            .collect()
    }
}
