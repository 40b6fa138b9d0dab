use std::sync::Arc;

use serde::{Deserialize, Serialize};
use traffic_search::{Station, StationTraffic, TimeFilter};
use warp::Filter;

use bike_traffic::{TimeDisplay, TrafficView};

mod overlay_endpoint;
mod station_endpoint;
mod traffic_endpoint;

pub use overlay_endpoint::overlay_route;
pub use station_endpoint::station_route;
pub use traffic_endpoint::traffic_route;

pub fn with_data<D: Sync + Send>(
    db: Arc<D>,
) -> impl Filter<Extract = (Arc<D>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || db.clone())
}

/// `?time=` as set by the slider, absent means any time
#[derive(Debug, Default, Deserialize)]
pub struct TimeQuery {
    #[serde(default)]
    pub time: TimeFilter,
}

#[derive(Serialize)]
pub struct FEStation<'s> {
    short_name: &'s str,
    name: Option<&'s str>,
    lon: f64,
    lat: f64,
    #[serde(flatten)]
    traffic: StationTraffic,
    radius: f64,
}

impl<'s> FEStation<'s> {
    pub fn new(station: &'s Station, view: &TrafficView) -> FEStation<'s> {
        FEStation {
            short_name: &station.short_name,
            name: station.name.as_deref(),
            lon: station.lon(),
            lat: station.lat(),
            traffic: view.traffic_of(&station.short_name),
            radius: view.radius_of(&station.short_name),
        }
    }
}

#[derive(Serialize)]
pub struct FETraffic<'s> {
    /// null when unfiltered
    time: TimeDisplay,
    time_filter: TimeFilter,
    trips: usize,
    stations: Vec<FEStation<'s>>,
}

impl<'s> FETraffic<'s> {
    pub fn new(stations: &'s [Station], view: &TrafficView) -> FETraffic<'s> {
        FETraffic {
            time: view.time_display(),
            time_filter: view.filter(),
            trips: view.trip_count(),
            stations: stations
                .iter()
                .map(|station| FEStation::new(station, view))
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bike_traffic::TrafficMap;
    use chrono::NaiveDate;
    use traffic_search::Trip;
    use warp::http::StatusCode;

    fn map() -> Arc<TrafficMap> {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Arc::new(TrafficMap::new(
            vec![
                Station::new("A 1", -71.09, 42.36),
                Station::new("B", -71.1, 42.37),
            ],
            vec![Trip {
                start_station_id: "A 1".to_owned(),
                end_station_id: "B".to_owned(),
                started_at: day.and_hms_opt(8, 10, 0).unwrap(),
                ended_at: day.and_hms_opt(8, 25, 0).unwrap(),
            }],
        ))
    }

    fn json(body: &[u8]) -> serde_json::Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn traffic_unfiltered() {
        let res = warp::test::request()
            .method("GET")
            .path("/traffic")
            .reply(&traffic_route(map()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json(res.body());
        assert!(body["time"].is_null());
        assert_eq!(body["time_filter"], -1);
        assert_eq!(body["trips"], 1);
        let station = &body["stations"][0];
        assert_eq!(station["short_name"], "A 1");
        assert_eq!(station["departures"], 1);
        assert_eq!(station["arrivals"], 0);
        assert_eq!(station["total_traffic"], 1);
        assert_eq!(station["radius"], 25.0);
        assert!(station["name"].is_null());
    }

    #[tokio::test]
    async fn traffic_around_a_time() {
        let res = warp::test::request()
            .path("/traffic?time=480")
            .reply(&traffic_route(map()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json(res.body());
        assert_eq!(body["time"], "8:00 AM");
        assert_eq!(body["time_filter"], 480);
        assert_eq!(body["stations"][1]["radius"], 50.0);

        let res = warp::test::request()
            .path("/traffic?time=600")
            .reply(&traffic_route(map()))
            .await;
        let body = json(res.body());
        assert_eq!(body["trips"], 0);
        assert_eq!(body["stations"][0]["total_traffic"], 0);
        assert_eq!(body["stations"][0]["radius"], 3.0);
    }

    #[tokio::test]
    async fn bad_time_is_rejected() {
        for path in &["/traffic?time=1440", "/traffic?time=noon", "/traffic?time=-2"] {
            let res = warp::test::request()
                .path(path)
                .reply(&traffic_route(map()))
                .await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", path);
        }
    }

    #[tokio::test]
    async fn station_name_is_decoded() {
        let res = warp::test::request()
            .path("/stations/A%201")
            .reply(&station_route(map()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json(res.body());
        assert_eq!(body["short_name"], "A 1");
        assert_eq!(body["total_traffic"], 1);
    }

    #[tokio::test]
    async fn station_with_time() {
        let res = warp::test::request()
            .path("/stations/B?time=600")
            .reply(&station_route(map()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json(res.body());
        assert_eq!(body["total_traffic"], 0);
        assert_eq!(body["radius"], 3.0);
    }

    #[tokio::test]
    async fn unknown_station_is_not_found() {
        let res = warp::test::request()
            .path("/stations/Z")
            .reply(&station_route(map()))
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
