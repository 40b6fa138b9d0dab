use std::sync::Arc;

use urlencoding::decode;
use warp::Filter;

use bike_traffic::TrafficMap;

use super::{with_data, FEStation, TimeQuery};

async fn station_handler(
    short_name: String,
    query: TimeQuery,
    map: Arc<TrafficMap>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match decode(&short_name) {
        Ok(short_name) => match map.station(&short_name) {
            Some(station) => {
                let view = map.view(query.time);
                Ok(warp::reply::json(&FEStation::new(station, &view)))
            }
            None => {
                tracing::debug!("no station {:?}", short_name);
                Err(warp::reject::not_found())
            }
        },
        Err(err) => {
            tracing::warn!("failed to decode station={:?}: {:?}", short_name, err);
            Err(warp::reject::not_found())
        }
    }
}

pub fn station_route(
    map: Arc<TrafficMap>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let cors = warp::cors().allow_any_origin();
    warp::path!("stations" / String)
        .and(warp::get())
        .and(warp::query::<TimeQuery>())
        .and(with_data(map))
        .and_then(station_handler)
        .with(cors)
}
