use std::sync::Arc;

use warp::Filter;

use bike_traffic::TrafficMap;

use super::{with_data, FETraffic, TimeQuery};

async fn traffic_handler(
    query: TimeQuery,
    map: Arc<TrafficMap>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let view = map.view(query.time);
    tracing::info!(
        "Traffic for {} covers {} trips at {} stations",
        view.filter(),
        view.trip_count(),
        map.stations().len()
    );
    Ok(warp::reply::json(&FETraffic::new(map.stations(), &view)))
}

pub fn traffic_route(
    map: Arc<TrafficMap>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let cors = warp::cors().allow_any_origin();
    warp::path!("traffic")
        .and(warp::get())
        .and(warp::query::<TimeQuery>())
        .and(with_data(map))
        .and_then(traffic_handler)
        .with(cors)
}
