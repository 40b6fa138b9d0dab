use std::sync::Arc;

use warp::Filter;

mod endpoints;
use bike_traffic::{feed, Config, TrafficMap};

#[tokio::main]
async fn main() {
    bike_traffic::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            std::process::exit(1);
        }
    };

    let data = match feed::load_all(&config).await {
        Ok(data) => data,
        Err(err) => {
            tracing::error!("Error loading station or traffic data: {}", err);
            std::process::exit(1);
        }
    };

    let map = Arc::new(TrafficMap::new(data.stations, data.trips));
    let lanes = Arc::new(data.lanes);

    tracing::info!("Starting web server on port {}", config.port);
    warp::serve(
        warp::fs::dir(config.static_dir)
            .or(endpoints::traffic_route(map.clone()))
            .or(endpoints::station_route(map.clone()))
            .or(endpoints::overlay_route(map, lanes)),
    )
    .run(([127, 0, 0, 1], config.port))
    .await;
}
