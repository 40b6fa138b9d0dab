//! Prints the traffic of every station, busiest first, for `station_traffic [time]`
//! where time is a minute of the day or `any`.

use bike_traffic::{feed, Config, TrafficMap};
use traffic_search::TimeFilter;

#[tokio::main]
async fn main() {
    bike_traffic::init_logging();

    let filter = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<TimeFilter>() {
            Ok(filter) => filter,
            Err(err) => {
                tracing::error!("{}", err);
                std::process::exit(1);
            }
        },
        None => TimeFilter::Any,
    };

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

    let mut map = TrafficMap::new(data.stations, data.trips);
    map.set_time_filter(filter);
    let view = map.current();

    let display = view.time_display();
    if display.any_time_visible() {
        println!("(any time)");
    } else {
        println!("{}", display.selected_time());
    }
    println!("{} trips", view.trip_count());

    let mut stations: Vec<_> = map
        .stations()
        .iter()
        .map(|station| (station, view.traffic_of(&station.short_name)))
        .collect();
    stations.sort_by(|(a, a_traffic), (b, b_traffic)| {
        b_traffic
            .total_traffic
            .cmp(&a_traffic.total_traffic)
            .then_with(|| a.short_name.cmp(&b.short_name))
    });

    for (station, traffic) in stations {
        println!(
            "{:>8} r={:>5.1} {} {}",
            station.short_name,
            view.radius_of(&station.short_name),
            station.name.as_deref().unwrap_or(""),
            traffic
        );
    }
}
