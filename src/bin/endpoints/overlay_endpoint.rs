use std::sync::Arc;

use serde::Deserialize;
use traffic_search::TimeFilter;
use warp::Filter;

use bike_traffic::draw::write_overlay_svg;
use bike_traffic::feed::LaneLayer;
use bike_traffic::map::{Viewport, ViewportEvent, ViewportNotifier};
use bike_traffic::TrafficMap;

use super::with_data;

#[derive(Debug, Deserialize)]
struct OverlayQuery {
    #[serde(default)]
    time: TimeFilter,
    lon: Option<f64>,
    lat: Option<f64>,
    zoom: Option<f64>,
    width: Option<u32>,
    height: Option<u32>,
}

impl OverlayQuery {
    /// The query as the viewport changes a client would have made to get there
    fn events(&self, start: &Viewport) -> Vec<ViewportEvent> {
        let mut events = vec![];
        if self.lon.is_some() || self.lat.is_some() {
            let center = start.center();
            events.push(ViewportEvent::Move {
                center: geo::Point::new(
                    self.lon.unwrap_or_else(|| center.x()),
                    self.lat.unwrap_or_else(|| center.y()),
                ),
            });
        }
        if let Some(zoom) = self.zoom {
            events.push(ViewportEvent::Zoom { zoom });
        }
        if self.width.is_some() || self.height.is_some() {
            events.push(ViewportEvent::Resize {
                width: self.width.unwrap_or_else(|| start.width()),
                height: self.height.unwrap_or_else(|| start.height()),
            });
        }
        events.push(ViewportEvent::MoveEnd);
        events
    }
}

#[derive(Debug)]
struct RenderFailed;

impl warp::reject::Reject for RenderFailed {}

async fn overlay_handler(
    query: OverlayQuery,
    map: Arc<TrafficMap>,
    lanes: Arc<Vec<LaneLayer>>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let view = map.view(query.time);
    let start = Viewport::default();

    let mut svg = Vec::new();
    let mut rendered = Ok(());
    {
        let mut notifier = ViewportNotifier::new(start);
        notifier.on_change(|_event, viewport| {
            svg.clear();
            rendered = write_overlay_svg(&mut svg, &map, &view, viewport, &lanes);
        });
        for event in query.events(&start) {
            notifier.notify(event);
        }
    }

    match rendered {
        Ok(()) => Ok(warp::reply::with_header(
            svg,
            "content-type",
            "image/svg+xml",
        )),
        Err(err) => {
            tracing::error!("failed to render overlay: {}", err);
            Err(warp::reject::custom(RenderFailed))
        }
    }
}

pub fn overlay_route(
    map: Arc<TrafficMap>,
    lanes: Arc<Vec<LaneLayer>>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let cors = warp::cors().allow_any_origin();
    warp::path!("overlay.svg")
        .and(warp::get())
        .and(warp::query::<OverlayQuery>())
        .and(with_data(map))
        .and(with_data(lanes))
        .and_then(overlay_handler)
        .with(cors)
}
