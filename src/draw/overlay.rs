use std::fmt;
use std::io;

use geo::LineString;

use crate::feed::LaneLayer;
use crate::map::{Marker, Projection, TrafficMap, TrafficView, Viewport};
use crate::write_xml;

/// Path data for a set of polylines, one `M` per line
struct PolylinePath<'a, P: ?Sized> {
    lines: &'a [LineString<f64>],
    projection: &'a P,
}

impl<P: Projection + ?Sized> fmt::Display for PolylinePath<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines {
            let mut points = line.points();
            if let Some(first) = points.next() {
                let (x, y) = self.projection.project(first);
                write!(f, "M {} {} ", x, y)?;
            }
            for point in points {
                let (x, y) = self.projection.project(point);
                write!(f, "L {} {} ", x, y)?;
            }
        }
        Ok(())
    }
}

impl LaneLayer {
    pub(crate) fn write_svg_fragment_to<P: Projection + ?Sized>(
        &self,
        w: &mut dyn io::Write,
        projection: &P,
    ) -> io::Result<()> {
        write_xml!(w,
            <path
                id={self.id}
                fill="none"
                stroke={self.style.color}
                stroke-width={self.style.width}
                stroke-opacity={self.style.opacity}
                d={PolylinePath { lines: &self.lines, projection }} />)
    }
}

impl Marker<'_> {
    pub(crate) fn write_svg_fragment_to(&self, w: &mut dyn io::Write) -> io::Result<()> {
        write_xml!(w,
            <circle
                data-station={self.station.short_name}
                cx={self.cx}
                cy={self.cy}
                r={self.radius}
                fill="steelblue"
                stroke="white"
                stroke-width="1"
                opacity="0.8">
                <title>{self.title()}</title>
            </circle>)
    }
}

/// A standalone SVG the size of the viewport: bike lanes underneath, a bubble per station on
/// top and the selected time in the corner
pub fn write_overlay_svg(
    w: &mut dyn io::Write,
    map: &TrafficMap,
    view: &TrafficView,
    viewport: &Viewport,
    lanes: &[LaneLayer],
) -> io::Result<()> {
    let (width, height) = (viewport.width(), viewport.height());
    writeln!(
        w,
        r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, height, width, height
    )?;
    write_xml!(w, <style>{include_str!("Overlay.css")}</style>)?;

    write_xml!(w, <g class="lanes">)?;
    for layer in lanes {
        layer.write_svg_fragment_to(w, viewport)?;
    }
    write_xml!(w, </g>)?;

    write_xml!(w, <g class="stations">)?;
    for marker in map.markers(view, viewport) {
        marker.write_svg_fragment_to(w)?;
    }
    write_xml!(w, </g>)?;

    let display = view.time_display();
    write_xml!(w,
        <g id="time" transform="translate(10, 24)">
            <text id="time-display">{display.selected_time()}</text>
            <text id="time-any" visibility={if display.any_time_visible() { "visible" } else { "hidden" }}>"(any time)"</text>
        </g>
    )?;

    writeln!(w, "</svg>")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::feed::LaneStyle;
    use chrono::NaiveDate;
    use geo::Coord;
    use traffic_search::{Station, TimeFilter, Trip};

    fn map() -> TrafficMap {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        TrafficMap::new(
            vec![
                Station::new("A32000", -71.09415, 42.36027),
                Station::new("M&M", -71.1, 42.37),
            ],
            vec![Trip {
                start_station_id: "A32000".to_owned(),
                end_station_id: "M&M".to_owned(),
                started_at: day.and_hms_opt(8, 10, 0).unwrap(),
                ended_at: day.and_hms_opt(8, 25, 0).unwrap(),
            }],
        )
    }

    fn render(map: &TrafficMap, view: &TrafficView, lanes: &[LaneLayer]) -> String {
        let mut svg = Vec::new();
        write_overlay_svg(&mut svg, map, view, &Viewport::default(), lanes).unwrap();
        String::from_utf8(svg).unwrap()
    }

    #[test]
    fn station_bubbles() {
        let map = map();
        let svg = render(&map, map.current(), &[]);
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 2);
        // centre of the default viewport, biggest radius for the busiest station
        assert!(svg.contains(r#"data-station="A32000" cx="512.0" cy="384.0" r="25.0""#));
        assert!(svg.contains("<title>1 trips (1 departures, 0 arrivals)</title>"));
        assert!(svg.contains(r#"data-station="M&amp;M""#));
        assert!(svg.contains(r#"<text id="time-any" visibility="visible">(any time)</text>"#));
    }

    #[test]
    fn filtered_time_is_shown() {
        let map = map();
        let view = map.view(TimeFilter::from_slider(600).unwrap());
        let svg = render(&map, &view, &[]);
        assert!(svg.contains(r#"<text id="time-display">10:00 AM</text>"#));
        assert!(svg.contains(r#"visibility="hidden""#));
        // nothing left around 10:00, bubbles shrink to the bottom of the filtered range
        assert_eq!(svg.matches(r#"r="3.0""#).count(), 2);
        assert!(svg.contains("<title>0 trips (0 departures, 0 arrivals)</title>"));
    }

    #[test]
    fn lanes_are_drawn_first() {
        let map = map();
        let lanes = vec![LaneLayer {
            id: "bike-lanes".to_owned(),
            style: LaneStyle::boston(),
            lines: vec![LineString::from(vec![
                Coord { x: -71.09415, y: 42.36027 },
                Coord { x: -71.09415, y: 42.36027 },
            ])],
        }];
        let svg = render(&map, map.current(), &lanes);
        assert!(svg.contains(
            r##"<path id="bike-lanes" fill="none" stroke="#32D400" stroke-width="5" stroke-opacity="0.6" d="M 512.0 384.0 L 512.0 384.0 " />"##
        ));
        assert!(svg.find("<path").unwrap() < svg.find("<circle").unwrap());
    }
}
