//! Bike lane networks published as GeoJSON by the cities

use geo::{Coord, LineString};
use geojson::{GeoJson, Geometry, Value};

/// How a lane network is stroked on the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct LaneStyle {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
}

impl LaneStyle {
    pub fn boston() -> LaneStyle {
        LaneStyle {
            color: "#32D400".to_owned(),
            width: 5.,
            opacity: 0.6,
        }
    }

    pub fn cambridge() -> LaneStyle {
        LaneStyle {
            color: "#00A7FF".to_owned(),
            width: 4.,
            opacity: 0.7,
        }
    }
}

/// One city's lanes, x is longitude and y latitude
#[derive(Debug, Clone)]
pub struct LaneLayer {
    pub id: String,
    pub style: LaneStyle,
    pub lines: Vec<LineString<f64>>,
}

/// Pull every line out of a GeoJSON document. Points and polygons aren't lanes and are dropped.
pub fn parse_lanes(id: &str, style: LaneStyle, document: &str) -> Result<LaneLayer, geojson::Error> {
    let geojson: GeoJson = document.parse()?;
    let mut lines = vec![];
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            for feature in collection.features {
                if let Some(geometry) = feature.geometry {
                    collect_lines(&geometry, &mut lines);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = feature.geometry {
                collect_lines(&geometry, &mut lines);
            }
        }
        GeoJson::Geometry(geometry) => collect_lines(&geometry, &mut lines),
    }
    tracing::debug!(layer = id, lines = lines.len(), "parsed bike lanes");
    Ok(LaneLayer {
        id: id.to_owned(),
        style,
        lines,
    })
}

fn collect_lines(geometry: &Geometry, lines: &mut Vec<LineString<f64>>) {
    match &geometry.value {
        Value::LineString(positions) => lines.push(line_string(positions)),
        Value::MultiLineString(parts) => {
            lines.extend(parts.iter().map(|positions| line_string(positions)))
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_lines(geometry, lines);
            }
        }
        _ => {}
    }
}

/// Positions with fewer than 2 ordinates are skipped, altitude is dropped
fn line_string(positions: &[Vec<f64>]) -> LineString<f64> {
    positions
        .iter()
        .filter(|position| position.len() >= 2)
        .map(|position| Coord {
            x: position[0],
            y: position[1],
        })
        .collect()
}
