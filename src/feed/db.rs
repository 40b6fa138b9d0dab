use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use traffic_search::{Station, Trip};

use super::lanes::{parse_lanes, LaneLayer};
use super::model::{StationDocument, TripRecord};
use crate::config::{Config, LaneSource};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid station list in {path}: {source}")]
    Stations {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid trip log in {path}: {source}")]
    Trips {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid bike lanes in {path}: {source}")]
    Lanes {
        path: PathBuf,
        #[source]
        source: geojson::Error,
    },
    #[error("loading was interrupted: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

/// Everything the overlay is drawn from
#[derive(Debug)]
pub struct FeedData {
    pub stations: Vec<Station>,
    pub trips: Vec<Trip>,
    pub lanes: Vec<LaneLayer>,
}

fn open(path: &Path) -> Result<File, LoadError> {
    tracing::debug!("Opening {}", path.display());
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })
}

pub fn read_stations<R: io::Read>(reader: R) -> Result<Vec<Station>, serde_json::Error> {
    let document: StationDocument = serde_json::from_reader(reader)?;
    Ok(document
        .data
        .stations
        .into_iter()
        .map(Station::from)
        .collect())
}

/// Trip log with a header row, timestamps are parsed as each row is read
pub fn read_trips<R: io::Read>(reader: R) -> Result<Vec<Trip>, csv::Error> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut trips = Vec::new();
    for result in rdr.deserialize() {
        let record: TripRecord = result?;
        trips.push(record.into());
    }
    Ok(trips)
}

pub fn load_stations(path: &Path) -> Result<Vec<Station>, LoadError> {
    let stations =
        read_stations(BufReader::new(open(path)?)).map_err(|source| LoadError::Stations {
            path: path.to_owned(),
            source,
        })?;
    tracing::info!("read {} stations", stations.len());
    Ok(stations)
}

pub fn load_trips(path: &Path) -> Result<Vec<Trip>, LoadError> {
    let trips = read_trips(open(path)?).map_err(|source| LoadError::Trips {
        path: path.to_owned(),
        source,
    })?;
    tracing::info!("read {} trips", trips.len());
    Ok(trips)
}

pub fn load_lanes(source: &LaneSource) -> Result<LaneLayer, LoadError> {
    tracing::debug!("Opening {}", source.path.display());
    let document = std::fs::read_to_string(&source.path).map_err(|err| LoadError::Io {
        path: source.path.clone(),
        source: err,
    })?;
    let layer = parse_lanes(&source.id, source.style.clone(), &document).map_err(|err| {
        LoadError::Lanes {
            path: source.path.clone(),
            source: err,
        }
    })?;
    tracing::info!("read {} lines of {} bike lanes", layer.lines.len(), layer.id);
    Ok(layer)
}

/// Loads stations, trips and lanes side by side, nothing is returned unless all of them loaded
pub async fn load_all(config: &Config) -> Result<FeedData, LoadError> {
    let stations_path = config.stations_path.clone();
    let trips_path = config.trips_path.clone();
    let lane_sources = config.lanes.clone();

    let stations = tokio::task::spawn_blocking(move || load_stations(&stations_path));
    let trips = tokio::task::spawn_blocking(move || load_trips(&trips_path));
    let lanes = tokio::task::spawn_blocking(move || {
        lane_sources
            .iter()
            .map(load_lanes)
            .collect::<Result<Vec<_>, _>>()
    });

    let (stations, trips, lanes) = futures::future::try_join3(stations, trips, lanes).await?;
    Ok(FeedData {
        stations: stations?,
        trips: trips?,
        lanes: lanes?,
    })
}
