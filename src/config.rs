use std::path::PathBuf;

use crate::feed::LaneStyle;

/// Where a lane layer is read from and how it is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct LaneSource {
    pub id: String,
    pub path: PathBuf,
    pub style: LaneStyle,
}

/// Settings read from the environment, as `PORT`, `STATIC_DIR`, `STATIONS_PATH`, `TRIPS_PATH`,
/// `BOSTON_LANES` and `CAMBRIDGE_LANES`
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub static_dir: PathBuf,
    pub stations_path: PathBuf,
    pub trips_path: PathBuf,
    /// Only the layers whose path is set
    pub lanes: Vec<LaneSource>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT should be a port number, got {value:?}")]
    Port {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::Port { value, source })?,
            None => 8085,
        };
        let path_or =
            |key: &str, default: &str| PathBuf::from(var(key).unwrap_or_else(|| default.to_owned()));

        let mut lanes = vec![];
        for (key, id, style) in vec![
            ("BOSTON_LANES", "bike-lanes", LaneStyle::boston()),
            ("CAMBRIDGE_LANES", "cambridge-bike-lanes", LaneStyle::cambridge()),
        ] {
            if let Some(path) = var(key).filter(|path| !path.is_empty()) {
                lanes.push(LaneSource {
                    id: id.to_owned(),
                    path: path.into(),
                    style,
                });
            }
        }

        Ok(Config {
            port,
            static_dir: path_or("STATIC_DIR", "frontend/build"),
            stations_path: path_or("STATIONS_PATH", "data/bluebikes-stations.json"),
            trips_path: path_or("TRIPS_PATH", "data/bluebikes-traffic-2024-03.csv"),
            lanes,
        })
    }
}
