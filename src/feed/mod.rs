//! Reading the station list, the trip log and the bike lane networks.

pub mod db;
pub mod lanes;
pub mod model;
pub mod time;

pub use db::{load_all, FeedData, LoadError};
pub use lanes::{LaneLayer, LaneStyle};
