//! Common types and utilities shared across the radar-overlay crates.

pub mod bbox;
pub mod coord;
pub mod error;
pub mod station;
pub mod tile;
pub mod time;

pub use bbox::BoundingBox;
pub use coord::GpsCoordinate;
pub use error::{OverlayError, OverlayResult};
pub use station::{RadarStation, StationTable, StationTemplate};
pub use tile::{grid_dimensions, locate, GridCell, MAX_ZOOM};
pub use time::{round_to_five_minutes, RadarArchive};
