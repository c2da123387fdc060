//! Georeferencing of north-up rasters described by world files.
//!
//! Only axis-aligned rasters with square pixels are supported; anything else
//! is rejected when the georeference is constructed.

pub mod georeference;
pub mod world_file;

pub use georeference::{PixelCoordinate, RasterGeoreference};
pub use world_file::WorldFile;
