//! Error types for radar-overlay operations.

use thiserror::Error;

/// Result type alias using OverlayError.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Primary error type for locating, georeferencing and compositing.
///
/// Every failure is local to the one tile being produced; nothing here is
/// retried automatically.
#[derive(Debug, Error)]
pub enum OverlayError {
    // === Caller Errors ===
    #[error("Coordinate out of range: lat={lat}, lon={lon}")]
    OutOfRange { lat: f64, lon: f64 },

    #[error("Unsupported zoom level: {0}")]
    InvalidZoom(u32),

    #[error("Grid cell {x}/{y} does not exist at zoom {zoom}")]
    InvalidTile { x: u32, y: u32, zoom: u32 },

    // === Georeferencing Errors ===
    #[error("Skewed map: row rotation {row_rotation}, column rotation {column_rotation}")]
    SkewedMap {
        row_rotation: f64,
        column_rotation: f64,
    },

    #[error("Non-square pixels: width {pixel_width}, height {pixel_height}")]
    NonSquarePixel { pixel_width: f64, pixel_height: f64 },

    #[error("Invalid world file: {0}")]
    InvalidWorldFile(String),

    #[error("Unsupported raster extent: {0}")]
    UnsupportedExtent(String),

    // === Data Errors ===
    #[error("Missing source data: {0}")]
    MissingSourceData(String),

    #[error("Invalid station table: {0}")]
    StationTable(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl OverlayError {
    /// Whether the error was caused by the request itself rather than by the
    /// source data it was run against.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            OverlayError::OutOfRange { .. }
                | OverlayError::InvalidZoom(_)
                | OverlayError::InvalidTile { .. }
        )
    }

    /// Short machine-readable label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            OverlayError::OutOfRange { .. } => "out_of_range",
            OverlayError::InvalidZoom(_) => "invalid_zoom",
            OverlayError::InvalidTile { .. } => "invalid_tile",
            OverlayError::SkewedMap { .. } => "skewed_map",
            OverlayError::NonSquarePixel { .. } => "non_square_pixel",
            OverlayError::InvalidWorldFile(_) => "invalid_world_file",
            OverlayError::UnsupportedExtent(_) => "unsupported_extent",
            OverlayError::MissingSourceData(_) => "missing_source_data",
            OverlayError::StationTable(_) => "station_table",
            OverlayError::Io(_) => "io",
        }
    }
}

impl From<std::io::Error> for OverlayError {
    fn from(err: std::io::Error) -> Self {
        OverlayError::Io(err.to_string())
    }
}
