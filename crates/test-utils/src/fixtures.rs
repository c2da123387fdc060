//! Common test fixtures for radar-overlay tests.
//!
//! Pre-defined world files, coordinates and colors that describe realistic
//! composite reflectivity scenarios.

/// World-file field sets in file order:
/// `[pixel_width, row_rotation, column_rotation, pixel_height, anchor_lon, anchor_lat]`.
pub mod world_file {
    /// 500x500 raster of 0.01 degree pixels anchored at (45N, 100W).
    pub const REFERENCE: [f64; 6] = [0.01, 0.0, 0.0, -0.01, -100.0, 45.0];
    pub const REFERENCE_DIMS: (u32, u32) = (500, 500);

    /// The national n0q composite: 0.005 degree pixels from (50N, 126W).
    pub const NATIONAL_COMPOSITE: [f64; 6] = [0.005, 0.0, 0.0, -0.005, -126.0, 50.0];
    pub const NATIONAL_COMPOSITE_DIMS: (u32, u32) = (12200, 5400);

    /// Coarse 1 degree raster anchored at (50N, 110W); handy for compositing tests.
    pub const COARSE: [f64; 6] = [1.0, 0.0, 0.0, -1.0, -110.0, 50.0];
    pub const COARSE_DIMS: (u32, u32) = (20, 20);

    /// Rotated raster.
    pub const SKEWED: [f64; 6] = [0.01, 0.001, 0.0, -0.01, -100.0, 45.0];

    /// Rectangular pixels.
    pub const NON_SQUARE: [f64; 6] = [0.01, 0.0, 0.0, -0.02, -100.0, 45.0];

    /// Render fields as world-file text, one value per line.
    pub fn to_text(fields: &[f64; 6]) -> String {
        fields.iter().map(|v| format!("{}\n", v)).collect()
    }
}

/// Reference coordinates as (lat, lon).
pub mod coords {
    /// Northwest suburbs of Chicago.
    pub const CHICAGO_SUBURBS: (f64, f64) = (42.114229, -88.113506);

    /// South of Denver.
    pub const DENVER: (f64, f64) = (39.547561, -104.980642);

    /// Center of the reference world file's raster.
    pub const REFERENCE_CENTER: (f64, f64) = (42.5, -97.5);
}

/// Colors used by the compositing tests.
pub mod colors {
    pub const TILE_GREY: [u8; 4] = [200, 200, 200, 255];
    pub const RADAR_GREEN: [u8; 4] = [0, 200, 0, 255];
}
