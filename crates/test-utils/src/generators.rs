//! Synthetic rasters and on-disk fixtures.
//!
//! Rasters are small and fully predictable so that crops, fills and blends
//! can be checked pixel by pixel.

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// A raster filled with one color.
pub fn solid_raster(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

/// A raster whose pixels encode their own position: `r = x`, `g = y`,
/// `b = 128`, opaque. Never pure black, so it survives the no-data filter.
///
/// Positions wrap at 256; keep test rasters smaller than that.
pub fn position_raster(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 128, 255]))
}

/// A checkerboard of pure black and `color`, black at (0, 0).
pub fn black_checkerboard(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba(color)
        }
    })
}

/// Create a scratch directory that is removed when dropped.
pub fn scratch_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create scratch directory")
}

/// Write a raster as PNG into `dir`.
pub fn write_png(dir: &Path, name: &str, raster: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    raster.save(&path).expect("failed to write fixture PNG");
    path
}

/// Write world-file text into `dir`.
pub fn write_world_file(dir: &Path, name: &str, fields: &[f64; 6]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, crate::world_file::to_text(fields)).expect("failed to write world file");
    path
}
