//! Reading radar sources and writing composites.

use georef::{RasterGeoreference, WorldFile};
use image::{ImageFormat, RgbaImage};
use radar_common::{OverlayError, OverlayResult};
use std::path::Path;
use tracing::{debug, info};

/// Decode an image file into RGBA.
///
/// A missing or undecodable file is `MissingSourceData`.
pub fn load_raster(path: &Path) -> OverlayResult<RgbaImage> {
    let image = image::open(path).map_err(|e| {
        OverlayError::MissingSourceData(format!("{}: {}", path.display(), e))
    })?;
    let raster = image.to_rgba8();
    debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        "Loaded raster"
    );
    Ok(raster)
}

/// A radar raster together with its validated georeference.
///
/// Read once and shared read-only between composites.
#[derive(Debug, Clone)]
pub struct RadarSource {
    raster: RgbaImage,
    georef: RasterGeoreference,
}

impl RadarSource {
    /// Load the radar image and its world file.
    pub fn open(image_path: &Path, world_file_path: &Path) -> OverlayResult<Self> {
        let raster = load_raster(image_path)?;
        let text = std::fs::read_to_string(world_file_path).map_err(|e| {
            OverlayError::MissingSourceData(format!("{}: {}", world_file_path.display(), e))
        })?;
        let world = WorldFile::parse(&text)?;
        let georef = RasterGeoreference::new(&world, raster.dimensions())?;

        info!(
            image = %image_path.display(),
            width = raster.width(),
            height = raster.height(),
            pixel_width = georef.pixel_width(),
            "Opened radar source"
        );
        Ok(Self { raster, georef })
    }

    /// Pair an in-memory raster with a georeference built for the same size.
    pub fn from_parts(raster: RgbaImage, georef: RasterGeoreference) -> OverlayResult<Self> {
        if raster.dimensions() != georef.dims() {
            return Err(OverlayError::MissingSourceData(format!(
                "raster is {:?} but georeference expects {:?}",
                raster.dimensions(),
                georef.dims()
            )));
        }
        Ok(Self { raster, georef })
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    pub fn georef(&self) -> &RasterGeoreference {
        &self.georef
    }
}

/// Write a raster as PNG. The image is written next to `path` first and
/// renamed into place, so readers never see a partial file.
pub fn save_png(raster: &RgbaImage, path: &Path) -> OverlayResult<()> {
    let temp_path = path.with_extension("png.partial");

    if let Err(e) = raster.save_with_format(&temp_path, ImageFormat::Png) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(OverlayError::Io(format!("{}: {}", temp_path.display(), e)));
    }
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    debug!(path = %path.display(), "Wrote composite");
    Ok(())
}
