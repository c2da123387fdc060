//! Mapping between GPS coordinates and raster pixel coordinates.

use crate::WorldFile;
use radar_common::{BoundingBox, GpsCoordinate, OverlayError, OverlayResult};
use tracing::debug;

/// Integer pixel offsets into one raster's grid, `(0, 0)` at the top-left.
///
/// Values outside the raster are legal: they describe how far a geographic
/// point lies beyond the raster's edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelCoordinate {
    pub x: i64,
    pub y: i64,
}

impl PixelCoordinate {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// A validated, axis-aligned, square-pixel georeference for a raster.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGeoreference {
    pixel_width: f64,
    width: u32,
    height: u32,
    extent: BoundingBox,
}

impl RasterGeoreference {
    /// Construct from the six world-file fields and the raster's pixel size.
    ///
    /// Fails with `SkewedMap` if either rotation term is non-zero and with
    /// `NonSquarePixel` unless `pixel_width == -pixel_height` with a positive
    /// width. Rasters whose extent leaves the lat/lon domain (antimeridian or
    /// pole crossings) are rejected with `UnsupportedExtent`.
    pub fn new(world: &WorldFile, (width, height): (u32, u32)) -> OverlayResult<Self> {
        if world.row_rotation != 0.0 || world.column_rotation != 0.0 {
            return Err(OverlayError::SkewedMap {
                row_rotation: world.row_rotation,
                column_rotation: world.column_rotation,
            });
        }

        let pixel_width = world.pixel_width;
        if pixel_width != -world.pixel_height || !(pixel_width > 0.0 && pixel_width.is_finite()) {
            return Err(OverlayError::NonSquarePixel {
                pixel_width,
                pixel_height: world.pixel_height,
            });
        }

        if width == 0 || height == 0 {
            return Err(OverlayError::UnsupportedExtent(format!(
                "raster has no pixels ({}x{})",
                width, height
            )));
        }

        let extent = BoundingBox::new(
            world.anchor_lon,
            world.anchor_lat - height as f64 * pixel_width,
            world.anchor_lon + width as f64 * pixel_width,
            world.anchor_lat,
        );
        if !GpsCoordinate::in_range(extent.min_y, extent.min_x)
            || !GpsCoordinate::in_range(extent.max_y, extent.max_x)
        {
            return Err(OverlayError::UnsupportedExtent(format!(
                "raster extent {:?} leaves the lat/lon domain",
                extent
            )));
        }

        debug!(
            pixel_width,
            width,
            height,
            min_lon = extent.min_x,
            max_lat = extent.max_y,
            "Constructed raster georeference"
        );
        Ok(Self {
            pixel_width,
            width,
            height,
            extent,
        })
    }

    /// Construct from world-file fields in file order.
    pub fn from_fields(fields: [f64; 6], dims: (u32, u32)) -> OverlayResult<Self> {
        Self::new(&WorldFile::from_fields(fields), dims)
    }

    /// Degrees per pixel on both axes.
    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    /// Raster size in pixels as (width, height).
    pub fn dims(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Geographic area covered by the whole raster.
    pub fn geo_extent(&self) -> BoundingBox {
        self.extent
    }

    /// Pixel containing a coordinate.
    ///
    /// Never clamps: coordinates west of or north of the raster give negative
    /// offsets, and coordinates east of or south of it give offsets at or
    /// beyond the raster size.
    pub fn to_pixel(&self, coordinate: GpsCoordinate) -> PixelCoordinate {
        let x = ((coordinate.lon - self.extent.min_x) / self.pixel_width).floor();
        let y = ((self.extent.max_y - coordinate.lat) / self.pixel_width).floor();
        PixelCoordinate::new(x as i64, y as i64)
    }

    /// Coordinate of a pixel's center. Inverse of [`Self::to_pixel`] up to the
    /// pixel quantization.
    pub fn pixel_center(&self, pixel: PixelCoordinate) -> GpsCoordinate {
        GpsCoordinate::unchecked(
            self.extent.max_y - (pixel.y as f64 + 0.5) * self.pixel_width,
            self.extent.min_x + (pixel.x as f64 + 0.5) * self.pixel_width,
        )
    }

    /// Whether a pixel lies inside the raster.
    pub fn contains_pixel(&self, pixel: PixelCoordinate) -> bool {
        (0..self.width as i64).contains(&pixel.x) && (0..self.height as i64).contains(&pixel.y)
    }
}
