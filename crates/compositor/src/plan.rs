//! Crop planning: which radar pixels cover a target box, and how much of the
//! target falls outside the raster on each edge.

use georef::{PixelCoordinate, RasterGeoreference};
use radar_common::{BoundingBox, GpsCoordinate, OverlayError, OverlayResult};
use serde::Serialize;

/// Largest canvas, in pixels, a single composite may allocate (256 MiB of RGBA).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// A rectangle of radar pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Pixels of the requested rectangle lying beyond each raster edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Overflow {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Overflow {
    pub fn is_zero(&self) -> bool {
        *self == Overflow::default()
    }
}

/// Where to crop the radar and how large the unclipped canvas is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropPlan {
    /// Part of the requested rectangle inside the raster.
    pub window: PixelWindow,
    pub overflow: Overflow,
    /// Requested rectangle width: window plus left and right overflow.
    pub canvas_width: u32,
    /// Requested rectangle height: window plus top and bottom overflow.
    pub canvas_height: u32,
}

/// Outcome of planning a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Coverage {
    /// The target and the raster share no pixels.
    None,
    /// Some or all of the target is covered.
    Partial(CropPlan),
}

/// Map `target` into the radar's pixel space and clip it to the raster.
///
/// The north-west corner gives the first pixel and the south-east corner the
/// exclusive end on each axis. A target narrower than one radar pixel is
/// widened to one pixel. A target that only touches the raster's extent is not
/// coverage. Fails with `UnsupportedExtent` if the unclipped rectangle would
/// exceed [`MAX_CANVAS_PIXELS`].
pub fn plan_crop(georef: &RasterGeoreference, target: &BoundingBox) -> OverlayResult<Coverage> {
    if !target.overlaps(&georef.geo_extent()) {
        return Ok(Coverage::None);
    }

    // Pixel indices saturate at the i64 range for extreme targets.
    let start = georef.to_pixel(GpsCoordinate::unchecked(target.max_y, target.min_x));
    let end = georef.to_pixel(GpsCoordinate::unchecked(target.min_y, target.max_x));
    let end = PixelCoordinate::new(
        end.x.max(start.x.saturating_add(1)),
        end.y.max(start.y.saturating_add(1)),
    );

    let (width, height) = georef.dims();
    let (width, height) = (width as i64, height as i64);

    if end.x <= 0 || start.x >= width || end.y <= 0 || start.y >= height {
        return Ok(Coverage::None);
    }

    let canvas_width = end.x.saturating_sub(start.x) as u64;
    let canvas_height = end.y.saturating_sub(start.y) as u64;
    if canvas_width.saturating_mul(canvas_height) > MAX_CANVAS_PIXELS {
        return Err(OverlayError::UnsupportedExtent(format!(
            "target {:?} needs a {}x{} canvas",
            target, canvas_width, canvas_height
        )));
    }

    let clipped_start = PixelCoordinate::new(start.x.max(0), start.y.max(0));
    let clipped_end = PixelCoordinate::new(end.x.min(width), end.y.min(height));

    let window = PixelWindow {
        x: clipped_start.x as u32,
        y: clipped_start.y as u32,
        width: (clipped_end.x - clipped_start.x) as u32,
        height: (clipped_end.y - clipped_start.y) as u32,
    };
    let overflow = Overflow {
        left: (clipped_start.x - start.x) as u32,
        right: (end.x - clipped_end.x) as u32,
        top: (clipped_start.y - start.y) as u32,
        bottom: (end.y - clipped_end.y) as u32,
    };

    Ok(Coverage::Partial(CropPlan {
        window,
        overflow,
        canvas_width: canvas_width as u32,
        canvas_height: canvas_height as u32,
    }))
}
