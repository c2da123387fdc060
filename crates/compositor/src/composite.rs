//! Overlay a georeferenced radar raster onto one map tile.

use crate::config::CompositeConfig;
use crate::filter::{filter_no_data, premultiply, unpremultiply};
use crate::plan::{plan_crop, Coverage, CropPlan};
use crate::source::RadarSource;
use crate::tint::{apply_tint, fill_rect};
use georef::RasterGeoreference;
use image::{imageops, RgbaImage};
use radar_common::{BoundingBox, GridCell, OverlayError, OverlayResult};
use tracing::{debug, warn};

/// Inputs for a single composite. Borrowed for the duration of one call.
#[derive(Debug, Clone, Copy)]
pub struct CompositeRequest<'a> {
    /// Geographic area the tile covers.
    pub target: BoundingBox,
    pub tile: &'a RgbaImage,
    pub georef: &'a RasterGeoreference,
    pub radar: &'a RgbaImage,
}

impl<'a> CompositeRequest<'a> {
    /// Request for a grid cell's tile against a loaded radar source.
    pub fn for_cell(cell: &GridCell, tile: &'a RgbaImage, source: &'a RadarSource) -> Self {
        Self {
            target: cell.bbox(),
            tile,
            georef: source.georef(),
            radar: source.raster(),
        }
    }
}

/// Composite the radar over the tile and return a new raster of the tile's size.
///
/// Radar pixels that are pure black become transparent. Any part of the
/// target not covered by the radar is shaded with the warning tint; a target
/// with no coverage at all is the tile with the tint over every pixel.
/// Inputs are never modified.
pub fn compose(request: &CompositeRequest<'_>, config: &CompositeConfig) -> OverlayResult<RgbaImage> {
    let (tile_width, tile_height) = request.tile.dimensions();
    if tile_width == 0 || tile_height == 0 {
        return Err(OverlayError::MissingSourceData("tile raster is empty".to_string()));
    }
    if request.radar.dimensions() != request.georef.dims() {
        return Err(OverlayError::MissingSourceData(format!(
            "radar raster is {:?} but its georeference expects {:?}",
            request.radar.dimensions(),
            request.georef.dims()
        )));
    }

    let tint = config.tint_pixel();
    let mut output = request.tile.clone();

    let plan = match plan_crop(request.georef, &request.target)? {
        Coverage::Partial(plan) => plan,
        Coverage::None => {
            warn!(target_bbox = ?request.target, "No radar coverage for target");
            apply_tint(&mut output, tint);
            return Ok(output);
        }
    };

    let mut canvas = build_canvas(request.radar, &plan, config);
    if canvas.dimensions() != (tile_width, tile_height) {
        // Resample premultiplied so transparent no-data pixels carry no color.
        premultiply(&mut canvas);
        canvas = imageops::resize(&canvas, tile_width, tile_height, config.filter.into());
        unpremultiply(&mut canvas);
    }
    imageops::overlay(&mut output, &canvas, 0, 0);

    debug!(
        window = ?plan.window,
        overflow = ?plan.overflow,
        canvas_width = plan.canvas_width,
        canvas_height = plan.canvas_height,
        tile_width,
        tile_height,
        "Composited radar onto tile"
    );
    Ok(output)
}

/// Unclipped canvas: the filtered crop at its overflow offset, margins tinted.
fn build_canvas(radar: &RgbaImage, plan: &CropPlan, config: &CompositeConfig) -> RgbaImage {
    let window = plan.window;
    let overflow = plan.overflow;
    let tint = config.tint_pixel();

    let mut crop = imageops::crop_imm(radar, window.x, window.y, window.width, window.height).to_image();
    filter_no_data(&mut crop);

    let (width, height) = (plan.canvas_width, plan.canvas_height);
    let mut canvas = RgbaImage::new(width, height);
    imageops::replace(&mut canvas, &crop, overflow.left as i64, overflow.top as i64);

    fill_rect(&mut canvas, 0, 0, width, overflow.top, tint);
    fill_rect(&mut canvas, 0, height - overflow.bottom, width, overflow.bottom, tint);
    fill_rect(&mut canvas, 0, 0, overflow.left, height, tint);
    fill_rect(&mut canvas, width - overflow.right, 0, overflow.right, height, tint);

    canvas
}
