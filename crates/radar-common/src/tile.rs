//! Equirectangular tile grid and the GPS-to-cell locator.
//!
//! At zoom `z` the plane is split into `2^(z+1)` columns of `360 / 2^(z+1)`
//! degrees and `2^z` rows of `180 / 2^z` degrees. Columns are numbered west to
//! east from -180; rows are numbered north to south from +90. Every cell is
//! half-open: its western and southern edges belong to it, its eastern and
//! northern edges belong to the neighbour. The domain's own eastern edge
//! (lon = 180) and northern edge (lat = 90) are assigned to the last column and
//! the first row.

use crate::{BoundingBox, GpsCoordinate, OverlayError, OverlayResult};
use serde::Serialize;
use tracing::debug;

/// Highest zoom whose column count still fits in a `u32`.
pub const MAX_ZOOM: u32 = 30;

/// A cell of the equirectangular grid (z/x/y).
///
/// Only built through [`GridCell::new`] or [`locate`], so the indices always
/// exist at the cell's zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridCell {
    x: u32,
    y: u32,
    zoom: u32,
}

/// Number of (columns, rows) at a zoom level.
pub fn grid_dimensions(zoom: u32) -> OverlayResult<(u32, u32)> {
    if zoom > MAX_ZOOM {
        return Err(OverlayError::InvalidZoom(zoom));
    }
    Ok((1u32 << (zoom + 1), 1u32 << zoom))
}

fn column_width(zoom: u32) -> f64 {
    360.0 / 2f64.powi(zoom as i32 + 1)
}

fn row_height(zoom: u32) -> f64 {
    180.0 / 2f64.powi(zoom as i32)
}

/// Longitude interval `[west, east)` of column `x`.
fn column_bounds(x: u32, zoom: u32) -> (f64, f64) {
    let step = column_width(zoom);
    (x as f64 * step - 180.0, (x + 1) as f64 * step - 180.0)
}

/// Latitude interval `[south, north)` of band `j`, bands counted south to north.
///
/// Band `j` is row `rows - 1 - j`. Both step sizes are exact binary fractions,
/// so this agrees bit-for-bit with `90 - (y + 1) * step .. 90 - y * step`.
fn band_bounds(j: u32, zoom: u32) -> (f64, f64) {
    let step = row_height(zoom);
    (j as f64 * step - 90.0, (j + 1) as f64 * step - 90.0)
}

/// Binary search for the half-open interval holding `value`.
///
/// `bounds` must describe `count` contiguous ascending intervals whose first
/// lower edge is `<= value`.
fn search_axis(value: f64, count: u32, bounds: impl Fn(u32) -> (f64, f64)) -> u32 {
    let last = count - 1;
    // The closed upper edge of the domain belongs to the last interval.
    if value >= bounds(last).1 {
        return last;
    }

    let (mut left, mut right) = (0u32, last);
    loop {
        let middle = left + (right - left) / 2;
        let (lower, upper) = bounds(middle);
        if value < lower {
            right = middle - 1;
        } else if value >= upper {
            left = middle + 1;
        } else {
            return middle;
        }
    }
}

/// Find the grid cell containing `coordinate` at `zoom`.
///
/// Runs two independent binary searches, one per axis, in
/// `O(log(columns) + log(rows))`.
pub fn locate(coordinate: GpsCoordinate, zoom: u32) -> OverlayResult<GridCell> {
    if !coordinate.is_valid() {
        return Err(OverlayError::OutOfRange {
            lat: coordinate.lat,
            lon: coordinate.lon,
        });
    }
    let (columns, rows) = grid_dimensions(zoom)?;

    let x = search_axis(coordinate.lon, columns, |i| column_bounds(i, zoom));
    let band = search_axis(coordinate.lat, rows, |j| band_bounds(j, zoom));
    // Rows are addressed north to south.
    let y = rows - 1 - band;

    debug!(
        lat = coordinate.lat,
        lon = coordinate.lon,
        zoom,
        x,
        y,
        "Located grid cell"
    );
    Ok(GridCell { x, y, zoom })
}

impl GridCell {
    /// Create a cell, checking the indices exist at this zoom.
    pub fn new(x: u32, y: u32, zoom: u32) -> OverlayResult<Self> {
        let (columns, rows) = grid_dimensions(zoom)?;
        if x >= columns || y >= rows {
            return Err(OverlayError::InvalidTile { x, y, zoom });
        }
        Ok(Self { x, y, zoom })
    }

    /// Column, west to east.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Row, north to south.
    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Geographic bounds of the cell.
    pub fn bbox(&self) -> BoundingBox {
        let rows = 1u32 << self.zoom;
        let (west, east) = column_bounds(self.x, self.zoom);
        let (south, north) = band_bounds(rows - 1 - self.y, self.zoom);
        BoundingBox::new(west, south, east, north)
    }

    /// Whether the cell owns this coordinate under the half-open convention.
    pub fn contains(&self, coordinate: GpsCoordinate) -> bool {
        locate(coordinate, self.zoom).map_or(false, |cell| cell == *self)
    }

    /// The next cell to the east, if any. The grid does not wrap.
    pub fn east_neighbor(&self) -> Option<GridCell> {
        let columns = 1u32 << (self.zoom + 1);
        (self.x + 1 < columns).then(|| GridCell {
            x: self.x + 1,
            ..*self
        })
    }

    /// The enclosing cell one zoom level up.
    pub fn parent(&self) -> Option<GridCell> {
        if self.zoom == 0 {
            return None;
        }
        Some(GridCell {
            x: self.x / 2,
            y: self.y / 2,
            zoom: self.zoom - 1,
        })
    }

    /// The four cells covering this one at the next zoom level.
    pub fn children(&self) -> Option<[GridCell; 4]> {
        if self.zoom >= MAX_ZOOM {
            return None;
        }
        let (x, y, zoom) = (self.x * 2, self.y * 2, self.zoom + 1);
        Some([
            GridCell { x, y, zoom },
            GridCell { x: x + 1, y, zoom },
            GridCell { x, y: y + 1, zoom },
            GridCell {
                x: x + 1,
                y: y + 1,
                zoom,
            },
        ])
    }

    /// Fill a `{z}`/`{x}`/`{y}` URL template.
    pub fn tile_url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.zoom.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }

    /// File name used for a locally stored copy of this tile.
    pub fn cache_file_name(&self) -> String {
        format!("{}+{}.png", self.x, self.y)
    }
}
