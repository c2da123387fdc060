//! No-data filtering for radar rasters, and the alpha conversions used when
//! resampling them.

use image::RgbaImage;

/// Make every pure-black pixel fully transparent.
///
/// Black marks "no echo" in the composite; dropping it lets the tile show
/// through. All other pixels keep their color and alpha.
pub fn filter_no_data(raster: &mut RgbaImage) {
    for pixel in raster.pixels_mut() {
        if pixel.0[..3] == [0, 0, 0] {
            pixel.0[3] = 0;
        }
    }
}

/// Scale color channels by alpha, so resampling never bleeds the color of
/// transparent pixels into their neighbours.
pub(crate) fn premultiply(raster: &mut RgbaImage) {
    for pixel in raster.pixels_mut() {
        let alpha = pixel.0[3] as u32;
        for channel in &mut pixel.0[..3] {
            *channel = ((*channel as u32 * alpha + 127) / 255) as u8;
        }
    }
}

/// Inverse of [`premultiply`]. Fully transparent pixels become `[0, 0, 0, 0]`.
pub(crate) fn unpremultiply(raster: &mut RgbaImage) {
    for pixel in raster.pixels_mut() {
        let alpha = pixel.0[3] as u32;
        if alpha == 0 {
            pixel.0 = [0, 0, 0, 0];
            continue;
        }
        for channel in &mut pixel.0[..3] {
            *channel = ((*channel as u32 * 255 + alpha / 2) / alpha).min(255) as u8;
        }
    }
}
