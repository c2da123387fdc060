//! Warning tint for areas without radar coverage.

use image::{Pixel, Rgba, RgbaImage};

/// Blend `tint` over every pixel of `raster`.
pub fn apply_tint(raster: &mut RgbaImage, tint: Rgba<u8>) {
    for pixel in raster.pixels_mut() {
        pixel.blend(&tint);
    }
}

/// Overwrite a rectangle with `color`. The rectangle is clipped to the raster,
/// and empty rectangles are a no-op.
pub(crate) fn fill_rect(raster: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = x.saturating_add(width).min(raster.width());
    let y_end = y.saturating_add(height).min(raster.height());

    for row in y..y_end {
        for col in x..x_end {
            raster.put_pixel(col, row, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_tint_blends_over_opaque() {
        let mut raster = RgbaImage::from_pixel(3, 3, Rgba([200, 200, 200, 255]));
        apply_tint(&mut raster, Rgba([255, 0, 0, 89]));

        // 200 * (1 - 89/255) + 255 * 89/255 ~= 219, 200 * (1 - 89/255) ~= 130
        for pixel in raster.pixels() {
            assert!((pixel.0[0] as i16 - 219).abs() <= 1, "{:?}", pixel);
            assert!((pixel.0[1] as i16 - 130).abs() <= 1, "{:?}", pixel);
            assert_eq!(pixel.0[3], 255);
        }
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut raster = RgbaImage::new(4, 4);
        fill_rect(&mut raster, 2, 2, 10, 10, Rgba([1, 2, 3, 4]));
        assert_eq!(raster.get_pixel(3, 3).0, [1, 2, 3, 4]);
        assert_eq!(raster.get_pixel(1, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_rect_empty_is_noop() {
        let mut raster = RgbaImage::new(4, 4);
        fill_rect(&mut raster, 0, 0, 0, 4, Rgba([1, 2, 3, 4]));
        fill_rect(&mut raster, 0, 0, 4, 0, Rgba([1, 2, 3, 4]));
        assert!(raster.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }
}
