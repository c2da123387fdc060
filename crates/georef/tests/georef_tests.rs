//! Tests for world-file georeferencing.

use georef::{PixelCoordinate, RasterGeoreference, WorldFile};
use radar_common::{GpsCoordinate, OverlayError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_utils::{assert_approx_eq, assert_coords_approx_eq, coords, world_file};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_reference_extent() {
    let georef =
        RasterGeoreference::from_fields(world_file::REFERENCE, world_file::REFERENCE_DIMS).unwrap();
    let extent = georef.geo_extent();

    assert_approx_eq!(extent.min_y, 40.0, 1e-9);
    assert_approx_eq!(extent.max_y, 45.0, 1e-9);
    assert_approx_eq!(extent.min_x, -100.0, 1e-9);
    assert_approx_eq!(extent.max_x, -95.0, 1e-9);
    assert_eq!(georef.pixel_width(), 0.01);
    assert_eq!(georef.dims(), (500, 500));
}

#[test]
fn test_national_composite_extent() {
    let georef = RasterGeoreference::from_fields(
        world_file::NATIONAL_COMPOSITE,
        world_file::NATIONAL_COMPOSITE_DIMS,
    )
    .unwrap();
    let extent = georef.geo_extent();

    assert_approx_eq!(extent.min_x, -126.0, 1e-9);
    assert_approx_eq!(extent.max_x, -65.0, 1e-9);
    assert_approx_eq!(extent.min_y, 23.0, 1e-9);
    assert_approx_eq!(extent.max_y, 50.0, 1e-9);
}

#[test]
fn test_skew_rejected_for_any_magnitude() {
    for magnitude in [1e-12, 1e-6, 0.001, 1.0, 1e6] {
        for fields in [
            [0.01, magnitude, 0.0, -0.01, -100.0, 45.0],
            [0.01, 0.0, magnitude, -0.01, -100.0, 45.0],
            [0.01, -magnitude, -magnitude, -0.01, -100.0, 45.0],
        ] {
            let result = RasterGeoreference::from_fields(fields, (10, 10));
            assert!(
                matches!(result, Err(OverlayError::SkewedMap { .. })),
                "fields {:?} accepted",
                fields
            );
        }
    }
}

#[test]
fn test_non_square_rejected_for_any_magnitude() {
    for width in [1e-9, 0.005, 0.01, 1.0, 250.0] {
        for height in [-width * 2.0, -width * 1.000001, width, -width / 3.0] {
            let result = RasterGeoreference::from_fields([width, 0.0, 0.0, height, 0.0, 0.0], (1, 1));
            assert!(
                matches!(result, Err(OverlayError::NonSquarePixel { .. })),
                "width {} height {} accepted",
                width,
                height
            );
        }
    }
}

#[test]
fn test_skew_reported_before_non_square() {
    let result = RasterGeoreference::from_fields(world_file::SKEWED, (10, 10));
    assert!(matches!(result, Err(OverlayError::SkewedMap { .. })));

    let result = RasterGeoreference::from_fields(world_file::NON_SQUARE, (10, 10));
    assert!(matches!(result, Err(OverlayError::NonSquarePixel { .. })));
}

#[test]
fn test_construct_from_parsed_text() {
    let world = WorldFile::parse(&world_file::to_text(&world_file::REFERENCE)).unwrap();
    let georef = RasterGeoreference::new(&world, (500, 500)).unwrap();
    assert_eq!(
        georef,
        RasterGeoreference::from_fields(world_file::REFERENCE, (500, 500)).unwrap()
    );
}

// ============================================================================
// GPS -> pixel
// ============================================================================

#[test]
fn test_reference_center_pixel() {
    let georef =
        RasterGeoreference::from_fields(world_file::REFERENCE, world_file::REFERENCE_DIMS).unwrap();
    let (lat, lon) = coords::REFERENCE_CENTER;
    let pixel = georef.to_pixel(GpsCoordinate::new(lat, lon).unwrap());
    assert_eq!(pixel, PixelCoordinate::new(250, 250));

    let center = georef.pixel_center(pixel);
    assert_coords_approx_eq!((center.lat, center.lon), (42.495, -97.495), 1e-9);
}

#[test]
fn test_to_pixel_signs_outside_extent() {
    let georef =
        RasterGeoreference::from_fields(world_file::REFERENCE, world_file::REFERENCE_DIMS).unwrap();

    let north_west = georef.to_pixel(GpsCoordinate::unchecked(46.0, -101.0));
    assert_eq!(north_west, PixelCoordinate::new(-100, -100));

    let south_east = georef.to_pixel(GpsCoordinate::unchecked(39.5, -94.5));
    assert!(south_east.x >= 549 && south_east.x <= 550);
    assert!(south_east.y >= 549 && south_east.y <= 550);
}

#[test]
fn test_round_trip_within_one_pixel() {
    let georef = RasterGeoreference::from_fields(
        world_file::NATIONAL_COMPOSITE,
        world_file::NATIONAL_COMPOSITE_DIMS,
    )
    .unwrap();
    let extent = georef.geo_extent();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..2000 {
        let lat = rng.gen_range(extent.min_y..extent.max_y);
        let lon = rng.gen_range(extent.min_x..extent.max_x);
        let original = GpsCoordinate::new(lat, lon).unwrap();

        let pixel = georef.to_pixel(original);
        assert!(georef.contains_pixel(pixel), "{:?} -> {:?}", original, pixel);

        let center = georef.pixel_center(pixel);
        assert!((center.lat - lat).abs() <= georef.pixel_width());
        assert!((center.lon - lon).abs() <= georef.pixel_width());

        // The center maps back to the same pixel, give or take float noise.
        let again = georef.to_pixel(center);
        assert!((again.x - pixel.x).abs() <= 1 && (again.y - pixel.y).abs() <= 1);
    }
}
