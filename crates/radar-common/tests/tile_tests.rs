//! Tests for the equirectangular grid and the cell locator.

use radar_common::{grid_dimensions, locate, BoundingBox, GpsCoordinate, GridCell, OverlayError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_utils::coords;

fn coord(lat: f64, lon: f64) -> GpsCoordinate {
    GpsCoordinate::new(lat, lon).unwrap()
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_locate_chicago_suburbs_zoom_8() {
    let (lat, lon) = coords::CHICAGO_SUBURBS;
    let cell = locate(coord(lat, lon), 8).unwrap();

    assert_eq!(cell, GridCell::new(130, 68, 8).unwrap());
    assert_eq!((cell.x(), cell.y(), cell.zoom()), (130, 68, 8));

    let bbox = cell.bbox();
    assert!(bbox.contains_half_open(lon, lat));
    assert_eq!(bbox.width(), 360.0 / 512.0);
    assert_eq!(bbox.width(), 0.703125);
    assert_eq!(bbox, BoundingBox::new(-88.59375, 41.484375, -87.890625, 42.1875));
}

#[test]
fn test_locate_denver() {
    let (lat, lon) = coords::DENVER;
    let cell = locate(coord(lat, lon), 8).unwrap();
    assert!(cell.bbox().contains_half_open(lon, lat));
    assert!(cell.contains(coord(lat, lon)));
}

#[test]
fn test_locate_rejects_bad_zoom() {
    let result = locate(coord(0.0, 0.0), 31);
    assert!(matches!(result, Err(OverlayError::InvalidZoom(31))));
}

// ============================================================================
// Containment property
// ============================================================================

#[test]
fn test_located_cell_contains_coordinate() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for zoom in 0..=16 {
        for _ in 0..500 {
            let lat = rng.gen_range(-90.0..90.0);
            let lon = rng.gen_range(-180.0..180.0);
            let cell = locate(coord(lat, lon), zoom).unwrap();
            assert!(
                cell.bbox().contains_half_open(lon, lat),
                "zoom {} ({}, {}) not in {:?}",
                zoom,
                lat,
                lon,
                cell.bbox()
            );
        }
    }
}

#[test]
fn test_cell_corners_locate_to_own_cell() {
    // The south-west corner of every cell is owned by that cell.
    for zoom in 0..=4 {
        let (columns, rows) = grid_dimensions(zoom).unwrap();
        for x in 0..columns {
            for y in 0..rows {
                let cell = GridCell::new(x, y, zoom).unwrap();
                let bbox = cell.bbox();
                assert_eq!(locate(coord(bbox.min_y, bbox.min_x), zoom).unwrap(), cell);
            }
        }
    }
}

#[test]
fn test_upper_edges_belong_to_neighbours() {
    let cell = GridCell::new(10, 10, 5).unwrap();
    let bbox = cell.bbox();
    let mid_lat = (bbox.min_y + bbox.max_y) / 2.0;
    let mid_lon = (bbox.min_x + bbox.max_x) / 2.0;

    let east = locate(coord(mid_lat, bbox.max_x), 5).unwrap();
    assert_eq!(east, GridCell::new(11, 10, 5).unwrap());

    let north = locate(coord(bbox.max_y, mid_lon), 5).unwrap();
    assert_eq!(north, GridCell::new(10, 9, 5).unwrap());
}

// ============================================================================
// Partition property
// ============================================================================

#[test]
fn test_cells_partition_the_globe() {
    for zoom in 0..=6 {
        let (columns, rows) = grid_dimensions(zoom).unwrap();
        let mut area = 0.0;

        for x in 0..columns {
            for y in 0..rows {
                let bbox = GridCell::new(x, y, zoom).unwrap().bbox();
                area += bbox.width() * bbox.height();

                // Edges line up exactly with the neighbours.
                if let Some(east) = GridCell::new(x, y, zoom).unwrap().east_neighbor() {
                    assert_eq!(bbox.max_x, east.bbox().min_x);
                }
                if y + 1 < rows {
                    assert_eq!(bbox.min_y, GridCell::new(x, y + 1, zoom).unwrap().bbox().max_y);
                }
            }
        }

        assert_eq!(area, 360.0 * 180.0, "zoom {}", zoom);
    }
}

#[test]
fn test_distinct_cells_do_not_overlap() {
    let zoom = 3;
    let (columns, rows) = grid_dimensions(zoom).unwrap();
    let boxes: Vec<BoundingBox> = (0..columns)
        .flat_map(|x| (0..rows).map(move |y| (x, y)))
        .map(|(x, y)| GridCell::new(x, y, zoom).unwrap().bbox())
        .collect();

    for (i, a) in boxes.iter().enumerate() {
        for b in &boxes[i + 1..] {
            assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
        }
    }
}

#[test]
fn test_outer_cells_reach_domain_edges() {
    let zoom = 7;
    let (columns, rows) = grid_dimensions(zoom).unwrap();
    let north_west = GridCell::new(0, 0, zoom).unwrap().bbox();
    let south_east = GridCell::new(columns - 1, rows - 1, zoom).unwrap().bbox();

    assert_eq!(north_west.min_x, -180.0);
    assert_eq!(north_west.max_y, 90.0);
    assert_eq!(south_east.max_x, 180.0);
    assert_eq!(south_east.min_y, -90.0);
}
