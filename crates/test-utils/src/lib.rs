//! Shared test utilities for the radar-overlay workspace.
//!
//! This crate provides:
//! - Reference world files, coordinates and colors
//! - Synthetic RGBA raster generators
//! - Helpers that write fixtures to temporary directories
//! - Approximate-equality assertion macros
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;
pub use image;

/// Approximate floating-point equality.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(40.000001, 40.0, 1e-3);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        if (left - right).abs() > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n epsilon: `{:?}`",
                left, right, epsilon
            );
        }
    }};
}

/// Approximate equality of (lat, lon) style pairs.
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($a1:expr, $b1:expr), ($a2:expr, $b2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($a1, $a2, $epsilon);
        $crate::assert_approx_eq!($b1, $b2, $epsilon);
    }};
}

/// Assert every channel of two RGBA pixels differs by at most `tolerance`.
#[macro_export]
macro_rules! assert_pixel_near {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: $crate::image::Rgba<u8> = $left;
        let right: $crate::image::Rgba<u8> = $right;
        let tolerance: i16 = $tolerance;
        for channel in 0..4 {
            let diff = (left.0[channel] as i16 - right.0[channel] as i16).abs();
            if diff > tolerance {
                panic!(
                    "pixel mismatch in channel {}: left `{:?}`, right `{:?}`, tolerance {}",
                    channel, left.0, right.0, tolerance
                );
            }
        }
    }};
}
